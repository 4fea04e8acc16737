pub mod cli;
pub mod client;
pub mod config;
pub mod extractor;
pub mod interactive;
pub mod languages;
pub mod logging;
pub mod models;
pub mod openai;
pub mod parser;
pub mod service;

pub use client::{ClientError, Search, SearchClient, Translate, TranslationClient};
pub use config::AppConfig;
pub use extractor::ResponseTextExtractor;
pub use models::{Citation, SearchOptions, SearchResult, TranslationResult};
pub use openai::{OpenAiClient, OpenAiClientBuilder, OpenAiClientTrait, OpenAiError};
pub use parser::{ParseError, SearchParser, TranslationParser};
pub use service::{ClientHandle, SearchError, SearchService, TranslationError, TranslationService};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_accessible_from_crate_root() {
        let result = TranslationResult::new("Hola", "Spanish", [("en", "Hello")]);
        assert_eq!(result.translation("en"), Some("Hello"));

        let citation = Citation::new("Rust", "https://www.rust-lang.org/");
        assert_eq!(citation.to_string(), "Rust - https://www.rust-lang.org/");

        let options = SearchOptions::new("gpt-4o-mini");
        assert!(options.domain_filter().is_none());

        assert_eq!(AppConfig::default().model, "gpt-4o-mini");
    }
}
