/// Translation and search clients.
///
/// Each client builds a Responses API request, sends it through an
/// `OpenAiClientTrait`, and decodes the body with the matching parser.
/// Nothing is retried.
mod search;
mod translation;

pub use search::{SEARCH_INSTRUCTIONS, Search, SearchClient};
pub use translation::{DEFAULT_MODEL, SYSTEM_PROMPT, Translate, TranslationClient};

use thiserror::Error;

use crate::openai::OpenAiError;
use crate::parser::ParseError;

/// Failure of a single client call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The API call itself failed
    #[error(transparent)]
    Transport(#[from] OpenAiError),

    /// The API answered but the payload broke the response contract
    #[error(transparent)]
    Decode(#[from] ParseError),
}
