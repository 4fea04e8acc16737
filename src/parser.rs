//! Decoding of model output into typed results.
//!
//! Both parsers are all-or-nothing: they either return a fully built result
//! or a `ParseError` naming the first contract violation found.

mod search;
mod translation;

pub use search::{SearchParser, format_for_display};
pub use translation::TranslationParser;

use thiserror::Error;

/// Reasons a model response was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The raw payload is not syntactically valid JSON
    #[error("Expected JSON translation payload")]
    NotJson,

    /// The payload decoded to something other than an object
    #[error("Expected JSON object at top level")]
    NotObject,

    /// `detected_language` or `translations` is absent
    #[error("Missing required fields: detected_language, translations")]
    MissingFields,

    /// A required field has the wrong JSON type
    #[error("Invalid types for detected_language or translations")]
    InvalidTypes,

    /// `original_text` is present but not a string
    #[error("Invalid type for original_text")]
    InvalidOriginalText,

    /// `translations` is an empty object
    #[error("Expected at least one translation")]
    EmptyTranslations,

    /// A search response carried no answer text
    #[error("Search response contained no answer text")]
    MissingAnswer,
}
