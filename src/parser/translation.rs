//! Strict JSON contract for translation payloads.

use serde_json::{Map, Value};

use super::ParseError;
use crate::models::TranslationResult;

/// Decodes the model's translation payload.
///
/// The payload must be a JSON object shaped like:
///
/// ```json
/// {
///   "detected_language": "French",
///   "translations": {"en": "Hello world", "es": "Hola mundo"},
///   "original_text": "Bonjour le monde"
/// }
/// ```
///
/// `original_text` is optional. Language codes are not checked here; the CLI
/// validates the codes it asks for.
pub struct TranslationParser;

impl TranslationParser {
    /// Parses `raw` into a `TranslationResult`.
    ///
    /// # Errors
    ///
    /// Returns the `ParseError` for the first violated rule, checked in this
    /// order: valid JSON, object at top level, both required fields present,
    /// field types, `original_text` type, at least one translation.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexi::parser::TranslationParser;
    ///
    /// let result = TranslationParser::parse(
    ///     r#"{"detected_language":"French","translations":{"en":"Hello world"}}"#,
    /// )
    /// .unwrap();
    /// assert_eq!(result.translation("en"), Some("Hello world"));
    /// assert_eq!(result.original_text(), "");
    /// ```
    pub fn parse(raw: &str) -> Result<TranslationResult, ParseError> {
        let value: Value = serde_json::from_str(raw).map_err(|_| ParseError::NotJson)?;

        let obj = value.as_object().ok_or(ParseError::NotObject)?;

        let (Some(detected), Some(translations)) =
            (obj.get("detected_language"), obj.get("translations"))
        else {
            return Err(ParseError::MissingFields);
        };

        let (Some(detected), Some(translations)) = (detected.as_str(), translations.as_object())
        else {
            return Err(ParseError::InvalidTypes);
        };

        let entries = string_entries(translations)?;

        let original_text = match obj.get("original_text") {
            None | Some(Value::Null) => "",
            Some(Value::String(s)) => s.as_str(),
            Some(_) => return Err(ParseError::InvalidOriginalText),
        };

        if entries.is_empty() {
            return Err(ParseError::EmptyTranslations);
        }

        Ok(TranslationResult::new(original_text, detected, entries))
    }
}

/// Collects `(code, text)` pairs in payload order, rejecting non-string text.
fn string_entries(translations: &Map<String, Value>) -> Result<Vec<(&str, &str)>, ParseError> {
    translations
        .iter()
        .map(|(code, text)| {
            text.as_str()
                .map(|text| (code.as_str(), text))
                .ok_or(ParseError::InvalidTypes)
        })
        .collect()
}
