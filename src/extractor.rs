//! Locates the raw text payload of a Responses API body.
//!
//! Strategies run in a fixed order and the first one that yields text wins:
//!
//! 1. the computed `output_text` accessor; a shape error is ignored
//! 2. a plain string `output_text` member
//! 3. `output[0].content[0].text`
//!
//! When none of them applies, [`ResponseTextExtractor::extract`] returns the
//! body's string form. That text then fails JSON decoding in the parser, so an
//! unrecognised shape surfaces as a parse error rather than an extraction error.

use serde_json::Value;
use tracing::debug;

use crate::openai::ResponseBody;

/// A single way of finding the text in a response.
pub type Strategy = fn(&dyn ResponseBody) -> Option<String>;

/// Extraction strategies in priority order.
pub const STRATEGIES: [(&str, Strategy); 3] = [
    ("computed_output_text", computed_output_text),
    ("output_text_field", output_text_field),
    ("first_content_text", first_content_text),
];

/// Shape-agnostic text extraction for response bodies.
pub struct ResponseTextExtractor;

impl ResponseTextExtractor {
    /// Returns the response text, falling back to the body's string form.
    ///
    /// Never fails.
    pub fn extract(response: &dyn ResponseBody) -> String {
        Self::try_extract(response).unwrap_or_else(|| {
            debug!("no extraction strategy matched; using string form of response");
            response.to_string()
        })
    }

    /// Returns the response text if any strategy finds it.
    pub fn try_extract(response: &dyn ResponseBody) -> Option<String> {
        STRATEGIES.iter().find_map(|(name, strategy)| {
            let text = strategy(response)?;
            debug!(strategy = *name, chars = text.chars().count(), "extracted response text");
            Some(text)
        })
    }
}

fn computed_output_text(response: &dyn ResponseBody) -> Option<String> {
    match response.computed_output_text()? {
        Ok(text) => Some(text),
        Err(e) => {
            debug!(error = %e, "computed output_text unavailable");
            None
        }
    }
}

fn output_text_field(response: &dyn ResponseBody) -> Option<String> {
    response
        .output_text_value()
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn first_content_text(response: &dyn ResponseBody) -> Option<String> {
    response
        .output()?
        .as_array()?
        .first()?
        .get("content")?
        .as_array()?
        .first()?
        .get("text")?
        .as_str()
        .map(str::to_string)
}
