//! Response body of the Responses endpoint.
//!
//! The same answer has been delivered under several shapes over time: an
//! aggregated `output_text` accessor, a plain `output_text` string, or only the
//! structured `output[].content[]` tree. `ResponseBody` exposes each of those
//! accessors so the extractor can probe them without knowing which one a given
//! body actually carries.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// A response body did not have the structure an accessor expected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected response shape: {0}")]
pub struct ShapeError(pub String);

/// Accessors the text extractor and the search parser probe on a response.
///
/// Every accessor defaults to "not offered", so a body only implements the
/// shapes it really has. `Display` must render the whole body; it is the last
/// resort when no accessor yields text.
pub trait ResponseBody: fmt::Display {
    /// Computes the concatenated output text.
    ///
    /// Returns `None` when the body offers no such accessor and
    /// `Some(Err(_))` when it exists but cannot be computed for this body.
    fn computed_output_text(&self) -> Option<Result<String, ShapeError>> {
        None
    }

    /// Returns the `output_text` member, whatever its JSON type.
    fn output_text_value(&self) -> Option<&Value> {
        None
    }

    /// Returns the structured `output` member, whatever its JSON type.
    fn output(&self) -> Option<&Value> {
        None
    }
}

/// Response body as decoded from the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ApiResponse {
    body: Value,
}

impl ApiResponse {
    /// Wraps an already decoded JSON body.
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// Returns the raw JSON body.
    pub fn as_value(&self) -> &Value {
        &self.body
    }

    /// Returns the error message the API embedded in the body, if any.
    ///
    /// A failed response carries `"error": {"message": ...}`; a successful one
    /// has `"error": null` or no member at all.
    pub fn error_message(&self) -> Option<String> {
        let error = self.body.get("error").filter(|e| !e.is_null())?;
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        Some(message)
    }
}

impl From<Value> for ApiResponse {
    fn from(body: Value) -> Self {
        Self::new(body)
    }
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.body)
    }
}

impl ResponseBody for ApiResponse {
    /// Concatenates every `output_text` part of every `message` item.
    fn computed_output_text(&self) -> Option<Result<String, ShapeError>> {
        let output = self.body.get("output")?;
        let Some(items) = output.as_array() else {
            return Some(Err(ShapeError("`output` is not an array".to_string())));
        };

        let mut text = String::new();
        let mut found = false;
        for item in items {
            if item.get("type").and_then(Value::as_str) != Some("message") {
                continue;
            }
            let Some(parts) = item.get("content").and_then(Value::as_array) else {
                return Some(Err(ShapeError(
                    "message item has no `content` array".to_string(),
                )));
            };
            for part in parts {
                if part.get("type").and_then(Value::as_str) != Some("output_text") {
                    continue;
                }
                match part.get("text") {
                    Some(Value::String(s)) => {
                        text.push_str(s);
                        found = true;
                    }
                    _ => {
                        return Some(Err(ShapeError(
                            "output_text part has no string `text`".to_string(),
                        )));
                    }
                }
            }
        }

        found.then_some(Ok(text))
    }

    fn output_text_value(&self) -> Option<&Value> {
        self.body.get("output_text")
    }

    fn output(&self) -> Option<&Value> {
        self.body.get("output")
    }
}
