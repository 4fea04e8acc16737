//! Detect-and-translate client.

use std::sync::Arc;

use tracing::{debug, info};

use super::ClientError;
use crate::extractor::ResponseTextExtractor;
use crate::models::TranslationResult;
use crate::openai::{OpenAiClientTrait, ResponseRequest};
use crate::parser::TranslationParser;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Fixed instruction describing the strict JSON contract.
pub const SYSTEM_PROMPT: &str = "You are a translation engine. Detect the language of the provided text \
and translate it into every requested target language. Respond with ONLY one JSON object using exactly \
these keys: \"detected_language\" (string, the English name of the source language), \"translations\" \
(object whose keys are the requested language codes exactly as given and whose values are the translated \
text), and optionally \"original_text\" (string, the input text unchanged). Do not add prose, explanations, \
markdown, code fences, or any other keys.";

/// Anything that can translate text into a list of target languages.
///
/// `TranslationClient` is the production implementation; the service also
/// accepts any other implementation, which is how tests substitute their own.
pub trait Translate: Send + Sync {
    /// Detects the language of `text` and translates it into each of `targets`.
    fn translate(&self, text: &str, targets: &[String]) -> Result<TranslationResult, ClientError>;

    /// Returns the model used for requests.
    fn model(&self) -> &str;

    /// Replaces the model used for subsequent requests.
    fn set_model(&mut self, model: String);
}

/// Sends translation requests to the Responses API.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use lexi::client::{Translate, TranslationClient};
/// use lexi::openai::OpenAiClientBuilder;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let api = OpenAiClientBuilder::new().api_key("sk-...").build()?;
/// let client = TranslationClient::new(Arc::new(api));
///
/// let result = client.translate("Bonjour le monde", &["en".to_string(), "es".to_string()])?;
/// for (code, text) in result.translations() {
///     println!("{code}: {text}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct TranslationClient {
    api: Arc<dyn OpenAiClientTrait>,
    model: String,
    temperature: f64,
}

impl TranslationClient {
    /// Creates a client using `DEFAULT_MODEL` and temperature 0.
    pub fn new(api: Arc<dyn OpenAiClientTrait>) -> Self {
        Self {
            api,
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
        }
    }

    /// Uses `model` when given, keeping the current model otherwise.
    #[must_use]
    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model {
            self.model = model;
        }
        self
    }

    /// Overrides the temperature when given; otherwise decoding stays deterministic.
    #[must_use]
    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature.unwrap_or(0.0);
        self
    }

    /// Returns the sampling temperature sent with each request.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Builds the request for `text` and `targets`, keeping target order.
    pub fn build_request(&self, text: &str, targets: &[String]) -> ResponseRequest {
        ResponseRequest::new(&self.model)
            .system(SYSTEM_PROMPT)
            .user(user_prompt(text, targets))
            .temperature(self.temperature)
    }
}

impl Translate for TranslationClient {
    fn translate(&self, text: &str, targets: &[String]) -> Result<TranslationResult, ClientError> {
        let request = self.build_request(text, targets);
        info!(model = %self.model, targets = targets.len(), "requesting translation");

        let response = self.api.create_response(&request)?;
        let raw = ResponseTextExtractor::extract(&response);
        debug!(raw_len = raw.len(), "decoding translation payload");

        Ok(TranslationParser::parse(&raw)?)
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn set_model(&mut self, model: String) {
        self.model = model;
    }
}

fn user_prompt(text: &str, targets: &[String]) -> String {
    format!(
        "Detect the source language and translate the text below into {}.\nText:\n{}",
        targets.join(", "),
        text
    )
}
