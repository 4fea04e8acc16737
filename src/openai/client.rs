/// OpenAI HTTP client implementation.
///
/// This module provides `OpenAiClient` for making synchronous HTTP requests to the
/// Responses API, along with error types and builder patterns for configuration.
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use super::request::ResponseRequest;
use super::response::ApiResponse;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Errors that can occur when interacting with the OpenAI API.
#[derive(Debug, Error)]
pub enum OpenAiError {
    /// Network-related errors (connection failures, DNS resolution, etc.)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Request or response timeout errors
    #[error("Request timed out")]
    Timeout(#[source] reqwest::Error),

    /// Non-success HTTP status, with the message the API returned
    #[error("HTTP error: status {status}: {message}")]
    Http { status: u16, message: String },

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Error reported inside an otherwise successful response
    #[error("OpenAI API error: {message}")]
    Api { message: String },

    /// Invalid URL configuration error
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No API key was configured
    #[error("OPENAI_API_KEY not found in environment variables")]
    MissingApiKey,
}

impl From<reqwest::Error> for OpenAiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            OpenAiError::Timeout(error)
        } else {
            OpenAiError::Network(error)
        }
    }
}

/// Builder for constructing `OpenAiClient` instances.
///
/// # Examples
///
/// ```
/// use lexi::openai::OpenAiClientBuilder;
///
/// let client = OpenAiClientBuilder::new()
///     .api_key("sk-test")
///     .base_url("http://localhost:8080/v1")
///     .build()
///     .expect("Failed to create client");
/// assert_eq!(client.base_url(), "http://localhost:8080/v1");
/// ```
#[derive(Debug, Default)]
pub struct OpenAiClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl OpenAiClientBuilder {
    /// Creates a new `OpenAiClientBuilder` with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL for the API (e.g. "https://api.openai.com/v1").
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the bearer token sent with every request.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Overrides the whole-request timeout (default 60s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the `OpenAiClient` with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns `OpenAiError::MissingApiKey` if no non-empty key was set and
    /// `OpenAiError::InvalidUrl` if the base URL does not parse.
    pub fn build(self) -> Result<OpenAiClient, OpenAiError> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(OpenAiError::MissingApiKey)?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        reqwest::Url::parse(&base_url)
            .map_err(|e| OpenAiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout.unwrap_or(Duration::from_secs(60)))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(OpenAiError::Network)?;

        Ok(OpenAiClient {
            client,
            base_url,
            api_key,
        })
    }
}

/// Synchronous HTTP client for the OpenAI Responses API.
///
/// It should be constructed using `OpenAiClientBuilder`.
pub struct OpenAiClient {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

/// Trait for Responses API operations.
///
/// This is the seam the translation and search clients call through, so unit
/// tests can substitute a canned response.
pub trait OpenAiClientTrait: Send + Sync {
    /// Sends `request` to the Responses endpoint and returns the decoded body.
    fn create_response(&self, request: &ResponseRequest) -> Result<ApiResponse, OpenAiError>;
}

impl OpenAiClient {
    /// Returns the base URL configured for this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url)
    }
}

impl OpenAiClientTrait for OpenAiClient {
    fn create_response(&self, request: &ResponseRequest) -> Result<ApiResponse, OpenAiError> {
        let url = self.responses_url();
        debug!(
            url = %url,
            model = %request.model,
            messages = request.input.len(),
            tools = request.tools.len(),
            "sending responses request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .map(ApiResponse::new)
                .and_then(|r| r.error_message())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
            return Err(OpenAiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let json: serde_json::Value =
            serde_json::from_str(&body).map_err(OpenAiError::Serialization)?;
        let api_response = ApiResponse::new(json);

        if let Some(message) = api_response.error_message() {
            return Err(OpenAiError::Api { message });
        }

        debug!(status = status.as_u16(), bytes = body.len(), "received responses body");
        Ok(api_response)
    }
}
