use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::client::{Search, SearchClient, Translate, TranslationClient};
use crate::models::{SearchOptions, SearchResult, TranslationResult};
use crate::openai::OpenAiClientTrait;

/// What a service is constructed from.
///
/// Either the raw API client, which the service wraps in its own client, or
/// an already built client that the service uses as-is.
pub enum ClientHandle<C> {
    /// Raw Responses API client
    Raw(Arc<dyn OpenAiClientTrait>),
    /// Ready-made translation or search client
    Wrapped(C),
}

/// Translation failed; wraps whatever went wrong below the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Translation API error: {message}")]
pub struct TranslationError {
    message: String,
}

impl TranslationError {
    /// Returns the underlying failure message without the prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Search failed; wraps whatever went wrong below the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Search API error: {message}")]
pub struct SearchError {
    message: String,
}

impl SearchError {
    /// Returns the underlying failure message without the prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Translation entry point used by the CLI.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use lexi::openai::OpenAiClientBuilder;
/// use lexi::service::{ClientHandle, TranslationService};
///
/// # fn main() -> anyhow::Result<()> {
/// let api = OpenAiClientBuilder::new().api_key("sk-...").build()?;
/// let service = TranslationService::new(ClientHandle::Raw(Arc::new(api)), Some("gpt-4o".to_string()));
///
/// let result = service.translate("Hola", &["en".to_string()])?;
/// println!("{}", result.detected_language());
/// # Ok(())
/// # }
/// ```
pub struct TranslationService {
    client: Box<dyn Translate>,
    model: Option<String>,
}

impl TranslationService {
    /// Resolves `handle` into the client this service delegates to.
    ///
    /// A raw API client is wrapped in a `TranslationClient` built with
    /// `model`. A wrapped client is kept, and its model is replaced when
    /// `model` is given.
    pub fn new(handle: ClientHandle<Box<dyn Translate>>, model: Option<String>) -> Self {
        let client: Box<dyn Translate> = match handle {
            ClientHandle::Raw(api) => Box::new(TranslationClient::new(api).with_model(model.clone())),
            ClientHandle::Wrapped(mut client) => {
                if let Some(model) = &model {
                    client.set_model(model.clone());
                }
                client
            }
        };

        Self { client, model }
    }

    /// Returns the model override this service was built with.
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Returns the model the underlying client will use.
    pub fn client_model(&self) -> &str {
        self.client.model()
    }

    /// Translates `text` into each of `targets`.
    ///
    /// # Errors
    ///
    /// Every failure, transport or decode, comes back as `TranslationError`.
    pub fn translate(
        &self,
        text: &str,
        targets: &[String],
    ) -> Result<TranslationResult, TranslationError> {
        self.client.translate(text, targets).map_err(|e| {
            warn!(error = %e, "translation failed");
            TranslationError {
                message: e.to_string(),
            }
        })
    }
}

/// Web search entry point used by the CLI.
pub struct SearchService {
    client: Box<dyn Search>,
}

impl SearchService {
    /// Resolves `handle` into the client this service delegates to.
    pub fn new(handle: ClientHandle<Box<dyn Search>>) -> Self {
        let client: Box<dyn Search> = match handle {
            ClientHandle::Raw(api) => Box::new(SearchClient::new(api)),
            ClientHandle::Wrapped(client) => client,
        };

        Self { client }
    }

    /// Answers `query` with web sources.
    ///
    /// # Errors
    ///
    /// Every failure, transport or decode, comes back as `SearchError`.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Result<SearchResult, SearchError> {
        self.client.search(query, options).map_err(|e| {
            warn!(error = %e, "search failed");
            SearchError {
                message: e.to_string(),
            }
        })
    }
}
