//! Web-search-augmented question answering client.

use std::sync::Arc;

use tracing::info;

use super::ClientError;
use crate::models::{SearchOptions, SearchResult};
use crate::openai::{OpenAiClientTrait, ResponseRequest, Tool};
use crate::parser::SearchParser;

/// Instruction sent with every search request.
pub const SEARCH_INSTRUCTIONS: &str = "You are a research assistant with web search. Search the web \
before answering, answer the question concisely and accurately, and cite the pages you relied on.";

/// Anything that can answer a query with web sources.
pub trait Search: Send + Sync {
    /// Answers `query` using the model and domain filter in `options`.
    fn search(&self, query: &str, options: &SearchOptions) -> Result<SearchResult, ClientError>;
}

/// Sends web search requests to the Responses API.
pub struct SearchClient {
    api: Arc<dyn OpenAiClientTrait>,
}

impl SearchClient {
    /// Creates a search client over `api`.
    pub fn new(api: Arc<dyn OpenAiClientTrait>) -> Self {
        Self { api }
    }

    /// Builds the request for `query`: the web search tool, filtered to the
    /// allowed domains when any are set.
    pub fn build_request(&self, query: &str, options: &SearchOptions) -> ResponseRequest {
        ResponseRequest::new(&options.model)
            .system(SEARCH_INSTRUCTIONS)
            .user(query)
            .tool(Tool::web_search(options.domain_filter()))
    }
}

impl Search for SearchClient {
    fn search(&self, query: &str, options: &SearchOptions) -> Result<SearchResult, ClientError> {
        let request = self.build_request(query, options);
        info!(
            model = %options.model,
            domains = options.domain_filter().map_or(0, <[String]>::len),
            "requesting web search"
        );

        let response = self.api.create_response(&request)?;
        Ok(SearchParser::parse(&response)?)
    }
}
