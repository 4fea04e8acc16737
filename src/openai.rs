/// OpenAI Responses API client module.
///
/// This module provides a blocking HTTP client for the `/responses` endpoint,
/// the request wire types, and a shape-tolerant view of the response body.
mod client;
mod request;
mod response;

pub use client::{DEFAULT_BASE_URL, OpenAiClient, OpenAiClientBuilder, OpenAiClientTrait, OpenAiError};
pub use request::{InputMessage, ResponseRequest, Role, Tool, WebSearchFilters};
pub use response::{ApiResponse, ResponseBody, ShapeError};
