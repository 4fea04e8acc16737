//! Request body for `POST /responses`.

use serde::Serialize;

/// Author of an input message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One message of the request `input` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputMessage {
    pub role: Role,
    pub content: String,
}

/// Domain restriction for the hosted web search tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebSearchFilters {
    pub allowed_domains: Vec<String>,
}

/// Hosted tools the model may call while producing its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Tool {
    WebSearch {
        #[serde(skip_serializing_if = "Option::is_none")]
        filters: Option<WebSearchFilters>,
    },
}

impl Tool {
    /// Web search tool, optionally limited to `allowed_domains`.
    pub fn web_search(allowed_domains: Option<&[String]>) -> Self {
        Tool::WebSearch {
            filters: allowed_domains.map(|domains| WebSearchFilters {
                allowed_domains: domains.to_vec(),
            }),
        }
    }
}

/// Request body for the Responses endpoint.
///
/// # Examples
///
/// ```
/// use lexi::openai::{ResponseRequest, Role};
///
/// let request = ResponseRequest::new("gpt-4o-mini")
///     .system("You are terse.")
///     .user("Hello")
///     .temperature(0.0);
///
/// assert_eq!(request.input[1].role, Role::User);
/// assert_eq!(request.temperature, Some(0.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseRequest {
    pub model: String,
    pub input: Vec<InputMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

impl ResponseRequest {
    /// Creates an empty request for `model`.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            input: Vec::new(),
            temperature: None,
            tools: Vec::new(),
        }
    }

    /// Appends a system message.
    #[must_use]
    pub fn system(self, content: impl Into<String>) -> Self {
        self.message(Role::System, content)
    }

    /// Appends a user message.
    #[must_use]
    pub fn user(self, content: impl Into<String>) -> Self {
        self.message(Role::User, content)
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Adds a hosted tool.
    #[must_use]
    pub fn tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }

    /// Returns the content of the first user message.
    pub fn user_message(&self) -> Option<&str> {
        self.input
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }

    fn message(mut self, role: Role, content: impl Into<String>) -> Self {
        self.input.push(InputMessage {
            role,
            content: content.into(),
        });
        self
    }
}
