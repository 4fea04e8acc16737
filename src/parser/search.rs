//! Answer and citation extraction for web search responses.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::ParseError;
use crate::extractor::ResponseTextExtractor;
use crate::models::{Citation, SearchResult};
use crate::openai::ResponseBody;

/// Inline markdown link pointing at an http(s) URL: `[title](url)`.
static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\[\]]+)\]\((https?://[^\s)]+)\)").expect("markdown link pattern is valid")
});

/// Builds a `SearchResult` from a web-search-augmented response.
pub struct SearchParser;

impl SearchParser {
    /// Parses the answer and its citations out of `response`.
    ///
    /// Citations come from the `url_citation` annotations attached to the
    /// answer text. When the response has none, inline markdown links in the
    /// answer are used instead. Either way they keep document order and a URL
    /// is listed once.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingAnswer` if no answer text can be located or
    /// the text is blank.
    pub fn parse(response: &dyn ResponseBody) -> Result<SearchResult, ParseError> {
        let answer = ResponseTextExtractor::try_extract(response)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(ParseError::MissingAnswer)?;

        let mut citations = annotation_citations(response);
        if citations.is_empty() {
            citations = markdown_citations(&answer);
        }

        Ok(SearchResult::new(answer, dedupe_by_url(citations)))
    }
}

/// Renders a search result for the terminal.
///
/// # Examples
///
/// ```
/// use lexi::models::{Citation, SearchResult};
/// use lexi::parser::format_for_display;
///
/// let result = SearchResult::new(
///     "Rust 2024 is out.",
///     vec![Citation::new("Rust Blog", "https://blog.rust-lang.org/")],
/// );
/// assert_eq!(
///     format_for_display(&result),
///     "Rust 2024 is out.\n\nSources:\n[1] Rust Blog - https://blog.rust-lang.org/"
/// );
/// ```
pub fn format_for_display(result: &SearchResult) -> String {
    let sources = if result.citations().is_empty() {
        "No citations found".to_string()
    } else {
        let lines: Vec<String> = result
            .citations()
            .iter()
            .enumerate()
            .map(|(i, citation)| format!("[{}] {}", i + 1, citation))
            .collect();
        format!("Sources:\n{}", lines.join("\n"))
    };

    format!("{}\n\n{}", result.answer(), sources)
}

/// Collects `url_citation` annotations from every `output_text` part.
fn annotation_citations(response: &dyn ResponseBody) -> Vec<Citation> {
    let Some(items) = response.output().and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter(|item| item.get("type").and_then(Value::as_str) == Some("message"))
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .filter(|part| part.get("type").and_then(Value::as_str) == Some("output_text"))
        .filter_map(|part| part.get("annotations").and_then(Value::as_array))
        .flatten()
        .filter(|a| a.get("type").and_then(Value::as_str) == Some("url_citation"))
        .filter_map(|annotation| {
            let url = annotation.get("url").and_then(Value::as_str)?;
            let title = annotation
                .get("title")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or(url);
            Some(Citation::new(title, url))
        })
        .collect()
}

/// Treats inline `[title](url)` links in the answer as citation markers.
fn markdown_citations(answer: &str) -> Vec<Citation> {
    MARKDOWN_LINK
        .captures_iter(answer)
        .map(|caps| Citation::new(caps[1].trim(), &caps[2]))
        .collect()
}

fn dedupe_by_url(citations: Vec<Citation>) -> Vec<Citation> {
    let mut seen = HashSet::new();
    citations
        .into_iter()
        .filter(|c| seen.insert(c.url().to_string()))
        .collect()
}
