use super::Citation;

/// Request configuration for a single web search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Model used to answer the query
    pub model: String,
    /// Restrict the web search tool to these domains, in caller order
    pub allowed_domains: Option<Vec<String>>,
}

impl SearchOptions {
    /// Creates options for `model` with no domain filter.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            allowed_domains: None,
        }
    }

    /// Sets the allowed domain list.
    #[must_use]
    pub fn with_allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = Some(domains);
        self
    }

    /// Returns the domain filter, treating an empty list as no filter.
    pub fn domain_filter(&self) -> Option<&[String]> {
        self.allowed_domains
            .as_deref()
            .filter(|domains| !domains.is_empty())
    }
}

/// Answer to a web search query together with its sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    answer: String,
    citations: Vec<Citation>,
}

impl SearchResult {
    /// Creates a search result.
    pub fn new(answer: impl Into<String>, citations: Vec<Citation>) -> Self {
        Self {
            answer: answer.into(),
            citations,
        }
    }

    /// Returns the answer text.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Returns the citations in the order the response listed them.
    pub fn citations(&self) -> &[Citation] {
        &self.citations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_options_default_has_no_domain_filter() {
        let options = SearchOptions::new("gpt-4o-mini");
        assert_eq!(options.model, "gpt-4o-mini");
        assert_eq!(options.domain_filter(), None);
    }

    #[test]
    fn search_options_empty_domain_list_is_no_filter() {
        let options = SearchOptions::new("m").with_allowed_domains(Vec::new());
        assert_eq!(options.domain_filter(), None);
    }

    #[test]
    fn search_options_keeps_domain_order() {
        let options = SearchOptions::new("m")
            .with_allowed_domains(vec!["bbc.com".to_string(), "cnn.com".to_string()]);
        assert_eq!(
            options.domain_filter(),
            Some(&["bbc.com".to_string(), "cnn.com".to_string()][..])
        );
    }

    #[test]
    fn search_result_exposes_answer_and_citations() {
        let result = SearchResult::new(
            "Rust 1.80 shipped",
            vec![Citation::new("Release notes", "https://blog.rust-lang.org/")],
        );
        assert_eq!(result.answer(), "Rust 1.80 shipped");
        assert_eq!(result.citations().len(), 1);
        assert_eq!(result.citations()[0].url(), "https://blog.rust-lang.org/");
    }
}
