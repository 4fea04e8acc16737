use std::fmt;

/// A web source the model cited while answering a search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    title: String,
    url: String,
}

impl Citation {
    /// Creates a citation. The URL is kept verbatim.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Returns the page title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the cited URL exactly as the response carried it.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.title, self.url)
    }
}
