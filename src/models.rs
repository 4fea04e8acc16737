mod citation;
mod search;
mod translation;

pub use citation::Citation;
pub use search::{SearchOptions, SearchResult};
pub use translation::TranslationResult;
