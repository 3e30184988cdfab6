//! Text extractors: requirement keywords and page context sentences

pub mod keywords;
pub mod sentences;

pub use keywords::KeywordExtractor;
pub use sentences::extract_context_sentences;
