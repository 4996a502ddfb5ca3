//! Web search integration
//!
//! Provides the search provider trait, the paginating HTTP gateway over a
//! programmable search engine, and the super-context assembly used to ground
//! LLM synthesis.

mod context;
mod gateway;

pub use context::{snippet_text, ContextBuilder, NO_INFORMATION};
pub use gateway::{SearchProvider, SearchResult, WebSearchClient};
