//! Super-context assembly from categorized search snippets

use super::SearchResult;
use std::fmt::Write;

/// Marker recorded when a category search fails or returns nothing
pub const NO_INFORMATION: &str = "no information found";

/// Join result snippets into a single grounding string
pub fn snippet_text(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|result| result.snippet.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Accumulates category-tagged snippet sections for the synthesizer.
///
/// Sections keep insertion order; the synthesis prompt relies on the
/// category headers to ground each part of the report in its own context.
#[derive(Debug, Default)]
pub struct ContextBuilder {
    buffer: String,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a category section; blank text records [`NO_INFORMATION`]
    pub fn push_section(&mut self, category: &str, text: &str) {
        let _ = write!(
            self.buffer,
            "\n\n--- CONTEXT FOR {} ---\n",
            category.to_uppercase()
        );
        if text.trim().is_empty() {
            self.buffer.push_str(NO_INFORMATION);
        } else {
            self.buffer.push_str(text);
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}
