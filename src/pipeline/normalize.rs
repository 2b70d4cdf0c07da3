//! Unicode and whitespace normalization.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Canonicalizes repaired text for segmentation.
///
/// Stages, in order:
/// 1. NFKC (compatibility decomposition, canonical composition)
/// 2. every whitespace run becomes a single space
/// 3. whitespace before `.`, `!` or `?` is removed
///
/// Whitespace collapse removes the line breaks structural repair depends
/// on, so normalization always runs after repair.
#[derive(Debug, Clone)]
pub struct Normalizer {
    whitespace_run: Regex,
    space_before_terminal: Regex,
}

impl Normalizer {
    /// Create a new normalizer.
    pub fn new() -> Self {
        Self {
            whitespace_run: Regex::new(r"\s+").expect("whitespace pattern is valid"),
            space_before_terminal: Regex::new(r"\s+([.!?])")
                .expect("terminal spacing pattern is valid"),
        }
    }

    /// Normalize text. Total over every input string.
    pub fn normalize(&self, text: &str) -> String {
        let composed: String = text.nfkc().collect();
        let collapsed = self.whitespace_run.replace_all(&composed, " ");
        self.space_before_terminal
            .replace_all(&collapsed, "${1}")
            .into_owned()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
