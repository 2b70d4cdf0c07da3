//! Sentence segmentation and filtering.

use regex::Regex;

/// Splits normalized text into sentences and drops low-value fragments.
///
/// A boundary is a `.`, `!` or `?` followed by whitespace. The mark stays
/// with the sentence it ends; the whitespace is dropped. No abbreviation
/// handling: `"Dr. Smith"` is two candidates.
#[derive(Debug, Clone)]
pub struct Segmenter {
    boundary: Regex,
    min_chars: usize,
}

impl Segmenter {
    /// Create a segmenter that keeps sentences longer than `min_chars`.
    pub fn new(min_chars: usize) -> Self {
        Self {
            boundary: Regex::new(r"[.!?]\s+").expect("sentence boundary pattern is valid"),
            min_chars,
        }
    }

    /// Split text into trimmed, non-empty sentence candidates.
    pub fn candidates<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut candidates = Vec::new();
        let mut start = 0;

        for boundary in self.boundary.find_iter(text) {
            // terminal marks are single-byte
            let end = boundary.start() + 1;
            candidates.push(text[start..end].trim());
            start = boundary.end();
        }
        candidates.push(text[start..].trim());

        candidates.retain(|c| !c.is_empty());
        candidates
    }

    /// Check whether a candidate survives the filter.
    pub fn keeps(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        candidate.chars().count() > self.min_chars
            && !candidate.chars().all(|c| c.is_numeric())
    }

    /// Split and filter, preserving order and duplicates.
    pub fn segment(&self, text: &str) -> Vec<String> {
        self.candidates(text)
            .into_iter()
            .filter(|c| self.keeps(c))
            .map(str::to_string)
            .collect()
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(super::MIN_SENTENCE_CHARS)
    }
}
