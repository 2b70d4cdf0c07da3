//! Extraction result and statistics.

use serde::{Deserialize, Serialize};

/// Sentences extracted from one document, in reading order.
///
/// Serializes to `{ "sentences": [...] }`; statistics are only written when
/// collected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Sentences in document reading order, duplicates included
    pub sentences: Vec<String>,

    /// Pipeline statistics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<ExtractionStats>,
}

impl Extraction {
    /// Create a result from sentences.
    pub fn new(sentences: Vec<String>) -> Self {
        Self {
            sentences,
            stats: None,
        }
    }

    /// Attach statistics.
    pub fn with_stats(mut self, stats: ExtractionStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Number of sentences.
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Check if no sentences were found.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Check whether an exact sentence is present.
    pub fn contains(&self, sentence: &str) -> bool {
        self.sentences.iter().any(|s| s == sentence)
    }
}

/// Counters collected while a document runs through the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Pages assembled (after page selection)
    pub page_count: u32,

    /// Text blocks assembled
    pub text_block_count: u32,

    /// Non-text blocks skipped
    pub skipped_block_count: u32,

    /// Blocks closed with a period by header boundary insertion
    pub header_boundary_count: u32,

    /// Sentence candidates before filtering
    pub candidate_count: u32,

    /// Sentences kept after filtering
    pub sentence_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidates removed by the length/digit filter.
    pub fn discarded_count(&self) -> u32 {
        self.candidate_count.saturating_sub(self.sentence_count)
    }
}
