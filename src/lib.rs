//! # pdfsentences
//!
//! Sentence extraction from page-structured PDF text.
//!
//! An external document engine delivers pages of text blocks already in
//! reading order. This library turns them into a clean, ordered list of
//! sentences for search indexing, NLP and QA.
//!
//! ## Quick Start
//!
//! ```
//! use pdfsentences::{extract, Page};
//!
//! let mut first = Page::new(1);
//! first.add_text("Meeting Minutes");
//! let mut second = Page::new(2);
//! second.add_text("Finn and Tyge were present.");
//!
//! let sentences = extract(&[first, second]);
//! assert_eq!(sentences, vec!["Meeting Minutes.", "Finn and Tyge were present."]);
//! ```
//!
//! ## Pipeline
//!
//! - **Header boundaries**: short capitalized blocks get a closing period
//! - **Structural repair**: `config-\nured` → `configured`, broken URLs rejoined
//! - **Normalization**: NFKC, whitespace collapse, no space before `.!?`
//! - **Segmentation**: split at `.!?` + whitespace, drop fragments of 10
//!   characters or fewer and digit-only fragments
//! - **Batch processing**: rayon worker pool for many documents

pub mod batch;
pub mod detect;
pub mod error;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod selftest;
pub mod source;

// Re-export commonly used types
pub use batch::{BatchExtractor, BatchItem, BatchOptions};
pub use detect::{detect_format_from_bytes, detect_format_from_path, SourceFormat};
pub use error::{Error, Result};
pub use metrics::{Metrics, MetricsSnapshot};
pub use model::{Block, BlockKind, Document, Page};
pub use pipeline::{
    ExtractOptions, Extraction, ExtractionStats, PageSelection, SentencePipeline,
    HEADER_MAX_CHARS, MIN_SENTENCE_CHARS,
};
pub use source::{BlockSource, JsonBlockSource, TextBlockSource};

use std::path::Path;
use std::sync::LazyLock;

static DEFAULT_PIPELINE: LazyLock<SentencePipeline> = LazyLock::new(SentencePipeline::default);

/// Extract sentences from pages with default options.
///
/// Never fails: an empty page list yields an empty vector.
pub fn extract(pages: &[Page]) -> Vec<String> {
    DEFAULT_PIPELINE.extract(pages)
}

/// Extract sentences from pages with custom options.
///
/// # Example
///
/// ```
/// use pdfsentences::{extract_with_options, ExtractOptions, Page};
///
/// let mut page = Page::new(1);
/// page.add_text("Poul was missing. Yes.");
///
/// let options = ExtractOptions::new().with_min_sentence_chars(3);
/// let sentences = extract_with_options(&[page], &options);
/// assert_eq!(sentences, vec!["Poul was missing.", "Yes."]);
/// ```
pub fn extract_with_options(pages: &[Page], options: &ExtractOptions) -> Vec<String> {
    SentencePipeline::new(options.clone()).extract(pages)
}

/// Extract sentences and statistics from a document.
pub fn extract_document(doc: &Document) -> Extraction {
    DEFAULT_PIPELINE.extract_document(doc)
}

/// Read a block file (block JSON or plain text) and extract its sentences.
///
/// # Example
///
/// ```no_run
/// let extraction = pdfsentences::extract_file("paper.json").unwrap();
/// println!("{}", serde_json::to_string(&extraction).unwrap());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Extraction> {
    let doc = source::open(path)?.read_document()?;
    Ok(DEFAULT_PIPELINE.extract_document(&doc))
}

/// Extract sentences off the async runtime's request threads.
///
/// The pipeline is CPU-bound, so it runs on tokio's blocking pool.
#[cfg(feature = "async")]
pub async fn extract_async(doc: Document, options: ExtractOptions) -> Result<Extraction> {
    tokio::task::spawn_blocking(move || SentencePipeline::new(options).extract_document(&doc))
        .await
        .map_err(|e| Error::Other(format!("Extraction task failed: {}", e)))
}

/// Builder for configuring and running extraction.
///
/// # Example
///
/// ```no_run
/// use pdfsentences::Extractor;
///
/// let extraction = Extractor::new()
///     .min_chars(15)
///     .pages("1-3")?
///     .extract_file("paper.json")?;
/// # Ok::<(), pdfsentences::Error>(())
/// ```
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    /// Create a new extractor builder.
    pub fn new() -> Self {
        Self {
            options: ExtractOptions::default(),
        }
    }

    /// Create an extractor from prepared options.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Set the minimum sentence length.
    pub fn min_chars(mut self, chars: usize) -> Self {
        self.options = self.options.with_min_sentence_chars(chars);
        self
    }

    /// Set the header length threshold.
    pub fn header_max_chars(mut self, chars: usize) -> Self {
        self.options = self.options.with_header_max_chars(chars);
        self
    }

    /// Disable header boundary insertion.
    pub fn without_header_boundaries(mut self) -> Self {
        self.options = self.options.with_header_boundaries(false);
        self
    }

    /// Disable both structural repairs.
    pub fn without_repairs(mut self) -> Self {
        self.options = self
            .options
            .with_hyphenation_repair(false)
            .with_url_repair(false);
        self
    }

    /// Restrict extraction to a page selection string (e.g., "1-3,7").
    pub fn pages(mut self, selection: &str) -> Result<Self> {
        self.options = self.options.with_pages(PageSelection::parse(selection)?);
        Ok(self)
    }

    /// Get the configured options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Build the pipeline.
    pub fn build(self) -> SentencePipeline {
        SentencePipeline::new(self.options)
    }

    /// Extract from pages.
    pub fn extract(self, pages: &[Page]) -> Vec<String> {
        self.build().extract(pages)
    }

    /// Read a block source and extract from it.
    pub fn extract_source(self, source: &dyn BlockSource) -> Result<Extraction> {
        let doc = source.read_document()?;
        Ok(self.build().extract_document(&doc))
    }

    /// Read a block file and extract from it.
    pub fn extract_file<P: AsRef<Path>>(self, path: P) -> Result<Extraction> {
        let source = source::open(path)?;
        self.extract_source(source.as_ref())
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}
