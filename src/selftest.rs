//! Self-test against a fixed set of sample documents.
//!
//! Each case names a document file and sentences that must appear in the
//! extraction. The check is membership, not exact match: other sentences
//! may be returned too.

use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::metrics::duration_ms;
use crate::pipeline::SentencePipeline;
use crate::source;

/// One sample document and the sentences it must yield.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfTestCase {
    /// Document file name, relative to the dataset directory
    pub filename: String,

    /// Sentences expected somewhere in the output
    pub sentences: Vec<String>,
}

impl SelfTestCase {
    /// Create a case.
    pub fn new(filename: impl Into<String>, sentences: &[&str]) -> Self {
        Self {
            filename: filename.into(),
            sentences: sentences.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The built-in dataset: block JSON renditions of the sample PDFs.
pub fn default_dataset() -> Vec<SelfTestCase> {
    vec![
        SelfTestCase::new(
            "studyboard.json",
            &[
                "Finn and Tyge were present.",
                "Poul was missing.",
                "We discussed the issue of calculators.",
            ],
        ),
        SelfTestCase::new(
            "2303.15133.json",
            &[
                "Other endpoints than the configured default can be queried.",
                "I call the tool Synia with the canonical homepage set up at https://synia.toolforge.org/.",
                "Scholia is a Web application running from the Wikimedia Foundation Toolforge server at http://scholia.toolforge.org.",
            ],
        ),
    ]
}

/// Outcome for one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelfTestResult {
    /// Document file name
    pub filename: String,
    /// All expected sentences were found
    pub ok: bool,
    /// Why the case failed
    pub error: Option<String>,
    /// Expected sentences absent from the output
    pub missing_sentences: Vec<String>,
    /// Time to read and extract the document
    pub latency_ms: Option<f64>,
    /// Number of sentences the pipeline returned
    pub num_returned_sentences: Option<usize>,
}

/// Outcome for a whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelfTestReport {
    /// Cases that passed
    pub passed: usize,
    /// Cases run
    pub total: usize,
    /// Per-case results, in dataset order
    pub results: Vec<SelfTestResult>,
}

impl SelfTestReport {
    /// Check if every case passed.
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

/// Run `cases` with documents looked up in `dir`.
pub fn run_selftest(
    dir: &Path,
    cases: &[SelfTestCase],
    pipeline: &SentencePipeline,
) -> SelfTestReport {
    let results: Vec<SelfTestResult> = cases
        .iter()
        .map(|case| run_case(dir, case, pipeline))
        .collect();
    let passed = results.iter().filter(|r| r.ok).count();

    log::info!("Self-test: {}/{} passed", passed, results.len());

    SelfTestReport {
        passed,
        total: results.len(),
        results,
    }
}

/// Run the built-in dataset with the default pipeline.
pub fn run_default(dir: &Path) -> SelfTestReport {
    run_selftest(dir, &default_dataset(), &SentencePipeline::default())
}

fn run_case(dir: &Path, case: &SelfTestCase, pipeline: &SentencePipeline) -> SelfTestResult {
    let path = dir.join(&case.filename);
    let failed = |error: String| SelfTestResult {
        filename: case.filename.clone(),
        ok: false,
        error: Some(error),
        missing_sentences: case.sentences.clone(),
        latency_ms: None,
        num_returned_sentences: None,
    };

    if !path.exists() {
        return failed(format!("Sample document not found in {}", dir.display()));
    }

    let started = Instant::now();
    let doc = match source::open(&path).and_then(|s| s.read_document()) {
        Ok(doc) => doc,
        Err(e) => return failed(e.to_string()),
    };
    let sentences = pipeline.extract(&doc.pages);
    let latency_ms = duration_ms(started.elapsed());

    let returned: HashSet<&str> = sentences.iter().map(String::as_str).collect();
    let missing: Vec<String> = case
        .sentences
        .iter()
        .filter(|s| !returned.contains(s.as_str()))
        .cloned()
        .collect();
    let ok = missing.is_empty();

    if !ok {
        log::warn!("{}: {} expected sentences missing", case.filename, missing.len());
    }

    SelfTestResult {
        filename: case.filename.clone(),
        ok,
        error: (!ok).then(|| "Some expected sentences were not found in the output.".to_string()),
        missing_sentences: missing,
        latency_ms: Some(latency_ms),
        num_returned_sentences: Some(sentences.len()),
    }
}
