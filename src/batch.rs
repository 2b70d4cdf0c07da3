//! Parallel extraction over many documents.
//!
//! Documents are dispatched onto a bounded rayon pool, sized to the
//! available cores unless a job count is given. Every document runs
//! end-to-end on one worker, so sentence order within a document never
//! depends on the pool size, and results come back in input order.
//!
//! # Example
//!
//! ```no_run
//! use pdfsentences::batch::{BatchExtractor, BatchOptions};
//!
//! fn main() -> pdfsentences::Result<()> {
//!     let batch = BatchExtractor::new(BatchOptions::new().with_jobs(4))?;
//!     for item in batch.extract_files(&["a.json", "b.txt"]) {
//!         match item.result {
//!             Ok(extraction) => println!("{}: {}", item.path.display(), extraction.len()),
//!             Err(e) => eprintln!("{}: {}", item.path.display(), e),
//!         }
//!     }
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{Error, Result};
use crate::metrics::Metrics;
use crate::model::Document;
use crate::pipeline::{ExtractOptions, Extraction, SentencePipeline};
use crate::source::{self, BlockSource};

/// Options for batch extraction.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Worker threads (`None` = available cores)
    pub jobs: Option<usize>,

    /// Pipeline options applied to every document
    pub extract: ExtractOptions,
}

impl BatchOptions {
    /// Create batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of worker threads.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }

    /// Set the pipeline options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract = options;
        self
    }
}

/// Outcome for one file of a batch.
#[derive(Debug)]
pub struct BatchItem {
    /// Input path
    pub path: PathBuf,

    /// Sentences, or why the file could not be read
    pub result: Result<Extraction>,

    /// Wall time spent on this file
    pub latency: Duration,
}

impl BatchItem {
    /// Check if the file produced sentences.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs the sentence pipeline over many documents on a worker pool.
pub struct BatchExtractor {
    pool: ThreadPool,
    pipeline: SentencePipeline,
    metrics: Arc<Metrics>,
}

impl BatchExtractor {
    /// Build the worker pool.
    pub fn new(options: BatchOptions) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(options.jobs.unwrap_or(0))
            .thread_name(|i| format!("pdfsentences-worker-{}", i))
            .build()
            .map_err(|e| Error::Other(format!("Failed to build worker pool: {}", e)))?;

        log::debug!("Batch pool ready with {} workers", pool.current_num_threads());

        Ok(Self {
            pool,
            pipeline: SentencePipeline::new(options.extract),
            metrics: Arc::new(Metrics::new()),
        })
    }

    /// Share an existing metrics instance.
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Number of worker threads.
    pub fn jobs(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Metrics updated by this extractor.
    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Read a block source and extract its sentences on the pool.
    pub fn extract_source(&self, source: &dyn BlockSource) -> Result<Extraction> {
        self.pool.install(|| {
            let started = Instant::now();
            let result = self.run_source(source);
            self.record(&result, started.elapsed());
            result
        })
    }

    /// Extract in-memory documents, results in input order.
    pub fn extract_documents(&self, docs: &[Document]) -> Vec<Extraction> {
        self.pool.install(|| {
            docs.par_iter()
                .map(|doc| {
                    let started = Instant::now();
                    let extraction = self.pipeline.extract_document(doc);
                    self.metrics.record_success(started.elapsed());
                    extraction
                })
                .collect()
        })
    }

    /// Extract files, results in input order.
    pub fn extract_files<P>(&self, paths: &[P]) -> Vec<BatchItem>
    where
        P: AsRef<Path> + Sync,
    {
        self.extract_files_with(paths, |_| {})
    }

    /// Extract files, calling `on_item` as each one finishes.
    ///
    /// `on_item` runs on worker threads in completion order; the returned
    /// vector is still in input order.
    pub fn extract_files_with<P, F>(&self, paths: &[P], on_item: F) -> Vec<BatchItem>
    where
        P: AsRef<Path> + Sync,
        F: Fn(&BatchItem) + Sync,
    {
        self.pool.install(|| {
            paths
                .par_iter()
                .map(|path| {
                    let item = self.run_file(path.as_ref());
                    on_item(&item);
                    item
                })
                .collect()
        })
    }

    fn run_file(&self, path: &Path) -> BatchItem {
        let started = Instant::now();
        let result = source::open(path).and_then(|source| self.run_source(source.as_ref()));
        let latency = started.elapsed();

        if let Err(ref e) = result {
            log::warn!("{}: {}", path.display(), e);
        }
        self.record(&result, latency);

        BatchItem {
            path: path.to_path_buf(),
            result,
            latency,
        }
    }

    fn run_source(&self, source: &dyn BlockSource) -> Result<Extraction> {
        let doc = source.read_document()?;
        Ok(self.pipeline.extract_document(&doc))
    }

    fn record(&self, result: &Result<Extraction>, latency: Duration) {
        match result {
            Ok(_) => self.metrics.record_success(latency),
            Err(e) => self.metrics.record_failure(Some(latency), e.to_string()),
        }
    }
}
