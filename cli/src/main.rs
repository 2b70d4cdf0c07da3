//! pdfsentences CLI - sentence extraction from PDF text blocks

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfsentences::batch::{BatchExtractor, BatchOptions};
use pdfsentences::selftest;
use pdfsentences::{ExtractOptions, Extraction, Extractor, PageSelection};

#[derive(Parser)]
#[command(name = "pdfsentences")]
#[command(version)]
#[command(about = "Extract clean sentences from PDF text blocks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract sentences from a block file (block JSON or plain text)
    Extract {
        /// Input block file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        #[command(flatten)]
        tuning: Tuning,

        /// Output compact JSON
        #[arg(long, conflicts_with = "lines")]
        compact: bool,

        /// Output one sentence per line instead of JSON
        #[arg(long)]
        lines: bool,
    },

    /// Extract sentences from many block files in parallel
    Batch {
        /// Input block files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (one <stem>.json per input)
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Worker threads (default: available cores)
        #[arg(short, long, env = "PDFSENTENCES_JOBS")]
        jobs: Option<usize>,

        #[command(flatten)]
        tuning: Tuning,
    },

    /// Check the pipeline against the sample documents
    Selftest {
        /// Directory holding the sample documents
        #[arg(long, value_name = "DIR", default_value = "fixtures")]
        dir: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct Tuning {
    /// Drop sentences with this many characters or fewer
    #[arg(long, default_value_t = pdfsentences::MIN_SENTENCE_CHARS)]
    min_chars: usize,

    /// Longest block still treated as a header
    #[arg(long, default_value_t = pdfsentences::HEADER_MAX_CHARS)]
    header_max_chars: usize,

    /// Do not close header-like blocks with a period
    #[arg(long)]
    no_header_boundaries: bool,
}

impl Tuning {
    fn options(&self) -> ExtractOptions {
        ExtractOptions::new()
            .with_min_sentence_chars(self.min_chars)
            .with_header_max_chars(self.header_max_chars)
            .with_header_boundaries(!self.no_header_boundaries)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input,
            output,
            pages,
            tuning,
            compact,
            lines,
        } => cmd_extract(
            &input,
            output.as_deref(),
            pages.as_deref(),
            &tuning,
            compact,
            lines,
        ),
        Commands::Batch {
            inputs,
            output,
            jobs,
            tuning,
        } => cmd_batch(&inputs, &output, jobs, &tuning),
        Commands::Selftest { dir } => cmd_selftest(&dir),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn render(extraction: &Extraction, compact: bool, lines: bool) -> serde_json::Result<String> {
    if lines {
        Ok(extraction.sentences.join("\n"))
    } else if compact {
        serde_json::to_string(extraction)
    } else {
        serde_json::to_string_pretty(extraction)
    }
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    pages: Option<&str>,
    tuning: &Tuning,
    compact: bool,
    lines: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = tuning.options();
    if let Some(p) = pages {
        options = options.with_pages(PageSelection::parse(p)?);
    }

    log::debug!("Extracting {} with {:?}", input.display(), options);
    let extraction = Extractor::with_options(options).extract_file(input)?;

    // output carries sentences only
    let extraction = Extraction::new(extraction.sentences);
    let rendered = render(&extraction, compact, lines)?;

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!(
            "{} {} ({} sentences)",
            "Saved to".green(),
            path.display(),
            extraction.len()
        );
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    output_dir: &Path,
    jobs: Option<usize>,
    tuning: &Tuning,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output_dir)?;

    let mut options = BatchOptions::new().with_extract_options(tuning.options());
    if let Some(jobs) = jobs {
        options = options.with_jobs(jobs);
    }
    let batch = BatchExtractor::new(options)?;
    log::info!("Batch of {} files on {} workers", inputs.len(), batch.jobs());

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message(format!("{} workers", batch.jobs()));

    let items = batch.extract_files_with(inputs, |_| pb.inc(1));
    pb.finish_with_message("Done!");

    println!("\n{}", "Results:".green().bold());
    for item in &items {
        match &item.result {
            Ok(extraction) => {
                let stem = item.path.file_stem().unwrap_or_default().to_string_lossy();
                let target = output_dir.join(format!("{}.json", stem));
                let doc = Extraction::new(extraction.sentences.clone());
                fs::write(&target, serde_json::to_string_pretty(&doc)?)?;
                println!(
                    "  {} {} -> {} ({} sentences)",
                    "✓".green(),
                    item.path.display(),
                    target.display(),
                    extraction.len()
                );
            }
            Err(e) => {
                println!("  {} {}: {}", "✗".red(), item.path.display(), e);
            }
        }
    }

    let snapshot = batch.metrics().snapshot();
    println!();
    println!("{}", "Metrics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Total".bold(), snapshot.total_requests);
    println!("{}: {}", "Succeeded".bold(), snapshot.success_requests);
    println!("{}: {}", "Failed".bold(), snapshot.failed_requests);
    if let Some(avg) = snapshot.avg_latency_ms {
        println!("{}: {:.2} ms", "Average latency".bold(), avg);
    }
    if let Some(ref error) = snapshot.last_error {
        println!("{}: {}", "Last error".bold(), error);
    }

    if snapshot.failed_requests > 0 {
        return Err(format!("{} of {} files failed", snapshot.failed_requests, inputs.len()).into());
    }

    Ok(())
}

fn cmd_selftest(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let report = selftest::run_default(dir);

    println!("{}", "Self-test".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for result in &report.results {
        if result.ok {
            let latency = result.latency_ms.unwrap_or_default();
            println!(
                "  {} {} ({} sentences, {:.2} ms)",
                "✓".green(),
                result.filename,
                result.num_returned_sentences.unwrap_or_default(),
                latency
            );
        } else {
            println!(
                "  {} {}: {}",
                "✗".red(),
                result.filename,
                result.error.as_deref().unwrap_or("failed")
            );
            for sentence in &result.missing_sentences {
                println!("      {} {}", "missing:".yellow(), sentence);
            }
        }
    }

    println!("\n{}/{} passed", report.passed, report.total);

    if !report.all_passed() {
        return Err("self-test failed".into());
    }

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "pdfsentences".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Sentence extraction from PDF text blocks");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extraction() -> Extraction {
        Extraction::new(vec![
            "Finn and Tyge were present.".to_string(),
            "Poul was missing.".to_string(),
        ])
    }

    #[test]
    fn test_render_lines() {
        assert_eq!(
            render(&extraction(), false, true).unwrap(),
            "Finn and Tyge were present.\nPoul was missing."
        );
    }

    #[test]
    fn test_render_compact_json() {
        assert_eq!(
            render(&extraction(), true, false).unwrap(),
            r#"{"sentences":["Finn and Tyge were present.","Poul was missing."]}"#
        );
    }

    #[test]
    fn test_tuning_options() {
        let tuning = Tuning {
            min_chars: 4,
            header_max_chars: 40,
            no_header_boundaries: true,
        };
        let options = tuning.options();
        assert_eq!(options.min_sentence_chars, 4);
        assert_eq!(options.header_max_chars, 40);
        assert!(!options.insert_header_boundaries);
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["pdfsentences", "extract", "paper.json", "--pages", "1-3"])
            .unwrap();
        match cli.command {
            Commands::Extract { pages, tuning, .. } => {
                assert_eq!(pages.as_deref(), Some("1-3"));
                assert_eq!(tuning.min_chars, pdfsentences::MIN_SENTENCE_CHARS);
            }
            _ => panic!("expected extract command"),
        }
    }
}
