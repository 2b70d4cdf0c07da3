//! Extraction options and configuration.

use crate::error::{Error, Result};
use std::ops::RangeInclusive;

/// Blocks at or above this many characters are never treated as headers.
pub const HEADER_MAX_CHARS: usize = 100;

/// Sentence candidates at or below this many characters are discarded.
pub const MIN_SENTENCE_CHARS: usize = 10;

/// Options for the sentence pipeline.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Header-like blocks must be shorter than this (in characters)
    pub header_max_chars: usize,

    /// Sentences must be longer than this (in characters)
    pub min_sentence_chars: usize,

    /// Terminate short capitalized blocks with a period
    pub insert_header_boundaries: bool,

    /// Join words hyphenated across a line break
    pub repair_hyphenation: bool,

    /// Rejoin URLs broken after a dot at a line break
    pub repair_urls: bool,

    /// Pages to assemble
    pub page_selection: PageSelection,
}

impl ExtractOptions {
    /// Create new extraction options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header length threshold.
    pub fn with_header_max_chars(mut self, chars: usize) -> Self {
        self.header_max_chars = chars;
        self
    }

    /// Set the minimum sentence length threshold.
    pub fn with_min_sentence_chars(mut self, chars: usize) -> Self {
        self.min_sentence_chars = chars;
        self
    }

    /// Enable or disable header boundary insertion.
    pub fn with_header_boundaries(mut self, enabled: bool) -> Self {
        self.insert_header_boundaries = enabled;
        self
    }

    /// Enable or disable hyphenation repair.
    pub fn with_hyphenation_repair(mut self, enabled: bool) -> Self {
        self.repair_hyphenation = enabled;
        self
    }

    /// Enable or disable broken URL repair.
    pub fn with_url_repair(mut self, enabled: bool) -> Self {
        self.repair_urls = enabled;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.page_selection = selection;
        self
    }

    /// Set specific page range.
    pub fn with_page_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.page_selection = PageSelection::Range(range);
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            header_max_chars: HEADER_MAX_CHARS,
            min_sentence_chars: MIN_SENTENCE_CHARS,
            insert_header_boundaries: true,
            repair_hyphenation: true,
            repair_urls: true,
            page_selection: PageSelection::All,
        }
    }
}

/// Page selection for extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Use all pages
    #[default]
    All,
    /// Use a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Use a list of pages and ranges (1-indexed, a single page is `n..=n`)
    Pages(Vec<RangeInclusive<u32>>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(ranges) => ranges.iter().any(|r| r.contains(&page)),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        if !s.contains(',') {
            if let Some((start, end)) = s.split_once('-') {
                let (start, end) = parse_bounds(s, start, end)?;
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut ranges = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let (start, end) = parse_bounds(part, start, end)?;
                ranges.push(start..=end);
            } else {
                let page = parse_page(part)?;
                ranges.push(page..=page);
            }
        }

        ranges.sort_unstable_by_key(|r| (*r.start(), *r.end()));
        ranges.dedup();
        Ok(PageSelection::Pages(ranges))
    }
}

fn parse_page(s: &str) -> Result<u32> {
    match s.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(Error::InvalidPageRange(format!(
            "'{}' is not a page number",
            s.trim()
        ))),
        Ok(page) => Ok(page),
    }
}

fn parse_bounds(part: &str, start: &str, end: &str) -> Result<(u32, u32)> {
    let start = parse_page(start)?;
    let end = parse_page(end)?;
    if start > end {
        return Err(Error::InvalidPageRange(format!(
            "'{}' ends before it starts",
            part
        )));
    }
    Ok((start, end))
}
