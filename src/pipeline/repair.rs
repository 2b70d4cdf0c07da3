//! Structural repair of line-wrapping artifacts.
//!
//! Runs on the joined document text while block and line breaks are still
//! present. Both repairs are single-pass substitutions and never reach
//! across more than one line break: the optional whitespace around the
//! break excludes `\n`.

use regex::Regex;
use std::borrow::Cow;

/// `word-` + break + `word`, e.g. `config-\nured`.
const HYPHEN_BREAK: &str = r"(\w)-[^\S\n]*\n[^\S\n]*(\w)";

/// URL ending in `.` + break + lowercase letter or digit, e.g. `scholia.\ntoolforge`.
const URL_BREAK: &str = r"(https?://\S+)\.[^\S\n]*\n[^\S\n]*([a-z0-9])";

/// Repairs hyphenated words and URLs split by line wrapping.
#[derive(Debug, Clone)]
pub struct StructuralRepair {
    hyphen_break: Regex,
    url_break: Regex,
    fix_hyphenation: bool,
    fix_urls: bool,
}

impl StructuralRepair {
    /// Create a repairer with both repairs enabled.
    pub fn new() -> Self {
        Self::with_repairs(true, true)
    }

    /// Create a repairer with selected repairs.
    pub fn with_repairs(fix_hyphenation: bool, fix_urls: bool) -> Self {
        Self {
            hyphen_break: Regex::new(HYPHEN_BREAK).expect("hyphen break pattern is valid"),
            url_break: Regex::new(URL_BREAK).expect("URL break pattern is valid"),
            fix_hyphenation,
            fix_urls,
        }
    }

    /// Apply the enabled repairs: hyphenation first, then URLs.
    pub fn repair(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.fix_hyphenation {
            result = self.repair_hyphenation(&result).into_owned();
        }

        if self.fix_urls {
            result = self.repair_urls(&result).into_owned();
        }

        result
    }

    /// Join word fragments split by a hyphen at a line break.
    ///
    /// Genuine compounds wrapped at their hyphen are joined as well.
    pub fn repair_hyphenation<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.hyphen_break.replace_all(text, "${1}${2}")
    }

    /// Rejoin a URL broken after a dot, keeping the dot.
    pub fn repair_urls<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.url_break.replace_all(text, "${1}.${2}")
    }
}

impl Default for StructuralRepair {
    fn default() -> Self {
        Self::new()
    }
}
