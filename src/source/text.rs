//! Plain text source.
//!
//! Reads the layout most PDF-to-text tools produce: a form feed (`\x0c`)
//! between pages and a blank line between blocks. Line breaks inside a
//! block are kept, so structural repair can still see them.

use std::borrow::Cow;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

use super::BlockSource;
use crate::error::{Error, Result};
use crate::model::{Document, Page};

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[^\S\n]*\n)+").expect("blank line pattern is valid"));

/// Decode document bytes: UTF-8 or UTF-16 by BOM, UTF-8 without one.
///
/// Decoding is strict: malformed sequences fail with
/// [`Error::MalformedInput`] instead of becoming replacement characters.
pub fn decode_text(bytes: &[u8]) -> Result<String> {
    let (encoding, bom_len) = Encoding::for_bom(bytes).unwrap_or((UTF_8, 0));
    encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
        .map(Cow::into_owned)
        .ok_or_else(|| Error::MalformedInput(format!("invalid {} data", encoding.name())))
}

/// Reads plain text split into pages and blocks.
#[derive(Debug, Clone)]
pub struct TextBlockSource {
    name: String,
    data: Vec<u8>,
}

impl TextBlockSource {
    /// Create a source over in-memory text bytes.
    pub fn from_bytes(data: Vec<u8>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

impl BlockSource for TextBlockSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_document(&self) -> Result<Document> {
        let text = decode_text(&self.data)?.replace("\r\n", "\n");

        let mut raw_pages: Vec<&str> = text.split('\x0c').collect();
        // tools terminate the last page with a form feed too
        if raw_pages.len() > 1 && raw_pages.last().is_some_and(|p| p.trim().is_empty()) {
            raw_pages.pop();
        }

        let mut doc = Document::new().with_source(self.name.clone());
        for (index, raw) in raw_pages.into_iter().enumerate() {
            let mut page = Page::new(index as u32 + 1);
            for block in BLANK_LINES.split(raw) {
                let block = block.trim_matches('\n');
                if !block.trim().is_empty() {
                    page.add_text(block);
                }
            }
            doc.add_page(page);
        }

        log::debug!(
            "{}: {} pages, {} text blocks",
            self.name,
            doc.page_count(),
            doc.text_block_count()
        );
        Ok(doc)
    }
}
