//! Block sources: where pages of reading-ordered blocks come from.
//!
//! Layout analysis is not done here. A block source is expected to hand
//! over every page's blocks in left-to-right, top-to-bottom reading order,
//! multi-column layouts already resolved; the sentence pipeline trusts that
//! order and never re-sorts.
//!
//! # Example
//!
//! ```no_run
//! use pdfsentences::source::{self, BlockSource};
//!
//! fn main() -> pdfsentences::Result<()> {
//!     let source = source::open("paper.json")?;
//!     let doc = source.read_document()?;
//!     println!("{} pages", doc.page_count());
//!     Ok(())
//! }
//! ```

mod json;
mod text;

pub use json::JsonBlockSource;
pub use text::{decode_text, TextBlockSource};

use std::path::Path;

use crate::detect::{detect_format_from_bytes, detect_format_from_path, SourceFormat};
use crate::error::{Error, Result};
use crate::model::Document;

/// Supplier of reading-ordered pages.
///
/// Implementations fail with [`Error::SourceUnreadable`] when the document
/// cannot be read at all and with [`Error::MalformedInput`] when its bytes
/// cannot be decoded. Blocks with unknown kind tags are not an error; they
/// come back as non-text.
pub trait BlockSource: Send + Sync {
    /// Name of the source, used in logs and reports.
    fn name(&self) -> &str;

    /// Read every page, blocks in reading order.
    fn read_document(&self) -> Result<Document>;
}

impl BlockSource for Document {
    fn name(&self) -> &str {
        self.source.as_deref().unwrap_or("<memory>")
    }

    fn read_document(&self) -> Result<Document> {
        Ok(self.clone())
    }
}

/// Open a block source for a file, picking the reader from its format.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Box<dyn BlockSource>> {
    let path = path.as_ref();
    let name = path.display().to_string();
    let format = detect_format_from_path(path)?;
    let data = std::fs::read(path)?;
    select(format, data, name)
}

/// Create a block source for in-memory bytes, sniffing the format.
pub fn from_bytes(data: Vec<u8>, name: impl Into<String>) -> Result<Box<dyn BlockSource>> {
    let format = detect_format_from_bytes(&data);
    select(format, data, name.into())
}

fn select(format: SourceFormat, data: Vec<u8>, name: String) -> Result<Box<dyn BlockSource>> {
    log::debug!("{}: reading as {}", name, format);
    match format {
        SourceFormat::Json => Ok(Box::new(JsonBlockSource::from_bytes(data, name))),
        SourceFormat::Text => Ok(Box::new(TextBlockSource::from_bytes(data, name))),
        SourceFormat::Pdf => Err(Error::SourceUnreadable(format!(
            "{} is a raw PDF; extract its text blocks first (block JSON or plain text)",
            name
        ))),
    }
}
