//! Block source format detection.

use crate::error::Result;
use encoding_rs::{Encoding, UTF_8};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Formats a block source can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Block JSON (`{ "pages": [ { "blocks": [...] } ] }`)
    Json,
    /// Plain text: pages split by form feed, blocks by blank lines
    Text,
    /// Raw PDF bytes, which need an external block extractor first
    Pdf,
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Json => write!(f, "block JSON"),
            SourceFormat::Text => write!(f, "plain text"),
            SourceFormat::Pdf => write!(f, "PDF"),
        }
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Bytes inspected when sniffing a file.
const SNIFF_LEN: usize = 1024;

/// Detect the source format of a file.
///
/// A `.json` or `.txt` extension decides directly; anything else is
/// sniffed from the first bytes of the file.
///
/// # Example
/// ```no_run
/// use pdfsentences::detect::{detect_format_from_path, SourceFormat};
///
/// let format = detect_format_from_path("blocks.json").unwrap();
/// assert_eq!(format, SourceFormat::Json);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<SourceFormat> {
    let path = path.as_ref();
    let file = File::open(path)?;

    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("json") => return Ok(SourceFormat::Json),
        Some("txt") | Some("text") => return Ok(SourceFormat::Text),
        Some("pdf") => return Ok(SourceFormat::Pdf),
        _ => {}
    }

    let mut header = Vec::with_capacity(SNIFF_LEN);
    BufReader::new(file)
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut header)?;
    Ok(detect_format_from_bytes(&header))
}

/// Detect the source format from the leading bytes of a document.
///
/// The bytes are decoded the way the sources decode them (BOM first,
/// UTF-8 otherwise) before looking for the opening `{` of block JSON.
pub fn detect_format_from_bytes(data: &[u8]) -> SourceFormat {
    if data.starts_with(PDF_MAGIC) {
        return SourceFormat::Pdf;
    }

    let (encoding, bom_len) = Encoding::for_bom(data).unwrap_or((UTF_8, 0));
    // the sniffed prefix may end mid-character, so decode leniently
    let (text, _) = encoding.decode_without_bom_handling(&data[bom_len..]);
    if text.trim_start().starts_with('{') {
        SourceFormat::Json
    } else {
        SourceFormat::Text
    }
}
