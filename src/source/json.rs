//! Block JSON source.
//!
//! Schema:
//!
//! ```json
//! {
//!   "source": "paper.pdf",
//!   "pages": [
//!     { "number": 1, "blocks": [ { "kind": "text", "content": "...", "order_index": 0 } ] }
//!   ]
//! }
//! ```
//!
//! `source`, `number` and `order_index` are optional. Missing page numbers
//! are filled from page position.

use super::{decode_text, BlockSource};
use crate::error::{Error, Result};
use crate::model::Document;

/// Reads documents serialized as block JSON.
#[derive(Debug, Clone)]
pub struct JsonBlockSource {
    name: String,
    data: Vec<u8>,
}

impl JsonBlockSource {
    /// Create a source over in-memory JSON bytes.
    pub fn from_bytes(data: Vec<u8>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

impl BlockSource for JsonBlockSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_document(&self) -> Result<Document> {
        let text = decode_text(&self.data)?;
        let mut doc: Document = serde_json::from_str(&text).map_err(|e| {
            Error::SourceUnreadable(format!("{}: invalid block JSON: {}", self.name, e))
        })?;

        for (index, page) in doc.pages.iter_mut().enumerate() {
            if page.number == 0 {
                page.number = index as u32 + 1;
            }
        }
        if doc.source.is_none() {
            doc.source = Some(self.name.clone());
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockKind;

    #[test]
    fn test_read_json_document() {
        let json = r#"{
            "source": "studyboard.pdf",
            "pages": [
                {"blocks": [
                    {"kind": "text", "content": "Meeting Minutes", "order_index": 0},
                    {"kind": "image", "content": "", "order_index": 1}
                ]},
                {"number": 7, "blocks": [{"kind": "text", "content": "Poul was missing."}]}
            ]
        }"#;
        let source = JsonBlockSource::from_bytes(json.as_bytes().to_vec(), "blocks.json");
        let doc = source.read_document().unwrap();

        assert_eq!(doc.source.as_deref(), Some("studyboard.pdf"));
        assert_eq!(doc.pages[0].number, 1);
        assert_eq!(doc.pages[1].number, 7);
        assert_eq!(doc.pages[0].blocks[1].kind, BlockKind::NonText);
    }

    #[test]
    fn test_source_name_fills_missing_source() {
        let source = JsonBlockSource::from_bytes(b"{\"pages\": []}".to_vec(), "empty.json");
        let doc = source.read_document().unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.source.as_deref(), Some("empty.json"));
    }

    #[test]
    fn test_unknown_kind_does_not_fail() {
        let json = r#"{"pages": [{"blocks": [{"kind": "marginalia", "content": "x"}]}]}"#;
        let doc = JsonBlockSource::from_bytes(json.as_bytes().to_vec(), "m.json")
            .read_document()
            .unwrap();
        assert_eq!(doc.text_block_count(), 0);
    }

    #[test]
    fn test_invalid_json_is_source_unreadable() {
        let source = JsonBlockSource::from_bytes(b"{\"pages\": [".to_vec(), "broken.json");
        assert!(matches!(
            source.read_document(),
            Err(Error::SourceUnreadable(_))
        ));
    }

    #[test]
    fn test_undecodable_bytes_are_malformed() {
        let source = JsonBlockSource::from_bytes(vec![b'{', 0xFF, 0xFE, 0xFD, b'}'], "bad.json");
        assert!(matches!(source.read_document(), Err(Error::MalformedInput(_))));
    }
}
