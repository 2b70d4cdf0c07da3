//! Document-level types.

use super::Page;
use serde::{Deserialize, Serialize};

/// A document as delivered by a block source: pages in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Where the blocks came from (file name, upload name, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Pages in the document
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from pages.
    pub fn from_pages(pages: Vec<Page>) -> Self {
        Self {
            source: None,
            pages,
        }
    }

    /// Set the source name.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Count text blocks across all pages.
    pub fn text_block_count(&self) -> usize {
        self.pages.iter().map(|p| p.text_blocks().count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_pages() {
        let mut doc = Document::new().with_source("minutes.json");
        let mut page = Page::new(1);
        page.add_text("Meeting Minutes");
        doc.add_page(page);
        doc.add_page(Page::new(2));

        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.text_block_count(), 1);
        assert_eq!(doc.pages[1].number, 2);
        assert_eq!(doc.source.as_deref(), Some("minutes.json"));
    }

    #[test]
    fn test_document_json_schema() {
        let json = r#"{
            "pages": [
                {"number": 1, "blocks": [{"kind": "text", "content": "Hello"}]},
                {"blocks": []}
            ]
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.page_count(), 2);
        assert!(doc.source.is_none());
        assert_eq!(doc.text_block_count(), 1);
        assert!(doc.pages[1].is_empty());
    }
}
