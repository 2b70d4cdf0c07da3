//! Block-level types.

use serde::{Deserialize, Serialize};

/// Type tag of a block as delivered by the block source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum BlockKind {
    /// Running text
    #[default]
    Text,
    /// Images, figures and anything else without extractable prose
    NonText,
}

impl BlockKind {
    /// Parse a block tag.
    ///
    /// Unknown tags are treated as [`BlockKind::NonText`] so that a single
    /// odd block never fails the whole document.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "text" => BlockKind::Text,
            "non_text" | "nontext" | "non-text" | "image" | "figure" => BlockKind::NonText,
            other => {
                log::debug!("Unknown block kind {:?}, treating as non-text", other);
                BlockKind::NonText
            }
        }
    }

    /// Tag string used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::NonText => "non_text",
        }
    }
}

impl From<String> for BlockKind {
    fn from(tag: String) -> Self {
        BlockKind::parse(&tag)
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The smallest text unit delivered by a block source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Text or non-text tag
    #[serde(default)]
    pub kind: BlockKind,

    /// Raw block content, possibly spanning several lines
    #[serde(default)]
    pub content: String,

    /// Position of the block in the page's reading order (informational;
    /// the pipeline follows sequence order and never re-sorts)
    #[serde(default)]
    pub order_index: u32,
}

impl Block {
    /// Create a block.
    pub fn new(kind: BlockKind, content: impl Into<String>, order_index: u32) -> Self {
        Self {
            kind,
            content: content.into(),
            order_index,
        }
    }

    /// Create a text block.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(BlockKind::Text, content, 0)
    }

    /// Create a non-text block (image, figure, ...).
    pub fn non_text(content: impl Into<String>) -> Self {
        Self::new(BlockKind::NonText, content, 0)
    }

    /// Set the reading-order index.
    pub fn with_order(mut self, order_index: u32) -> Self {
        self.order_index = order_index;
        self
    }

    /// Check if this block carries text.
    pub fn is_text(&self) -> bool {
        self.kind == BlockKind::Text
    }
}
