//! Page-level types.

use super::{Block, BlockKind};
use serde::{Deserialize, Serialize};

/// A single page of blocks in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    #[serde(default)]
    pub number: u32,

    /// Blocks on the page, already sorted into reading order
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create a new empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            blocks: Vec::new(),
        }
    }

    /// Create a page from blocks.
    pub fn with_blocks(number: u32, blocks: Vec<Block>) -> Self {
        Self { number, blocks }
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Append a text block, numbering it after the existing blocks.
    pub fn add_text(&mut self, content: impl Into<String>) {
        let index = self.blocks.len() as u32;
        self.blocks
            .push(Block::new(BlockKind::Text, content, index));
    }

    /// Append a non-text block, numbering it after the existing blocks.
    pub fn add_non_text(&mut self, content: impl Into<String>) {
        let index = self.blocks.len() as u32;
        self.blocks
            .push(Block::new(BlockKind::NonText, content, index));
    }

    /// Iterate over the text blocks in reading order.
    pub fn text_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.is_text())
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the number of blocks on the page.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_new() {
        let page = Page::new(1);
        assert_eq!(page.number, 1);
        assert!(page.is_empty());
    }

    #[test]
    fn test_add_text_numbers_blocks() {
        let mut page = Page::new(1);
        page.add_text("First");
        page.add_non_text("figure");
        page.add_text("Second");

        assert_eq!(page.block_count(), 3);
        let orders: Vec<u32> = page.blocks.iter().map(|b| b.order_index).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(page.text_blocks().count(), 2);
    }

    #[test]
    fn test_text_blocks_skip_non_text() {
        let mut page = Page::new(1);
        page.add_text("Alpha");
        page.add_non_text("[image]");
        page.add_text("Beta");
        let texts: Vec<&str> = page.text_blocks().map(|b| b.content.as_str()).collect();
        assert_eq!(texts, vec!["Alpha", "Beta"]);
    }
}
