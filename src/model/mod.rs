//! Document model types for block-structured content.
//!
//! This module defines what a block source hands to the sentence pipeline:
//! documents made of pages made of blocks, each block tagged text or
//! non-text and already placed in reading order.

mod block;
mod document;
mod page;

pub use block::{Block, BlockKind};
pub use document::Document;
pub use page::Page;
