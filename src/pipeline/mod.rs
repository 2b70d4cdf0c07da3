//! Sentence pipeline: blocks in, sentences out.
//!
//! Stages run strictly in this order:
//!
//! 1. [`header`]: close header-like text blocks with a period
//! 2. join every text block of every selected page with `\n`
//! 3. [`repair`]: hyphenation breaks, then broken URLs
//! 4. [`normalize`]: NFKC, whitespace collapse, spacing before `.!?`
//! 5. [`segment`]: split at `.!?` + whitespace, drop short or numeric pieces
//!
//! The pipeline holds only configuration and compiled patterns. It never
//! reorders text and is safe to share across threads.

mod header;
mod normalize;
mod options;
mod repair;
mod result;
mod segment;

pub use header::{insert_header_boundary, is_header_like};
pub use normalize::Normalizer;
pub use options::{ExtractOptions, PageSelection, HEADER_MAX_CHARS, MIN_SENTENCE_CHARS};
pub use repair::StructuralRepair;
pub use result::{Extraction, ExtractionStats};
pub use segment::Segmenter;

use std::borrow::Cow;

use crate::model::{Document, Page};

/// Configured sentence extraction pipeline.
#[derive(Debug, Clone)]
pub struct SentencePipeline {
    options: ExtractOptions,
    repair: StructuralRepair,
    normalizer: Normalizer,
    segmenter: Segmenter,
}

impl SentencePipeline {
    /// Create a pipeline with the given options.
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            repair: StructuralRepair::with_repairs(
                options.repair_hyphenation,
                options.repair_urls,
            ),
            normalizer: Normalizer::new(),
            segmenter: Segmenter::new(options.min_sentence_chars),
            options,
        }
    }

    /// Get the pipeline options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract sentences from pages in reading order.
    pub fn extract(&self, pages: &[Page]) -> Vec<String> {
        let mut stats = ExtractionStats::new();
        let text = self.assemble(pages, &mut stats);
        self.sentences_from_text(&text)
    }

    /// Extract sentences from a document, collecting statistics.
    pub fn extract_document(&self, doc: &Document) -> Extraction {
        let mut stats = ExtractionStats::new();
        let text = self.assemble(&doc.pages, &mut stats);
        let cleaned = self.clean_text(&text);

        let candidates = self.segmenter.candidates(&cleaned);
        stats.candidate_count = candidates.len() as u32;
        let sentences: Vec<String> = candidates
            .into_iter()
            .filter(|c| self.segmenter.keeps(c))
            .map(str::to_string)
            .collect();
        stats.sentence_count = sentences.len() as u32;

        log::debug!(
            "{}: {} pages, {} text blocks, {} headers closed, {}/{} sentences kept",
            doc.source.as_deref().unwrap_or("<document>"),
            stats.page_count,
            stats.text_block_count,
            stats.header_boundary_count,
            stats.sentence_count,
            stats.candidate_count
        );

        Extraction::new(sentences).with_stats(stats)
    }

    /// Assembled document text: selected text blocks, header boundaries
    /// applied, joined by line breaks.
    pub fn document_text(&self, pages: &[Page]) -> String {
        self.assemble(pages, &mut ExtractionStats::new())
    }

    /// Structural repair followed by normalization.
    pub fn clean_text(&self, text: &str) -> String {
        let repaired = self.repair.repair(text);
        self.normalizer.normalize(&repaired)
    }

    /// Run repair, normalization and segmentation on already joined text.
    pub fn sentences_from_text(&self, text: &str) -> Vec<String> {
        let cleaned = self.clean_text(text);
        self.segmenter.segment(&cleaned)
    }

    fn assemble(&self, pages: &[Page], stats: &mut ExtractionStats) -> String {
        let mut blocks: Vec<Cow<'_, str>> = Vec::new();

        for (index, page) in pages.iter().enumerate() {
            let number = if page.number == 0 {
                index as u32 + 1
            } else {
                page.number
            };
            if !self.options.page_selection.includes(number) {
                continue;
            }
            stats.page_count += 1;

            for block in &page.blocks {
                if !block.is_text() {
                    stats.skipped_block_count += 1;
                    continue;
                }
                stats.text_block_count += 1;

                if self.options.insert_header_boundaries {
                    let content =
                        header::insert_header_boundary(&block.content, self.options.header_max_chars);
                    if matches!(content, Cow::Owned(_)) {
                        stats.header_boundary_count += 1;
                    }
                    blocks.push(content);
                } else {
                    blocks.push(Cow::Borrowed(block.content.as_str()));
                }
            }
        }

        blocks.join("\n")
    }
}

impl Default for SentencePipeline {
    fn default() -> Self {
        Self::new(ExtractOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;

    fn page(number: u32, texts: &[&str]) -> Page {
        let mut page = Page::new(number);
        for text in texts {
            page.add_text(*text);
        }
        page
    }

    #[test]
    fn test_meeting_minutes_scenario() {
        let pages = vec![
            page(1, &["Meeting Minutes"]),
            page(2, &["Finn and Tyge were present."]),
            page(3, &["Poul was missing."]),
        ];
        let pipeline = SentencePipeline::default();
        assert_eq!(
            pipeline.extract(&pages),
            vec![
                "Meeting Minutes.",
                "Finn and Tyge were present.",
                "Poul was missing.",
            ]
        );
    }

    #[test]
    fn test_header_does_not_fuse_with_body() {
        let pages = vec![page(1, &["Results", "the system performed well"])];
        let pipeline = SentencePipeline::default();

        let text = pipeline.document_text(&pages);
        assert!(text.contains("Results."));

        let cleaned = pipeline.clean_text(&text);
        assert_eq!(
            Segmenter::default().candidates(&cleaned),
            vec!["Results.", "the system performed well"]
        );

        // "Results." is too short to survive the filter on its own
        assert_eq!(pipeline.extract(&pages), vec!["the system performed well"]);
    }

    #[test]
    fn test_hyphen_join_across_blocks() {
        let pages = vec![page(1, &["This is a config-", "ured system."])];
        let pipeline = SentencePipeline::default();
        assert_eq!(
            pipeline.document_text(&pages),
            "This is a config-\nured system."
        );
        assert_eq!(pipeline.extract(&pages), vec!["This is a configured system."]);
    }

    #[test]
    fn test_url_join_across_blocks() {
        let pages = vec![page(
            1,
            &[
                "Scholia is a Web application running from the Wikimedia Foundation Toolforge server at http://scholia.",
                "toolforge.org. It is open source.",
            ],
        )];
        let sentences = SentencePipeline::default().extract(&pages);
        assert_eq!(
            sentences,
            vec![
                "Scholia is a Web application running from the Wikimedia Foundation Toolforge server at http://scholia.toolforge.org.",
                "It is open source.",
            ]
        );
    }

    #[test]
    fn test_non_text_blocks_ignored() {
        let mut p = Page::new(1);
        p.add_non_text("Figure 1 caption without a period");
        p.add_text("Finn and Tyge were present.");
        p.add_block(Block::non_text("[image]"));
        let sentences = SentencePipeline::default().extract(&[p]);
        assert_eq!(sentences, vec!["Finn and Tyge were present."]);
    }

    #[test]
    fn test_document_text_skips_empty_pages() {
        let pipeline = SentencePipeline::default();
        let pages = vec![page(1, &["hello there"]), Page::new(2), page(3, &["again"])];
        assert_eq!(pipeline.document_text(&pages), "hello there\nagain");
        assert_eq!(pipeline.document_text(&pages[..2]), "hello there");
    }

    #[test]
    fn test_empty_input() {
        let pipeline = SentencePipeline::default();
        assert!(pipeline.extract(&[]).is_empty());
        assert!(pipeline.extract(&[Page::new(1)]).is_empty());
        assert!(pipeline.extract(&[page(1, &["", "   "])]).is_empty());
    }

    #[test]
    fn test_page_selection() {
        let pages = vec![
            page(1, &["Finn and Tyge were present."]),
            page(2, &["Poul was missing from the meeting."]),
        ];
        let pipeline = SentencePipeline::new(ExtractOptions::new().with_page_range(2..=2));
        assert_eq!(
            pipeline.extract(&pages),
            vec!["Poul was missing from the meeting."]
        );
    }

    #[test]
    fn test_page_selection_uses_position_for_unnumbered_pages() {
        let pages = vec![
            page(0, &["Finn and Tyge were present."]),
            page(0, &["Poul was missing from the meeting."]),
        ];
        let pipeline =
            SentencePipeline::new(ExtractOptions::new().with_pages(PageSelection::Pages(vec![1..=1])));
        assert_eq!(pipeline.extract(&pages), vec!["Finn and Tyge were present."]);
    }

    #[test]
    fn test_header_boundaries_disabled() {
        let pages = vec![page(1, &["Results", "the system performed well."])];
        let pipeline =
            SentencePipeline::new(ExtractOptions::new().with_header_boundaries(false));
        assert_eq!(
            pipeline.extract(&pages),
            vec!["Results the system performed well."]
        );
    }

    #[test]
    fn test_extract_document_stats() {
        let mut p = page(1, &["Meeting Minutes", "Finn and Tyge were present. Ok."]);
        p.add_non_text("logo");
        let doc = Document::from_pages(vec![p]);

        let extraction = SentencePipeline::default().extract_document(&doc);
        assert_eq!(
            extraction.sentences,
            vec!["Meeting Minutes.", "Finn and Tyge were present."]
        );

        let stats = extraction.stats.unwrap();
        assert_eq!(stats.page_count, 1);
        assert_eq!(stats.text_block_count, 2);
        assert_eq!(stats.skipped_block_count, 1);
        assert_eq!(stats.header_boundary_count, 1);
        assert_eq!(stats.candidate_count, 3);
        assert_eq!(stats.sentence_count, 2);
    }

    #[test]
    fn test_clean_text_idempotent() {
        let pipeline = SentencePipeline::default();
        let inputs = [
            "This is a config-\nured system .",
            "at https://synia.toolforge.org/.\ncanonical homepage",
            "a-\nb-\nc",
            "  \u{FB01}ne \n\n\n text ! ",
            "",
        ];
        for input in inputs {
            let once = pipeline.clean_text(input);
            assert_eq!(pipeline.clean_text(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn test_pipeline_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SentencePipeline>();
    }
}
