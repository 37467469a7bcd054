//! PDF text extraction and normalization.
//!
//! Flattens a batch of uploaded PDFs into one raw text stream: each
//! page's text followed by a newline, in document-then-page order. Pages
//! with no extractable text contribute nothing. Documents that fail to
//! parse are skipped rather than aborting the batch; skip counts are
//! reported so callers (and tests) can observe the loss.

use lopdf::Document;
use tracing::{debug, warn};

use crate::types::DocumentUpload;

/// Result of normalizing a document batch.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Per-page text, newline-joined, in upload order.
    pub text: String,
    /// Documents that could not be parsed at all.
    pub skipped_documents: usize,
    /// Pages that failed extraction or yielded no text.
    pub skipped_pages: usize,
}

/// Extract and normalize text from every document in the batch.
///
/// Never fails: unreadable documents and pages are counted and skipped.
/// Inputs are read only; nothing is retained besides the extracted text.
pub fn extract_text(documents: &[DocumentUpload]) -> Extraction {
    let mut out = Extraction::default();

    for doc in documents {
        let parsed = match Document::load_mem(&doc.data) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(name = %doc.name, error = %err, "Skipping unreadable document");
                out.skipped_documents += 1;
                continue;
            }
        };

        let mut pages_with_text = 0usize;
        for page_number in parsed.get_pages().keys() {
            match parsed.extract_text(&[*page_number]) {
                Ok(content) if !content.trim().is_empty() => {
                    out.text.push_str(&content);
                    out.text.push('\n');
                    pages_with_text += 1;
                }
                Ok(_) => {
                    out.skipped_pages += 1;
                }
                Err(err) => {
                    warn!(
                        name = %doc.name,
                        page = page_number,
                        error = %err,
                        "Skipping unreadable page"
                    );
                    out.skipped_pages += 1;
                }
            }
        }

        debug!(name = %doc.name, pages_with_text, "Extracted document");
    }

    out
}
