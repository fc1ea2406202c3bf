//! PDF text-layer access.

mod extractor;

pub use extractor::PdfTextSource;

use std::path::Path;

/// Source of a document's first-page text.
///
/// E-invoices are single-page documents, so only page one is read.
/// Implementations return an empty string, not an error, when the
/// document has no text layer or cannot be read: for the pipeline an
/// empty blob is simply a complete extraction failure for that record.
pub trait TextSource {
    /// The text of the document's first page, or an empty string.
    fn first_page_text(&self, path: &Path) -> String;
}
