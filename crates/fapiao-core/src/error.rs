//! Error types for the fapiao-core library.

use thiserror::Error;

/// Main error type for the fapiao library.
#[derive(Error, Debug)]
pub enum FapiaoError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Invoice extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Non-fatal defects recorded during field extraction.
///
/// None of these abort the batch: a rule that finds no match leaves its
/// fields absent, flips the record's success flag and lets the
/// remaining rules run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// A field rule found no match in the page text.
    #[error("rule '{0}' found no match")]
    RuleMismatch(&'static str),

    /// No currency-glyph-prefixed decimal token anywhere in the text.
    #[error("no currency-prefixed amount found")]
    NoAmountFound,

    /// The text source returned an empty string for the first page.
    #[error("empty text layer")]
    TextExtractionEmpty,
}

/// Result type for the fapiao library.
pub type Result<T> = std::result::Result<T, FapiaoError>;
