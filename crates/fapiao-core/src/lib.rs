//! Core library for Chinese e-invoice (普通发票) batch processing.
//!
//! This crate provides:
//! - PDF first-page text access (the text layer only, no OCR)
//! - ordered, partial-tolerant field extraction over a consolidated rule set
//! - figure-amount resolution from currency-glyph-prefixed candidates
//! - identity-based deduplication, classification and the rename policy

pub mod corpus;
pub mod error;
pub mod identity;
pub mod invoice;
pub mod models;
pub mod pdf;

pub use corpus::{Classification, Corpus};
pub use error::{ExtractionError, FapiaoError, PdfError, Result};
pub use identity::Identity;
pub use invoice::{Extraction, FieldExtractor};
pub use models::config::FapiaoConfig;
pub use models::record::{InvoiceFields, InvoiceRecord, FIELD_NAMES};
pub use pdf::{PdfTextSource, TextSource};
