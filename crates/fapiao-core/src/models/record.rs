//! Invoice record model: extracted fields plus classification state.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ExtractionError;
use crate::identity::Identity;
use crate::invoice::rules::RuleOutcome;
use crate::invoice::Extraction;

/// Display names of the recognized fields, in declared export order.
pub const FIELD_NAMES: [&str; 10] = [
    "城市",
    "发票代码",
    "发票号码",
    "开票日期",
    "机器编号",
    "校验码",
    "购买方",
    "销售方",
    "价税合计_大写",
    "价税合计_小写",
];

/// Fields extracted from one invoice document.
///
/// Every field is optional: a rule that found no match leaves its
/// fields `None`. The struct is the only representation used inside the
/// pipeline; [`InvoiceFields::to_row`] converts to positional strings
/// at the rename/export boundary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InvoiceFields {
    /// City / document-type label (e.g. 深圳电子普通发票).
    pub city: Option<String>,
    /// Invoice code (发票代码, 12 digits).
    pub code: Option<String>,
    /// Invoice number (发票号码, 8 digits).
    pub number: Option<String>,
    /// Issue date (开票日期, <y>年<m>月<d>日).
    pub issue_date: Option<String>,
    /// Machine number (机器编号, 12 digits).
    pub machine_no: Option<String>,
    /// Check code (校验码, four groups of five digits).
    pub check_code: Option<String>,
    /// Buyer name (购买方 名称).
    pub buyer: Option<String>,
    /// Seller name (销售方 名称).
    pub seller: Option<String>,
    /// Amount in words (价税合计 大写).
    pub amount_words: Option<String>,
    /// Amount in figures (价税合计 小写), resolved from glyph-prefixed candidates.
    pub amount_figures: Option<Decimal>,
}

impl InvoiceFields {
    /// Set a field by its capture-group name. Unknown names are ignored.
    pub(crate) fn set(&mut self, name: &str, value: String) {
        match name {
            "city" => self.city = Some(value),
            "code" => self.code = Some(value),
            "number" => self.number = Some(value),
            "issue_date" => self.issue_date = Some(value),
            "machine_no" => self.machine_no = Some(value),
            "check_code" => self.check_code = Some(value),
            "buyer" => self.buyer = Some(value),
            "seller" => self.seller = Some(value),
            "amount_words" => self.amount_words = Some(value),
            _ => {}
        }
    }

    /// Field values in [`FIELD_NAMES`] order, missing fields as empty
    /// strings. Used only at the rename/export boundary.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.city.clone().unwrap_or_default(),
            self.code.clone().unwrap_or_default(),
            self.number.clone().unwrap_or_default(),
            self.issue_date.clone().unwrap_or_default(),
            self.machine_no.clone().unwrap_or_default(),
            self.check_code.clone().unwrap_or_default(),
            self.buyer.clone().unwrap_or_default(),
            self.seller.clone().unwrap_or_default(),
            self.amount_words.clone().unwrap_or_default(),
            self.amount_figures
                .map(|d| d.to_string())
                .unwrap_or_default(),
        ]
    }
}

/// One ingested document with everything the batch needs to classify,
/// rename and export it.
#[derive(Debug, Clone)]
pub struct InvoiceRecord {
    /// Extracted fields (partial on a defective document).
    pub fields: InvoiceFields,
    /// Per-rule outcomes, in rule order.
    pub outcomes: Vec<RuleOutcome>,
    /// True only if every rule matched and an amount candidate was found.
    pub extraction_succeeded: bool,
    /// Deduplication key; `NoIdentity` when extraction failed.
    pub identity: Identity,
    /// Current location of the document, updated at each rename.
    pub source_path: PathBuf,
    /// First-page text blob, retained for the diagnostic dump.
    pub raw_text: String,
}

impl InvoiceRecord {
    /// Build a record from an extraction run. Identity is computed here,
    /// once, and never recomputed.
    pub fn new(source_path: PathBuf, raw_text: String, extraction: Extraction) -> Self {
        let identity = Identity::of(&extraction.fields, extraction.succeeded);
        Self {
            fields: extraction.fields,
            outcomes: extraction.outcomes,
            extraction_succeeded: extraction.succeeded,
            identity,
            source_path,
            raw_text,
        }
    }

    /// The non-fatal defects recorded for this record, for logging and
    /// manual remediation.
    pub fn defects(&self) -> Vec<ExtractionError> {
        let mut defects = Vec::new();
        if self.raw_text.is_empty() {
            defects.push(ExtractionError::TextExtractionEmpty);
        }
        for outcome in &self.outcomes {
            if !outcome.matched {
                defects.push(ExtractionError::RuleMismatch(outcome.rule));
            }
        }
        if self.fields.amount_figures.is_none() {
            defects.push(ExtractionError::NoAmountFound);
        }
        defects
    }
}
