//! Rule-based field extraction for the 普通发票 layout.

pub mod amounts;
pub mod patterns;

pub use amounts::{amount_candidates, resolve_amount};

use regex::Regex;

use crate::models::record::InvoiceFields;

/// One immutable pattern responsible for one or more named fields.
///
/// Rules are independent: each one searches the full text blob for its
/// first match, without consuming anything for the rules that follow.
pub struct FieldRule {
    /// Rule name used in logs and outcomes.
    pub name: &'static str,
    pattern: &'static Regex,
}

impl FieldRule {
    /// Write every non-empty captured group of the first match into
    /// `fields`, with all whitespace stripped from the value. Returns
    /// whether the rule matched at all.
    pub fn apply(&self, text: &str, fields: &mut InvoiceFields) -> bool {
        let Some(caps) = self.pattern.captures(text) else {
            return false;
        };
        for group in self.pattern.capture_names().flatten() {
            if let Some(m) = caps.name(group) {
                let value: String = m
                    .as_str()
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect();
                if !value.is_empty() {
                    fields.set(group, value);
                }
            }
        }
        true
    }
}

/// Per-rule outcome, recorded instead of raised so that a caller can
/// see exactly which rules failed for a given document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Name of the rule.
    pub rule: &'static str,
    /// Whether the rule found a match.
    pub matched: bool,
}

/// The consolidated rule set, in extraction order.
pub fn rule_set() -> [FieldRule; 8] {
    [
        FieldRule {
            name: "city",
            pattern: &*patterns::CITY,
        },
        FieldRule {
            name: "invoice_code",
            pattern: &*patterns::INVOICE_CODE,
        },
        FieldRule {
            name: "invoice_number",
            pattern: &*patterns::INVOICE_NUMBER,
        },
        FieldRule {
            name: "issue_date",
            pattern: &*patterns::ISSUE_DATE,
        },
        FieldRule {
            name: "machine_no",
            pattern: &*patterns::MACHINE_NO,
        },
        FieldRule {
            name: "check_code",
            pattern: &*patterns::CHECK_CODE,
        },
        FieldRule {
            name: "parties",
            pattern: &*patterns::PARTIES,
        },
        FieldRule {
            name: "amount_words",
            pattern: &*patterns::AMOUNT_WORDS,
        },
    ]
}
