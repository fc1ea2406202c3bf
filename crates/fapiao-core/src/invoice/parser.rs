//! Ordered, partial-tolerant field extraction over a page-one text blob.

use tracing::debug;

use super::rules::{resolve_amount, rule_set, FieldRule, RuleOutcome};
use crate::models::record::InvoiceFields;

/// Result of running the full rule set over one text blob: the partial
/// field mapping plus the per-rule outcome list.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Extracted fields; only successfully captured values are present.
    pub fields: InvoiceFields,
    /// Per-rule outcomes, in rule order.
    pub outcomes: Vec<RuleOutcome>,
    /// True only if every rule matched and an amount candidate was found.
    pub succeeded: bool,
}

/// Applies the ordered rule set and the amount resolver to page text.
pub struct FieldExtractor {
    rules: [FieldRule; 8],
}

impl FieldExtractor {
    /// Create an extractor over the consolidated rule set.
    pub fn new() -> Self {
        Self { rules: rule_set() }
    }

    /// Extract whatever the rules can recover from `text`.
    ///
    /// Rules run in fixed order and each searches the full text
    /// independently; a mismatch is recorded and extraction continues,
    /// so a document with several defects still yields every field
    /// that is recoverable. Invoices come out of noisy text layers;
    /// keeping the partial fields keeps later classification
    /// informative for diagnosis.
    pub fn extract(&self, text: &str) -> Extraction {
        let mut fields = InvoiceFields::default();
        let mut outcomes = Vec::with_capacity(self.rules.len());
        let mut succeeded = true;

        for rule in &self.rules {
            let matched = rule.apply(text, &mut fields);
            if !matched {
                debug!(rule = rule.name, "rule found no match");
                succeeded = false;
            }
            outcomes.push(RuleOutcome {
                rule: rule.name,
                matched,
            });
        }

        match resolve_amount(text) {
            Ok(amount) => fields.amount_figures = Some(amount),
            Err(e) => {
                debug!("{e}");
                succeeded = false;
            }
        }

        Extraction {
            fields,
            outcomes,
            succeeded,
        }
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const FULL_INVOICE: &str = "\
深圳电子普通发票
发票代码: 044031900111    发票号码: 12345678
开票日期: 2019年05月07日  机器编号: 499098821019
校 验 码: 01234 56789 01234 56789
购买方 名 称: 某某科技有限公司
销售方 名 称: 四川省太阳运输有限公司
价税合计 (大写) 贰佰叁拾伍圆伍角 (小写) ¥235.50
单价 ¥100.00 税额 ¥35.50
";

    #[test]
    fn full_invoice_extracts_every_field() {
        let extraction = FieldExtractor::new().extract(FULL_INVOICE);

        assert!(extraction.succeeded);
        assert!(extraction.outcomes.iter().all(|o| o.matched));

        let fields = &extraction.fields;
        assert_eq!(fields.city.as_deref(), Some("深圳电子普通发票"));
        assert_eq!(fields.code.as_deref(), Some("044031900111"));
        assert_eq!(fields.number.as_deref(), Some("12345678"));
        assert_eq!(fields.issue_date.as_deref(), Some("2019年05月07日"));
        assert_eq!(fields.machine_no.as_deref(), Some("499098821019"));
        assert_eq!(fields.check_code.as_deref(), Some("01234567890123456789"));
        assert_eq!(fields.buyer.as_deref(), Some("某某科技有限公司"));
        assert_eq!(fields.seller.as_deref(), Some("四川省太阳运输有限公司"));
        assert_eq!(fields.amount_words.as_deref(), Some("贰佰叁拾伍圆伍角"));
        assert_eq!(
            fields.amount_figures,
            Some(Decimal::from_str("235.50").unwrap())
        );
    }

    #[test]
    fn missing_rule_is_recorded_and_extraction_continues() {
        // No 机器编号 line; everything else should still come out.
        let text = FULL_INVOICE.replace("机器编号: 499098821019", "");
        let extraction = FieldExtractor::new().extract(&text);

        assert!(!extraction.succeeded);
        assert!(extraction.fields.machine_no.is_none());
        assert_eq!(extraction.fields.number.as_deref(), Some("12345678"));
        assert_eq!(extraction.fields.seller.as_deref(), Some("四川省太阳运输有限公司"));

        let unmatched: Vec<&str> = extraction
            .outcomes
            .iter()
            .filter(|o| !o.matched)
            .map(|o| o.rule)
            .collect();
        assert_eq!(unmatched, vec!["machine_no"]);
    }

    #[test]
    fn missing_amount_fails_the_record_but_keeps_fields() {
        let text = FULL_INVOICE.replace('¥', "");
        let extraction = FieldExtractor::new().extract(&text);

        assert!(!extraction.succeeded);
        assert!(extraction.fields.amount_figures.is_none());
        assert_eq!(extraction.fields.code.as_deref(), Some("044031900111"));
    }

    #[test]
    fn empty_text_fails_every_rule() {
        let extraction = FieldExtractor::new().extract("");

        assert!(!extraction.succeeded);
        assert!(extraction.outcomes.iter().all(|o| !o.matched));
        assert!(extraction.fields.amount_figures.is_none());
    }

    #[test]
    fn captured_values_have_whitespace_stripped() {
        let text = "开票日期: 2019年 05月 07日\n".to_string() + FULL_INVOICE;
        let extraction = FieldExtractor::new().extract(&text);
        assert_eq!(
            extraction.fields.issue_date.as_deref(),
            Some("2019年05月07日")
        );
    }
}
