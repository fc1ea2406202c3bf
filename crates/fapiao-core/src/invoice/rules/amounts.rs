//! Amount resolution: pick the figure total from glyph-prefixed candidates.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::patterns::AMOUNT_FIGURES;
use crate::error::ExtractionError;

/// Every currency-glyph-prefixed decimal candidate, in text order.
///
/// Amounts are parsed as exact decimals, never floats, to avoid
/// rounding artifacts on currency values.
pub fn amount_candidates(text: &str) -> Vec<Decimal> {
    AMOUNT_FIGURES
        .captures_iter(text)
        .filter_map(|caps| Decimal::from_str(&caps["amount"]).ok())
        .collect()
}

/// Resolve the figure amount (价税合计 小写) for an invoice.
///
/// The unit price, the tax amount and the grand total each appear
/// behind a currency glyph on this layout, so every candidate is
/// collected and the maximum taken: the grand total is empirically the
/// numerically largest. This is a heuristic, not a labeled total match.
pub fn resolve_amount(text: &str) -> Result<Decimal, ExtractionError> {
    amount_candidates(text)
        .into_iter()
        .max()
        .ok_or(ExtractionError::NoAmountFound)
}
