//! Regex patterns for the consolidated 普通发票 field schema.
//!
//! One versioned rule table; the superseded historical layouts (no
//! 发票代码, tax-ID fields) are not carried as alternate paths.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // City / document-type label, e.g. "深圳电子普通发票".
    pub static ref CITY: Regex = Regex::new(
        r"(?P<city>\w*普通发票)"
    ).unwrap();

    // Invoice code (12 digits).
    pub static ref INVOICE_CODE: Regex = Regex::new(
        r"发票代码\s*[:：]\s*(?P<code>\d{12})"
    ).unwrap();

    // Invoice number (8 digits).
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"发票号码\s*[:：]\s*(?P<number>\d{8})"
    ).unwrap();

    // Issue date, e.g. "2019年05月07日".
    pub static ref ISSUE_DATE: Regex = Regex::new(
        r"开票日期\s*[:：]\s*(?P<issue_date>.+?年.+?月.+?日)"
    ).unwrap();

    // Machine number (12 digits).
    pub static ref MACHINE_NO: Regex = Regex::new(
        r"机器编号\s*[:：]\s*(?P<machine_no>\d{12})"
    ).unwrap();

    // Check code: four groups of five digits with arbitrary separators,
    // e.g. "01234 56789 01234 56789". The label itself may be spaced out.
    pub static ref CHECK_CODE: Regex = Regex::new(
        r"校\s*验\s*码\s*[:：]\s*(?P<check_code>(?:\d{5}\D*?){3}\d{5})"
    ).unwrap();

    // Buyer and seller names: two 名称 labels, buyer first in document order.
    pub static ref PARTIES: Regex = Regex::new(
        r"(?s)名\s*称\s*[:：]\s*(?P<buyer>\w*).*?名\s*称\s*[:：]\s*(?P<seller>\w*)"
    ).unwrap();

    // Amount in words; the trailing unit must be 整, 角 or 分.
    pub static ref AMOUNT_WORDS: Regex = Regex::new(
        r"(?s)价税合计.*?大写[)）]\s*(?P<amount_words>\w*[整角分])"
    ).unwrap();

    // Currency-glyph-prefixed decimal. The unit price, the tax amount
    // and the total each appear behind a glyph; the regex crate has no
    // look-behind, so the glyph is matched and the numeral captured.
    pub static ref AMOUNT_FIGURES: Regex = Regex::new(
        r"[￥¥]\s*(?P<amount>\d+\.\d+)"
    ).unwrap();
}
