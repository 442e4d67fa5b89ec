//! Value normalization for raw card text. None of these fail: input that
//! cannot be read is reported as absent.

use regex::Regex;
use std::sync::LazyLock;

/// Listing prices are quoted in 만원 (units of 10,000 KRW).
pub const PRICE_UNIT_KRW: u64 = 10_000;

static YEAR_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{2,4}").expect("year pattern compiles"));

/// Concatenates the ASCII digits of `raw` into an integer.
///
/// `"123,456km"` becomes `123456`. No digits, or more than fit in a `u64`,
/// yields `None`.
pub fn parse_digits(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Reads a model year such as `"21/04식"` (2021) or `"2019식"` (2019).
///
/// Takes the first run of two to four digits. Two-digit years are in the 2000s;
/// three- and four-digit runs are used as written.
pub fn year_from_text(raw: &str) -> Option<i32> {
    let found = YEAR_DIGITS.find(raw)?;
    let year: i32 = found.as_str().parse().ok()?;
    Some(if year < 100 { 2000 + year } else { year })
}

pub fn price_from_man(raw: &str) -> Option<u64> {
    parse_digits(raw)?.checked_mul(PRICE_UNIT_KRW)
}

/// Makes protocol-relative and root-relative URLs absolute against `origin`.
/// Empty input and anything else is returned unchanged.
pub fn normalize_url(raw: &str, origin: &str) -> String {
    if raw.is_empty() {
        raw.to_string()
    } else if raw.starts_with("//") {
        format!("https:{}", raw)
    } else if raw.starts_with('/') {
        format!("{}{}", origin, raw)
    } else {
        raw.to_string()
    }
}
