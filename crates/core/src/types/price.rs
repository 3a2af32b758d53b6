//! Price parsing and display.
//!
//! Prices are plain `f64` unit amounts in a single currency. They are read
//! either from a structured attribute or, as a fallback, from whatever text the
//! product card displays (for example `"₹1,299.00 / pack"`).

/// Currency symbol prefixed to every displayed amount.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Parse a price from untyped display text.
///
/// Every character that is not an ASCII digit or a decimal point is stripped,
/// then the longest leading decimal number is parsed. Anything that does not
/// yield a finite number becomes `0.0`.
///
/// # Examples
///
/// ```
/// use spiceaura_core::parse_price;
///
/// assert!((parse_price("₹1,299.50") - 1299.5).abs() < f64::EPSILON);
/// assert!((parse_price("Rs. 40") - 0.4).abs() < f64::EPSILON); // "." survives stripping
/// assert!(parse_price("free").abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn parse_price(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    leading_number(&cleaned)
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Parse the leading `digits[.digits]` run of a string made of digits and dots.
fn leading_number(s: &str) -> Option<f64> {
    let mut seen_dot = false;
    let mut end = 0;
    for (i, c) in s.char_indices() {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        }
        end = i + c.len_utf8();
    }

    let prefix = s.get(..end)?;
    if !prefix.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

/// Format an amount for display with two decimals, e.g. `₹12.50`.
#[must_use]
pub fn format_price(amount: f64) -> String {
    format!("{CURRENCY_SYMBOL}{amount:.2}")
}
