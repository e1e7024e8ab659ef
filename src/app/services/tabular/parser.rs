//! Numeric cell parsing
//!
//! Sheet cells arrive as native JSON numbers or as loosely formatted text:
//! thousands separators ("1,234"), decimal commas ("6,5"), currency or unit
//! suffixes ("-12.3kg", "Rp 2500"). This parser normalizes all of them into
//! a finite `f64`, or `None` when the cell holds no usable number.

use serde_json::Value;

/// Parse a loosely formatted cell value into a finite number
///
/// Normalization steps, in order:
/// 1. Null cells yield `None`; strings and numbers are taken as text,
///    composite values (arrays, objects) are never numbers.
/// 2. Every character that is not an ASCII digit, comma, period, or minus
///    sign is stripped.
/// 3. Thousands-separator commas are removed: a comma followed by exactly
///    three digits and then a non-digit or end of string is deleted
///    ("1,234" becomes "1234", while "6,5" is left for the next step).
/// 4. The first remaining comma, if any, becomes a decimal period
///    (decimal-comma locales: "6,5" becomes "6.5").
/// 5. The longest numeric prefix is parsed as `f64`, so a stray trailing
///    fragment does not discard the leading number ("5-6" parses as 5).
///
/// Returns `None` unless the result is finite. Deterministic and
/// side-effect-free.
pub fn parse_number(value: &Value) -> Option<f64> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) | Value::Object(_) => return None,
    };

    let stripped: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();
    let decimal = strip_thousands_separators(&stripped).replacen(',', ".", 1);

    let parsed: f64 = numeric_prefix(&decimal)?.parse().ok()?;
    parsed.is_finite().then_some(parsed)
}

/// Remove commas acting as thousands separators
///
/// A comma is a thousands separator when followed by exactly three digits
/// and then a non-digit or the end of the string. "1,234,567" loses both
/// commas; "6,5" keeps its comma for the decimal-comma rule.
fn strip_thousands_separators(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    for (i, &byte) in bytes.iter().enumerate() {
        if byte == b','
            && i + 3 < bytes.len()
            && bytes[i + 1..i + 4].iter().all(u8::is_ascii_digit)
            && (i + 4 == bytes.len() || !bytes[i + 4].is_ascii_digit())
        {
            continue;
        }
        out.push(byte as char);
    }
    out
}

/// Longest leading slice matching `-?digits[.digits]`
///
/// Matches the prefix semantics the upstream sheets were published against:
/// parsing stops at a second period or any later minus sign, and the prefix
/// is valid only if it contains at least one digit.
fn numeric_prefix(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut end = usize::from(bytes.first() == Some(&b'-'));
    let mut seen_digit = false;
    let mut seen_period = false;

    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                end += 1;
            }
            b'.' if !seen_period => {
                seen_period = true;
                end += 1;
            }
            _ => break,
        }
    }

    seen_digit.then(|| &text[..end])
}
