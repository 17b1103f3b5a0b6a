//! Stock value transforms
//!
//! Plain functions usable with [`AttributeSpec::transform`](crate::AttributeSpec::transform).
//! Each one accepts every [`Value`] variant, `Absent` included.

use crate::Value;

/// Leading integer of the string form, `0` when there is none
///
/// `"23"` → 23, `"12abc"` → 12, `""` / `Absent` → 0. Out-of-range digit runs
/// saturate to `i64::MAX` / `i64::MIN`. Booleans map to 0/1 and floats
/// truncate.
pub fn to_int(value: Value) -> Value {
    Value::Int(match value {
        Value::Int(n) => n,
        Value::Float(f) => f.trunc() as i64,
        Value::Bool(b) => b as i64,
        Value::Text(s) => leading_int(&s),
        Value::Absent => 0,
    })
}

/// Leading decimal number of the string form, `0.0` when there is none
pub fn to_float(value: Value) -> Value {
    Value::Float(match value {
        Value::Float(f) => f,
        Value::Int(n) => n as f64,
        Value::Bool(b) => if b { 1.0 } else { 0.0 },
        Value::Text(s) => leading_float(&s),
        Value::Absent => 0.0,
    })
}

/// `Bool(true)` unless the value is `Absent`
pub fn present(value: Value) -> Value {
    Value::Bool(!value.is_absent())
}

/// Trim surrounding whitespace of text values
pub fn trimmed(value: Value) -> Value {
    match value {
        Value::Text(s) => Value::Text(s.trim().to_string()),
        other => other,
    }
}

fn sign_and_digits(s: &str) -> (&str, usize) {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    (s, end)
}

/// Digit runs beyond the `i64` range saturate
fn leading_int(s: &str) -> i64 {
    let (s, end) = sign_and_digits(s);
    let digits = &s[..end];
    digits.parse().unwrap_or_else(|_| {
        if !digits.bytes().any(|b| b.is_ascii_digit()) {
            0
        } else if digits.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}

fn leading_float(s: &str) -> f64 {
    let (s, mut end) = sign_and_digits(s);
    let bytes = s.as_bytes();
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            end = frac_end;
        }
    }
    s[..end].parse().unwrap_or(0.0)
}
