//! Loose value coercions matching how templates stringify and parse values.

use crate::value::Value;

/// Formats a number the way it shows up in rendered text: integral values
/// without a fractional part, exponent notation outside `[1e-6, 1e21)`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if n == 0.0 {
        return "0".to_owned();
    }

    let abs = n.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let s = format!("{n:e}");
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => s,
        };
    }
    n.to_string()
}

/// Scans the longest decimal literal at the start of `s`.
/// Returns the byte length of the literal, or `None` when there is no digit.
fn scan_decimal(s: &str) -> Option<usize> {
    let b = s.as_bytes();
    let mut i = 0;

    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < b.len() && b[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }

    if digits == 0 {
        return None;
    }

    let mut end = i;
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }
    Some(end)
}

fn signed_infinity(s: &str) -> Option<f64> {
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    rest.starts_with("Infinity").then_some(sign * f64::INFINITY)
}

/// Parses the leading number of `s`, ignoring trailing garbage (`"3px"` is 3).
/// Yields `NaN` when no number starts the string.
pub fn parse_float(s: &str) -> f64 {
    let s = s.trim_start();
    if let Some(inf) = signed_infinity(s) {
        return inf;
    }
    match scan_decimal(s) {
        Some(end) => s[..end].parse().unwrap_or(f64::NAN),
        None => f64::NAN,
    }
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
    .unwrap_or(f64::NAN)
}

/// Strict numeric conversion of a whole string: surrounding whitespace is
/// ignored, empty means zero, anything unparsable is `NaN`.
pub fn string_to_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    if let Some(inf) = signed_infinity(s) {
        return if s.trim_start_matches(['+', '-']).len() == "Infinity".len() {
            inf
        } else {
            f64::NAN
        };
    }

    let lower = s.get(..2).map(str::to_ascii_lowercase);
    match lower.as_deref() {
        Some("0x") => return parse_radix(&s[2..], 16),
        Some("0o") => return parse_radix(&s[2..], 8),
        Some("0b") => return parse_radix(&s[2..], 2),
        _ => {}
    }

    match scan_decimal(s) {
        Some(end) if end == s.len() => s.parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Numeric value of `v` as arithmetic would see it.
pub fn to_f64(v: &Value) -> f64 {
    match v {
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => *n,
        Value::String(s) => string_to_number(s),
        Value::Array(_) => string_to_number(&to_js_string(v)),
        Value::Symbol(_) | Value::Object(_) | Value::RegExp { .. } | Value::Function { .. } => {
            f64::NAN
        }
    }
}

/// String form of `v` as string concatenation would produce it.
pub fn to_js_string(v: &Value) -> String {
    match v {
        Value::Undefined => "undefined".to_owned(),
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => s.clone(),
        Value::Symbol(name) => format!("Symbol({name})"),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Undefined | Value::Null => String::new(),
                other => to_js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_owned(),
        Value::RegExp { source, flags } => format!("/{source}/{flags}"),
        Value::Function { source, .. } => source.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(3.14), "3.14");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_parse_float_prefixes() {
        assert_eq!(parse_float("3px"), 3.0);
        assert_eq!(parse_float("  -2.5e3x"), -2500.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float("Infinityx"), f64::INFINITY);
        assert!(parse_float("abc").is_nan());
        assert!(parse_float("").is_nan());
        assert!(parse_float("inf").is_nan());
    }

    #[test]
    fn test_string_to_number_is_strict() {
        assert_eq!(string_to_number(" 42 "), 42.0);
        assert_eq!(string_to_number(""), 0.0);
        assert_eq!(string_to_number("0x1f"), 31.0);
        assert!(string_to_number("3px").is_nan());
        assert!(string_to_number("nan").is_nan());
        assert!(string_to_number("Infinityx").is_nan());
    }

    #[test]
    fn test_array_stringification() {
        let v = Value::Array(vec![Value::from(1), Value::Null, Value::from("a")]);
        assert_eq!(to_js_string(&v), "1,,a");
        assert_eq!(to_f64(&Value::Array(vec![Value::from(7)])), 7.0);
    }
}
