//!
//! Cell values and the coercion rules the editors use.
//!
//! Every coercion here is a total function. Where a text
//! can't be interpreted the documented fallback is returned,
//! never an error.
//!
use std::fmt::{Display, Formatter};

/// The value of one field of a row.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// No value.
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Is Null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Text representation.
    ///
    /// * Null is the empty string.
    /// * Bool is `true` or `false`.
    /// * Float uses [format_number].
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(v) => v.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Float(v) => format_number(*v),
            Value::Text(v) => v.clone(),
        }
    }

    /// Integer interpretation.
    ///
    /// Floats are truncated, texts are parsed with [parse_int_prefix].
    /// Null and booleans have no integer value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Null => None,
            Value::Bool(_) => None,
            Value::Int(v) => Some(*v),
            Value::Float(v) => {
                if v.is_finite() {
                    Some(v.trunc() as i64)
                } else {
                    None
                }
            }
            Value::Text(v) => parse_int_prefix(v),
        }
    }

    /// Float interpretation.
    ///
    /// Texts are parsed with [parse_float_prefix].
    /// Null and booleans have no float value.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Null => None,
            Value::Bool(_) => None,
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Text(v) => parse_float_prefix(v),
        }
    }

    /// Loose boolean coercion.
    ///
    /// * `Bool` is itself.
    /// * Everything else is converted to text. Case-insensitive
    ///   `true`, `yes` and `1` are true.
    /// * Anything else, Null included, is false.
    pub fn loose_bool(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(v) => *v,
            v => {
                let txt = v.to_text();
                let txt = txt.trim();
                txt.eq_ignore_ascii_case("true")
                    || txt.eq_ignore_ascii_case("yes")
                    || txt == "1"
            }
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            None => Value::Null,
            Some(v) => v.into(),
        }
    }
}

/// Formats a number the short way. Integral values
/// are written without a fractional part.
pub fn format_number(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        if v > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if v == 0.0 {
        "0".to_string()
    } else {
        format!("{}", v)
    }
}

/// Round to the given number of decimal places.
pub fn round_to(v: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (v * f).round() / f
}

/// Parses a leading base-10 integer.
///
/// Leading whitespace is skipped, an optional sign is accepted,
/// parsing stops at the first non-digit. Returns None if there is no digit
/// at all. Values out of range saturate.
pub fn parse_int_prefix(txt: &str) -> Option<i64> {
    let txt = txt.trim_start();
    let mut chars = txt.chars().peekable();

    let neg = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };

    let mut value: i64 = 0;
    let mut any = false;
    for c in chars {
        let Some(d) = c.to_digit(10) else {
            break;
        };
        any = true;
        value = value
            .saturating_mul(10)
            .saturating_add(if neg { -(d as i64) } else { d as i64 });
    }

    if any {
        Some(value)
    } else {
        None
    }
}

/// Length of the leading decimal literal. 0 if there is none.
///
/// Accepts `[sign] (digits [. digits] | . digits) [e [sign] digits]`
/// and `[sign] Infinity`.
fn float_prefix_len(txt: &str) -> usize {
    let b = txt.as_bytes();
    let mut i = 0;

    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }
    if txt[i..].starts_with("Infinity") {
        return i + "Infinity".len();
    }

    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < b.len() && b[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }
    if digits == 0 {
        return 0;
    }

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
            i = j;
        }
    }

    i
}

fn parse_decimal(txt: &str) -> Option<f64> {
    let unsigned = txt.trim_start_matches(['+', '-']);
    if unsigned == "Infinity" {
        if txt.starts_with('-') {
            Some(f64::NEG_INFINITY)
        } else {
            Some(f64::INFINITY)
        }
    } else {
        txt.parse::<f64>().ok()
    }
}

/// Parses a leading floating point number.
///
/// Leading whitespace is skipped, parsing stops after the longest
/// valid decimal literal. Returns None if there is none.
pub fn parse_float_prefix(txt: &str) -> Option<f64> {
    let txt = txt.trim_start();
    let len = float_prefix_len(txt);
    if len == 0 {
        None
    } else {
        parse_decimal(&txt[..len])
    }
}

/// Is the complete text a number.
///
/// Surrounding whitespace is ignored and the empty text counts as
/// a number (zero). Decimal literals and `0x`, `0o`, `0b` prefixed
/// integers are accepted.
pub fn is_numeric(txt: &str) -> bool {
    let txt = txt.trim();
    if txt.is_empty() {
        return true;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = txt.strip_prefix(prefix) {
            return !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix));
        }
    }

    float_prefix_len(txt) == txt.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int_prefix("42"), Some(42));
        assert_eq!(parse_int_prefix("  -17abc"), Some(-17));
        assert_eq!(parse_int_prefix("+3.9"), Some(3));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float_prefix("1.5"), Some(1.5));
        assert_eq!(parse_float_prefix(" 25 %"), Some(25.0));
        assert_eq!(parse_float_prefix(".5x"), Some(0.5));
        assert_eq!(parse_float_prefix("3."), Some(3.0));
        assert_eq!(parse_float_prefix("1e3kg"), Some(1000.0));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("x1"), None);
    }

    #[test]
    fn test_numeric() {
        assert!(is_numeric(""));
        assert!(is_numeric(" 12 "));
        assert!(is_numeric("-1.25e2"));
        assert!(is_numeric("0x1f"));
        assert!(!is_numeric("0x"));
        assert!(!is_numeric("12a"));
        assert!(!is_numeric("abc"));
        assert!(!is_numeric("1 2"));
    }

    #[test]
    fn test_format() {
        assert_eq!(format_number(25.0), "25");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(round_to(0.123456, 3), 0.123);
    }

    #[test]
    fn test_loose_bool() {
        assert!(Value::from("true").loose_bool());
        assert!(Value::from("YES").loose_bool());
        assert!(Value::from(1).loose_bool());
        assert!(Value::from(true).loose_bool());
        assert!(Value::from(1.0).loose_bool());
        assert!(!Value::from("false").loose_bool());
        assert!(!Value::from(0).loose_bool());
        assert!(!Value::from(2).loose_bool());
        assert!(!Value::from("").loose_bool());
        assert!(!Value::Null.loose_bool());
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Value::Float(25.7).as_int(), Some(25));
        assert_eq!(Value::from("12px").as_int(), Some(12));
        assert_eq!(Value::Bool(true).as_int(), None);
        assert_eq!(Value::Int(3).as_float(), Some(3.0));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::Float(2.5).to_text(), "2.5");
        assert_eq!(Value::Null.to_text(), "");
    }
}
