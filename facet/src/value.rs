use std::collections::BTreeMap;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Number as JsonNumber, Value as JsonValue};

use crate::Error;

/// We use [`std::collections::BTreeMap`] as our default map structure.
pub type Map<K, V> = BTreeMap<K, V>;

/// Data shaped according to a particular view, keyed by the view's external
/// field names.
pub type ViewData = Map<String, Value>;

/// A scalar value held by a record field.
///
/// There is only one numeric type: integers and floating point values are
/// both represented as `f64`, so `5` and `5.0` are the same value.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl Value {
    /// A short, human-readable name for this value's type, used in error
    /// messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Leniently converts this value into a number.
    ///
    /// Never fails. Strings are trimmed and an empty string converts to zero.
    /// Text that does not look like a number converts to NaN.
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Null => 0.0,
            Self::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Number(n) => *n,
            Self::String(s) => parse_number(s),
        }
    }
}

fn parse_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => (),
    }
    // Prefixed integer literals are unsigned.
    for (prefixes, radix) in [(["0x", "0X"], 16), (["0o", "0O"], 8), (["0b", "0B"], 2)] {
        if let Some(digits) = prefixes.iter().find_map(|p| s.strip_prefix(p)) {
            return parse_radix(digits, radix);
        }
    }
    // Rust's float parser also accepts "inf" and "nan", which we don't want.
    let is_numeric = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !is_numeric {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
    })
    .unwrap_or(f64::NAN)
}

/// Formats a finite number the way a loosely typed scripting runtime would:
/// the shortest digits that round-trip, in positional notation for decimal
/// exponents from -7 to 20 and in exponential notation (`1e+21`, `1e-7`)
/// otherwise. Negative zero is formatted as `0`.
fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    let sign = if n < 0.0 { "-" } else { "" };
    // `{:e}` yields the shortest round-tripping digits, e.g. `1.2345e3`.
    let exp_repr = format!("{:e}", n.abs());
    let (mantissa, exp) = match exp_repr.split_once('e') {
        Some(parts) => parts,
        None => return exp_repr,
    };
    let digits = mantissa.replace('.', "");
    let k = digits.len() as i32;
    let n_pos = exp.parse::<i32>().unwrap_or(0) + 1;
    let body = if k <= n_pos && n_pos <= 21 {
        format!("{}{}", digits, "0".repeat((n_pos - k) as usize))
    } else if 0 < n_pos && n_pos <= 21 {
        let (int, frac) = digits.split_at(n_pos as usize);
        format!("{}.{}", int, frac)
    } else if -6 < n_pos && n_pos <= 0 {
        format!("0.{}{}", "0".repeat((-n_pos) as usize), digits)
    } else {
        let e = n_pos - 1;
        let e_sign = if e < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, e_sign, e.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, e_sign, e.abs())
        }
    };
    format!("{}{}", sign, body)
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    write!(f, "{}Infinity", if *n < 0.0 { "-" } else { "" })
                } else {
                    write!(f, "{}", format_number(*n))
                }
            }
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Number(i as f64)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => {
                let n = *n;
                if !n.is_finite() {
                    serializer.serialize_none()
                } else if n.fract() == 0.0 && n.abs() < (1u64 << 53) as f64 {
                    serializer.serialize_i64(n as i64)
                } else {
                    serializer.serialize_f64(n)
                }
            }
            Value::String(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let json = JsonValue::deserialize(deserializer)?;
        Value::try_from(json).map_err(de::Error::custom)
    }
}

impl TryFrom<JsonValue> for Value {
    type Error = Error;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        Ok(match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(b),
            JsonValue::Number(n) => Self::from(n),
            JsonValue::String(s) => Self::String(s),
            JsonValue::Array(_) => return Err(Error::NonScalarValue("an array".to_string())),
            JsonValue::Object(_) => return Err(Error::NonScalarValue("an object".to_string())),
        })
    }
}

impl From<JsonNumber> for Value {
    fn from(value: JsonNumber) -> Self {
        // Every JSON number is representable as an f64, albeit possibly with
        // some loss of precision for very large integers.
        Self::Number(value.as_f64().unwrap_or(f64::NAN))
    }
}

/// Attempts to convert a JSON object into view-shaped data.
pub fn view_data_from_json(value: JsonValue) -> Result<ViewData, Error> {
    match value {
        JsonValue::Object(obj) => obj
            .into_iter()
            .map(|(k, v)| Ok((k, Value::try_from(v)?)))
            .collect(),
        other => Err(Error::NonScalarValue(format!(
            "{} where an object was expected",
            other
        ))),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn lenient_number_conversion() {
        assert_eq!(Value::from("34").to_number(), 34.0);
        assert_eq!(Value::from("  -2.5 ").to_number(), -2.5);
        assert_eq!(Value::from("").to_number(), 0.0);
        assert_eq!(Value::from("Infinity").to_number(), f64::INFINITY);
        assert_eq!(Value::Null.to_number(), 0.0);
        assert_eq!(Value::Bool(true).to_number(), 1.0);
        assert_eq!(Value::from(7_i64).to_number(), 7.0);
        assert!(Value::from("abc").to_number().is_nan());
        assert!(Value::from("inf").to_number().is_nan());
        assert!(Value::from("nan").to_number().is_nan());
        assert_eq!(Value::from("0x10").to_number(), 16.0);
        assert_eq!(Value::from(" 0b101 ").to_number(), 5.0);
        assert_eq!(Value::from("0o17").to_number(), 15.0);
        assert!(Value::from("0x").to_number().is_nan());
        assert!(Value::from("0xfg").to_number().is_nan());
        assert!(Value::from("-0x10").to_number().is_nan());
    }

    #[test]
    fn display_matches_loose_number_formatting() {
        assert_eq!(Value::from(2048_i64).to_string(), "2048");
        assert_eq!(Value::from(0.5).to_string(), "0.5");
        assert_eq!(Value::from(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::from(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::from("alex").to_string(), "alex");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn display_switches_to_exponent_notation_at_the_edges() {
        assert_eq!(Value::from(1e21).to_string(), "1e+21");
        assert_eq!(Value::from(1.5e21).to_string(), "1.5e+21");
        assert_eq!(Value::from(1e20).to_string(), "100000000000000000000");
        assert_eq!(Value::from(1e-7).to_string(), "1e-7");
        assert_eq!(Value::from(-2.5e-8).to_string(), "-2.5e-8");
        assert_eq!(Value::from(1e-6).to_string(), "0.000001");
        assert_eq!(Value::from(123.456).to_string(), "123.456");
        assert_eq!(Value::from(-0.0).to_string(), "0");
        assert_eq!(Value::from("1e21").to_number(), 1e21);
        assert_eq!(Value::from(Value::from("1e21").to_number()).to_string(), "1e+21");
    }

    #[test]
    fn serializes_integral_numbers_as_integers() {
        let data = ViewData::from_iter([
            ("id".to_string(), Value::from(5_i64)),
            ("ratio".to_string(), Value::from(0.25)),
            ("broken".to_string(), Value::from(f64::NAN)),
        ]);
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({"id": 5, "ratio": 0.25, "broken": null})
        );
    }

    #[test]
    fn only_scalars_convert_from_json() {
        assert_eq!(Value::try_from(json!("fen")).unwrap(), Value::from("fen"));
        assert_eq!(Value::try_from(json!(1)).unwrap(), Value::from(1_i64));
        assert!(matches!(
            Value::try_from(json!([1, 2])),
            Err(Error::NonScalarValue(_))
        ));
        let data = view_data_from_json(json!({"name": "alex", "state": 1})).unwrap();
        assert_eq!(data.get("state"), Some(&Value::from(1_i64)));
        assert!(view_data_from_json(json!({"nested": {"a": 1}})).is_err());
    }
}
