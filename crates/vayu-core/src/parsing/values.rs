use crate::model::AqiValue;
use serde_json::Value;

/// Parse an upstream AQI field into an AqiValue.
///
/// Handles formats like:
/// - `142` -> Measured(142)
/// - `"142"` -> Measured(142)
/// - `"-"`, `null`, `""` -> Unavailable
pub fn parse_aqi_value(v: &Value) -> AqiValue {
    match parse_number(v) {
        Some(n) => AqiValue::Measured(n),
        None => AqiValue::Unavailable,
    }
}

/// Parse a JSON number or numeric string. Non-finite results are rejected.
pub fn parse_number(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_numeric_str(s)?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Parse a numeric string, treating the sentinel markers as no value.
pub fn parse_numeric_str(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() || s == "-" || s == "—" || s.eq_ignore_ascii_case("n/a") {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}
