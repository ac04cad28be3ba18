use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::format::format_value;
use crate::parsing::values::parse_aqi_value;

/// An AQI reading as reported by a station.
///
/// Stations without an active sensor report `"-"` instead of a number; that
/// is represented as `Unavailable` rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AqiValue {
    Measured(f64),
    #[default]
    Unavailable,
}

impl AqiValue {
    /// Returns the measured value, if any.
    pub fn numeric(&self) -> Option<f64> {
        match self {
            AqiValue::Measured(v) => Some(*v),
            AqiValue::Unavailable => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, AqiValue::Unavailable)
    }
}

impl From<f64> for AqiValue {
    fn from(v: f64) -> Self {
        AqiValue::Measured(v)
    }
}

impl fmt::Display for AqiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AqiValue::Measured(v) => write!(f, "{}", format_value(*v)),
            AqiValue::Unavailable => write!(f, "-"),
        }
    }
}

impl Serialize for AqiValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AqiValue::Measured(v) if v.is_finite() => serializer.serialize_f64(*v),
            _ => serializer.serialize_str("-"),
        }
    }
}

impl<'de> Deserialize<'de> for AqiValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(raw.as_ref().map(parse_aqi_value).unwrap_or_default())
    }
}

/// One day of a per-pollutant forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Pollutant code (e.g., "pm25", "o3").
    pub code: String,
    /// Calendar day as `YYYY-MM-DD`.
    pub day: String,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

/// A validated station feed, decoupled from the upstream JSON shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationFeed {
    /// Station or city display name.
    pub station: String,
    /// Upstream station index, when provided.
    #[serde(default)]
    pub station_idx: Option<i64>,
    /// Latitude and longitude.
    #[serde(default)]
    pub geo: Option<(f64, f64)>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub aqi: AqiValue,
    /// Individual readings keyed by pollutant or weather code.
    #[serde(default)]
    pub readings: BTreeMap<String, f64>,
    #[serde(default)]
    pub dominant_pollutant: Option<String>,
    /// Measurement time in Unix seconds.
    #[serde(default)]
    pub time: Option<i64>,
    /// Station-local UTC offset, e.g. "+05:30".
    #[serde(default)]
    pub tz: Option<String>,
    #[serde(default)]
    pub forecast: Vec<ForecastDay>,
    #[serde(default)]
    pub attributions: Vec<String>,
}
