use crate::model::AqiValue;
use crate::pollutant::PollutantDescriptor;
use crate::scale::schema::TierDef;
use serde::{Deserialize, Serialize};

/// One rendered reading row, e.g. "PM2.5: 88 µg/m³".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollutantRow {
    pub code: String,
    /// Short display name.
    pub name: String,
    pub value: f64,
    /// Unit string for display; may be empty.
    pub unit: String,
    /// Ready-to-print line.
    pub line: String,
}

/// One forecast day for one pollutant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRow {
    pub code: String,
    pub name: String,
    pub day: String,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    /// Tier label of the day's average.
    pub tier_label: String,
}

/// Everything needed to render one station card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationReport {
    pub station: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<(f64, f64)>,
    pub aqi: AqiValue,
    /// Tier of the overall AQI ("No Data" when unavailable).
    pub tier: TierDef,
    /// Gauge fill in `[0, 1]`.
    pub gauge_fraction: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_pollutant: Option<PollutantDescriptor>,
    /// Air pollutant rows, in display order.
    pub pollutants: Vec<PollutantRow>,
    /// Weather rows (temperature, humidity, ...), in display order.
    pub weather: Vec<PollutantRow>,
    /// Formatted measurement time, or the placeholder.
    pub updated: String,
    pub health_tip: String,
    pub forecast: Vec<ForecastRow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributions: Vec<String>,
}

/// Outcome of fetching and reporting one station query.
#[derive(Debug)]
pub struct FetchOutcome {
    /// The query as given by the caller.
    pub query: String,
    pub result: Result<StationReport, String>,
}
