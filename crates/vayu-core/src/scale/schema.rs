use serde::{Deserialize, Serialize};

/// A severity scale mapping AQI values to display tiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// AQI value at which a gauge is drawn full.
    pub gauge_max: f64,
    /// Tiers ordered from cleanest to most severe.
    pub tiers: Vec<TierDef>,
    /// Pseudo-tier used for missing or unusable readings.
    pub no_data: TierDef,
}

/// One band of a severity scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierDef {
    /// Inclusive AQI value where this tier begins.
    pub lower_bound: u32,
    pub label: String,
    pub color: String,
    pub icon: String,
    pub advice: String,
    /// Whether outdoor activity should be reduced at this level.
    #[serde(default)]
    pub outdoor_caution: bool,
}
