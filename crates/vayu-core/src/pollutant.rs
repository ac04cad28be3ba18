use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Display information for a measured quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollutantDescriptor {
    /// Upstream key, e.g. "pm25" or "t".
    pub code: String,
    /// Short label, e.g. "PM2.5" or "NO₂".
    pub display_name: String,
    /// Descriptive label, e.g. "Nitrogen Dioxide (NO₂)".
    pub long_name: String,
    /// Measurement unit; empty when unknown.
    pub unit: String,
}

struct Entry {
    code: &'static str,
    display_name: &'static str,
    long_name: &'static str,
    unit: &'static str,
    chemical: bool,
}

const fn entry(
    code: &'static str,
    display_name: &'static str,
    long_name: &'static str,
    unit: &'static str,
    chemical: bool,
) -> Entry {
    Entry {
        code,
        display_name,
        long_name,
        unit,
        chemical,
    }
}

/// Table order is also the display order for report rows.
static TABLE: &[Entry] = &[
    entry("pm25", "PM2.5", "Fine particulate matter (PM2.5)", "µg/m³", true),
    entry("pm10", "PM10", "Coarse particulate matter (PM10)", "µg/m³", true),
    entry("o3", "O₃", "Ozone (O₃)", "ppb", true),
    entry("no2", "NO₂", "Nitrogen Dioxide (NO₂)", "ppb", true),
    entry("so2", "SO₂", "Sulfur Dioxide (SO₂)", "ppb", true),
    entry("co", "CO", "Carbon Monoxide (CO)", "ppm", true),
    entry("t", "Temperature", "Temperature", "°C", false),
    entry("w", "Wind", "Wind", "m/s", false),
    entry("r", "Rain", "Rain", "mm", false),
    entry("h", "Humidity", "Humidity", "%", false),
    entry("d", "Dew", "Dew point", "°C", false),
    entry("p", "Atmospheric Pressure", "Atmospheric Pressure", "hPa", false),
];

static INDEX: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    TABLE
        .iter()
        .enumerate()
        .map(|(i, e)| (e.code, i))
        .collect()
});

/// Resolve a pollutant code to its display name and unit.
///
/// Lookup is exact and case-sensitive. Unknown codes resolve to a descriptor
/// that uses the code itself as the name and an empty unit.
pub fn resolve_pollutant(code: &str) -> PollutantDescriptor {
    match INDEX.get(code) {
        Some(&i) => {
            let e = &TABLE[i];
            PollutantDescriptor {
                code: e.code.to_string(),
                display_name: e.display_name.to_string(),
                long_name: e.long_name.to_string(),
                unit: e.unit.to_string(),
            }
        }
        None => PollutantDescriptor {
            code: code.to_string(),
            display_name: code.to_string(),
            long_name: code.to_string(),
            unit: String::new(),
        },
    }
}

/// All codes in the resolver table, in display order.
pub fn known_codes() -> Vec<&'static str> {
    TABLE.iter().map(|e| e.code).collect()
}

/// True for air pollutants, false for weather readings and unknown codes.
pub fn is_pollutant(code: &str) -> bool {
    INDEX.get(code).is_some_and(|&i| TABLE[i].chemical)
}

/// Sort key placing known codes in table order, then unknown codes.
pub(crate) fn display_rank(code: &str) -> usize {
    INDEX.get(code).copied().unwrap_or(TABLE.len())
}
