use crate::error::VayuError;
use crate::rankings::RankingDataset;

const AQI_2024_JSON: &str = include_str!("../../../../data/aqi-2024.json");
const PM25_2024_JSON: &str = include_str!("../../../../data/pm25-2024.json");

/// Bundled historical datasets.
pub const DATASETS: &[&str] = &["aqi-2024", "pm25-2024"];

pub const DEFAULT_DATASET: &str = "aqi-2024";

/// Load a bundled dataset by name.
pub fn load_dataset(name: &str) -> Result<RankingDataset, VayuError> {
    let json = match name {
        "aqi-2024" => AQI_2024_JSON,
        "pm25-2024" => PM25_2024_JSON,
        _ => {
            return Err(VayuError::DatasetInvalid(format!(
                "unknown dataset '{}'. Available: {}",
                name,
                DATASETS.join(", ")
            )))
        }
    };
    super::parse_dataset_str(json)
}
