use crate::error::VayuError;
use crate::scale::schema::ScaleDef;

const EPA_JSON: &str = include_str!("../../../../scales/epa.json");
const COMPACT_JSON: &str = include_str!("../../../../scales/compact.json");

/// Available predefined scales.
pub const PRESETS: &[&str] = &["epa", "compact"];

/// Scale used when none is requested explicitly.
pub const DEFAULT_PRESET: &str = "epa";

/// Load a predefined scale by name.
pub fn load_preset(name: &str) -> Result<ScaleDef, VayuError> {
    let json = match name {
        "epa" => EPA_JSON,
        "compact" => COMPACT_JSON,
        _ => {
            return Err(VayuError::ScaleInvalid(format!(
                "unknown preset '{}'. Available: {}",
                name,
                PRESETS.join(", ")
            )))
        }
    };
    super::parse_scale_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_epa_preset() {
        let scale = load_preset("epa").unwrap();
        let bounds: Vec<u32> = scale.tiers.iter().map(|t| t.lower_bound).collect();
        assert_eq!(bounds, vec![0, 51, 101, 151, 201, 301]);
        assert_eq!(scale.gauge_max, 300.0);
        assert_eq!(scale.no_data.label, "No Data");
    }

    #[test]
    fn test_load_compact_preset() {
        let scale = load_preset("compact").unwrap();
        let bounds: Vec<u32> = scale.tiers.iter().map(|t| t.lower_bound).collect();
        assert_eq!(bounds, vec![0, 51, 101, 151, 201]);
        assert_eq!(scale.tiers.last().unwrap().label, "Hazardous");
    }

    #[test]
    fn test_unknown_preset() {
        let err = load_preset("who").unwrap_err();
        assert!(err.to_string().contains("epa, compact"));
    }

    #[test]
    fn test_default_preset_is_listed() {
        assert!(PRESETS.contains(&DEFAULT_PRESET));
    }
}
