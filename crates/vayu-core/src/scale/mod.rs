pub mod builtin;
pub mod schema;

use crate::error::VayuError;
use schema::ScaleDef;
use std::path::Path;

/// Load a scale from a JSON file.
pub fn load_scale(path: &Path) -> Result<ScaleDef, VayuError> {
    let content = std::fs::read_to_string(path).map_err(|e| VayuError::ScaleLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_scale(&content, path)
}

/// Parse a scale from a JSON string.
pub fn parse_scale(json: &str, source: &Path) -> Result<ScaleDef, VayuError> {
    let scale: ScaleDef = serde_json::from_str(json).map_err(|e| VayuError::ScaleLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_scale(&scale)?;
    Ok(scale)
}

/// Parse a scale from a JSON string (no file path context).
pub fn parse_scale_str(json: &str) -> Result<ScaleDef, VayuError> {
    let scale: ScaleDef = serde_json::from_str(json)?;
    validate_scale(&scale)?;
    Ok(scale)
}

/// Validate that a scale partitions `[0, +inf)` without gaps or overlaps.
pub fn validate_scale(scale: &ScaleDef) -> Result<(), VayuError> {
    let first = scale
        .tiers
        .first()
        .ok_or_else(|| VayuError::ScaleInvalid("tiers must not be empty".into()))?;

    if first.lower_bound != 0 {
        return Err(VayuError::ScaleInvalid(format!(
            "first tier '{}' must start at 0, not {}",
            first.label, first.lower_bound
        )));
    }

    for pair in scale.tiers.windows(2) {
        if pair[1].lower_bound <= pair[0].lower_bound {
            return Err(VayuError::ScaleInvalid(format!(
                "tier '{}' (lower bound {}) must start above tier '{}' (lower bound {})",
                pair[1].label, pair[1].lower_bound, pair[0].label, pair[0].lower_bound
            )));
        }
    }

    for tier in scale.tiers.iter().chain(std::iter::once(&scale.no_data)) {
        if tier.label.trim().is_empty() {
            return Err(VayuError::ScaleInvalid(format!(
                "tier starting at {} has an empty label",
                tier.lower_bound
            )));
        }
    }

    if !scale.gauge_max.is_finite() || scale.gauge_max <= 0.0 {
        return Err(VayuError::ScaleInvalid(format!(
            "gauge_max must be a positive number, got {}",
            scale.gauge_max
        )));
    }

    Ok(())
}
