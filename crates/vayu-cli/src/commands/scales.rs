use serde::Serialize;
use std::borrow::Cow;
use std::path::Path;
use vayu_core::error::VayuError;
use vayu_core::scale::builtin;
use vayu_core::scale::schema::ScaleDef;

use super::{OutputFormat, Settings};
use crate::output;

#[derive(Serialize)]
struct PresetSummary {
    preset: &'static str,
    name: String,
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    default: bool,
}

pub fn list(settings: &Settings) -> Result<(), VayuError> {
    let mut presets = Vec::new();
    for name in builtin::PRESETS {
        let scale = builtin::load_preset(name)?;
        presets.push(PresetSummary {
            preset: *name,
            name: scale.name,
            version: scale.version,
            description: scale.description,
            default: *name == builtin::DEFAULT_PRESET,
        });
    }

    if settings.output == OutputFormat::Json {
        return output::json::print(&presets);
    }

    println!("Available predefined scales:\n");
    for p in &presets {
        let default_marker = if p.default { " [default]" } else { "" };
        println!("  {:<8} {} (v{}){}", p.preset, p.name, p.version, default_marker);
        if let Some(ref desc) = p.description {
            println!("           {}", desc);
        }
        println!();
    }
    Ok(())
}

/// A named preset, or the scale selected by `--scale`/`--scale-file`.
fn selected_scale<'a>(
    settings: &'a Settings,
    preset: Option<&str>,
) -> Result<Cow<'a, ScaleDef>, VayuError> {
    match preset {
        Some(name) => Ok(Cow::Owned(builtin::load_preset(name)?)),
        None => Ok(Cow::Borrowed(settings.classifier.scale())),
    }
}

pub fn explain(settings: &Settings, preset: Option<&str>) -> Result<(), VayuError> {
    let scale = selected_scale(settings, preset)?;
    let scale: &ScaleDef = &scale;

    if settings.output == OutputFormat::Json {
        return output::json::print(scale);
    }

    println!("{} (version {})\n", scale.name, scale.version);
    if let Some(ref desc) = scale.description {
        println!("{}\n", desc);
    }
    println!(
        "This scale sorts AQI readings into {} tiers; gauges fill at {}.\n",
        scale.tiers.len(),
        scale.gauge_max
    );

    output::table::print_tiers(scale);
    println!();
    Ok(())
}

pub fn validate(settings: &Settings, file: &Path) -> Result<(), VayuError> {
    let scale = vayu_core::scale::load_scale(file)?;

    let mut warnings = Vec::new();
    for tier in scale.tiers.iter().chain(std::iter::once(&scale.no_data)) {
        if !tier.color.starts_with('#') {
            warnings.push(format!(
                "tier '{}' color '{}' is not a hex color",
                tier.label, tier.color
            ));
        }
    }

    if settings.output == OutputFormat::Json {
        return output::json::print(&serde_json::json!({
            "valid": true,
            "scale": scale,
            "warnings": warnings,
        }));
    }

    println!("Scale '{}' (v{}) is valid.", scale.name, scale.version);
    println!(
        "  Tiers: {}",
        scale
            .tiers
            .iter()
            .map(|t| t.label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CUSTOM: &str = r##"{
        "name": "Site scale",
        "version": "1",
        "gauge_max": 200,
        "tiers": [
            { "lower_bound": 0, "label": "Clean", "color": "#00FF00", "icon": "+", "advice": "Fine." },
            { "lower_bound": 100, "label": "Dirty", "color": "#FF0000", "icon": "!", "advice": "Stay in." }
        ],
        "no_data": { "lower_bound": 0, "label": "No Data", "color": "#999", "icon": "?", "advice": "None." }
    }"##;

    #[test]
    fn test_explain_defaults_to_active_scale_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CUSTOM.as_bytes()).unwrap();
        let settings = Settings::load(None, Some(file.path()), "json", None, None).unwrap();

        assert_eq!(selected_scale(&settings, None).unwrap().name, "Site scale");
        assert_eq!(
            selected_scale(&settings, Some("compact")).unwrap().tiers.len(),
            5
        );
    }

    #[test]
    fn test_json_output_selected() {
        let settings = Settings::load(Some("compact"), None, "json", None, None).unwrap();
        assert_eq!(settings.output, OutputFormat::Json);
        assert!(explain(&settings, None).is_ok());
        assert!(list(&settings).is_ok());
    }

    #[test]
    fn test_unknown_preset_is_error() {
        let settings = Settings::load(None, None, "table", None, None).unwrap();
        assert!(selected_scale(&settings, Some("who")).is_err());
    }
}
