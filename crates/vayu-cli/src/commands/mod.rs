pub mod advice;
pub mod classify;
pub mod pollutants;
pub mod rankings;
pub mod report;
pub mod scales;

use std::path::Path;
use vayu_core::error::VayuError;
use vayu_core::format::{parse_offset, FormatOptions};
use vayu_core::scale::builtin;
use vayu_core::Classifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Options shared by every command.
pub struct Settings {
    pub classifier: Classifier,
    pub format: FormatOptions,
    pub output: OutputFormat,
}

impl Settings {
    pub fn load(
        preset: Option<&str>,
        scale_file: Option<&Path>,
        output: &str,
        tz: Option<&str>,
        time_format: Option<&str>,
    ) -> Result<Settings, VayuError> {
        let scale = match scale_file {
            Some(path) => vayu_core::scale::load_scale(path)?,
            None => builtin::load_preset(preset.unwrap_or(builtin::DEFAULT_PRESET))?,
        };
        tracing::debug!(scale = %scale.name, version = %scale.version, "scale loaded");
        let classifier = Classifier::new(scale)?;

        let mut format = FormatOptions::default();
        if let Some(tz) = tz {
            format.offset = parse_offset(tz).ok_or_else(|| {
                VayuError::Config(format!("invalid UTC offset '{tz}' (expected e.g. +05:30)"))
            })?;
        }
        if let Some(pattern) = time_format {
            format.pattern = pattern.to_string();
        }

        let output = match output {
            "json" => OutputFormat::Json,
            "table" => OutputFormat::Table,
            other => {
                return Err(VayuError::Config(format!(
                    "unknown output format '{other}' (expected table or json)"
                )))
            }
        };

        Ok(Settings {
            classifier,
            format,
            output,
        })
    }
}
