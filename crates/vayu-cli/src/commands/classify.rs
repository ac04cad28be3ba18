use serde::Serialize;
use vayu_core::error::VayuError;
use vayu_core::model::AqiValue;
use vayu_core::parsing::values::parse_numeric_str;
use vayu_core::scale::schema::TierDef;

use super::{OutputFormat, Settings};
use crate::output;

#[derive(Serialize)]
struct Classified<'a> {
    input: &'a str,
    aqi: AqiValue,
    gauge_fraction: f64,
    tier: &'a TierDef,
}

pub fn run(settings: &Settings, values: &[String]) -> Result<(), VayuError> {
    let classifier = &settings.classifier;

    let rows: Vec<Classified> = values
        .iter()
        .map(|input| {
            let aqi = match parse_numeric_str(input) {
                Some(v) => AqiValue::Measured(v),
                None => AqiValue::Unavailable,
            };
            Classified {
                input,
                aqi,
                gauge_fraction: classifier.gauge_fraction_value(&aqi),
                tier: classifier.classify_value(&aqi),
            }
        })
        .collect();

    match settings.output {
        OutputFormat::Json => output::json::print(&rows)?,
        OutputFormat::Table => {
            let width = output::table::column_width(rows.iter().map(|r| r.input), 3);
            for r in &rows {
                println!(
                    "  {:>width$}  {} {:<32} {}  {}",
                    r.input,
                    r.tier.icon,
                    r.tier.label,
                    output::table::gauge_bar(r.gauge_fraction, 20),
                    r.tier.color,
                    width = width
                );
            }
        }
    }

    Ok(())
}
