use vayu_core::error::VayuError;
use vayu_core::pollutant::{known_codes, resolve_pollutant, PollutantDescriptor};

use super::{OutputFormat, Settings};
use crate::output;

pub fn run(settings: &Settings, codes: &[String]) -> Result<(), VayuError> {
    let descriptors: Vec<PollutantDescriptor> = if codes.is_empty() {
        known_codes().into_iter().map(resolve_pollutant).collect()
    } else {
        codes.iter().map(|c| resolve_pollutant(c)).collect()
    };

    match settings.output {
        OutputFormat::Json => output::json::print(&descriptors)?,
        OutputFormat::Table => output::table::print_pollutants(&descriptors),
    }
    Ok(())
}
