use vayu_core::advice;
use vayu_core::error::VayuError;

use super::{OutputFormat, Settings};
use crate::output;

pub fn run(settings: &Settings, condition: Option<&str>) -> Result<(), VayuError> {
    match condition {
        Some(name) => {
            let found = advice::require_advice(name)?;
            match settings.output {
                OutputFormat::Json => output::json::print(found)?,
                OutputFormat::Table => output::table::print_advice(found),
            }
        }
        None => match settings.output {
            OutputFormat::Json => output::json::print(&advice::book().categories)?,
            OutputFormat::Table => output::table::print_conditions(advice::book()),
        },
    }
    Ok(())
}
