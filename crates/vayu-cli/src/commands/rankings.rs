use vayu_core::error::VayuError;
use vayu_core::rankings::{self, builtin, RankingSort};

use super::{OutputFormat, Settings};
use crate::output;

pub fn run(
    settings: &Settings,
    dataset: Option<&str>,
    top: Option<usize>,
    sort: &str,
    city: Option<&str>,
) -> Result<(), VayuError> {
    let ds = builtin::load_dataset(dataset.unwrap_or(builtin::DEFAULT_DATASET))?;

    if let Some(name) = city {
        let found = ds.find(name).ok_or_else(|| {
            VayuError::DatasetInvalid(format!("city '{}' is not in dataset '{}'", name, ds.name))
        })?;
        match settings.output {
            OutputFormat::Json => output::json::print(found)?,
            OutputFormat::Table => output::table::print_city(&ds, found, &settings.classifier),
        }
        return Ok(());
    }

    let key = RankingSort::from_str_loose(sort).ok_or_else(|| {
        VayuError::Config(format!(
            "unknown sort key '{sort}' (expected rank, avg, peak or name)"
        ))
    })?;

    let mut cities = ds.sorted_by(key);
    if let Some(n) = top {
        cities.truncate(n);
    }
    let rows = rankings::classify_cities(&cities, &settings.classifier);

    match settings.output {
        OutputFormat::Json => output::json::print(&rows)?,
        OutputFormat::Table => output::table::print_rankings(&ds, &rows),
    }
    Ok(())
}
