use std::path::Path;
use vayu_core::config::SourceConfig;
use vayu_core::error::VayuError;
use vayu_core::source::waqi::WaqiClient;
use vayu_core::source::{FeedSource, StationQuery};

use super::{OutputFormat, Settings};
use crate::output;

pub fn run(settings: &Settings, input_file: &Path) -> Result<(), VayuError> {
    let json = std::fs::read_to_string(input_file)?;
    let report = vayu_core::report_feed_json(&json, &settings.classifier, &settings.format)?;

    match settings.output {
        OutputFormat::Json => output::json::print(&report)?,
        OutputFormat::Table => output::table::print_report(&report),
    }
    Ok(())
}

pub fn live(
    settings: &Settings,
    queries: &[String],
    token: Option<String>,
    workers: Option<usize>,
) -> Result<(), VayuError> {
    let mut config = SourceConfig::from_env_with_token(token)?;
    if let Some(w) = workers {
        config.workers = w;
    }
    config.validate()?;
    config.log_config();

    let queries = queries
        .iter()
        .map(|q| StationQuery::parse(q))
        .collect::<Result<Vec<_>, _>>()?;

    let client = WaqiClient::new(&config)?;
    tracing::info!(
        backend = client.backend_name(),
        stations = queries.len(),
        "fetching feeds"
    );

    let outcomes = vayu_core::fetch_reports(
        &client,
        &queries,
        &settings.classifier,
        &settings.format,
        config.workers,
    );

    match settings.output {
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = outcomes
                .iter()
                .map(|o| match &o.result {
                    Ok(report) => serde_json::json!({ "query": o.query, "report": report }),
                    Err(e) => serde_json::json!({ "query": o.query, "error": e }),
                })
                .collect();
            output::json::print(&rows)?;
        }
        OutputFormat::Table => output::table::print_outcomes(&outcomes),
    }

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed == outcomes.len() {
        return Err(VayuError::Request(format!(
            "all {failed} station requests failed"
        )));
    }
    Ok(())
}
