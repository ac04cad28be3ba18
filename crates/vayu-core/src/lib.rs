pub mod advice;
pub mod classify;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod parsing;
pub mod pollutant;
pub mod rankings;
pub mod scale;
pub mod source;

pub use classify::{classify, gauge_fraction, Classifier};
pub use format::{format_timestamp, FormatOptions};
pub use pollutant::resolve_pollutant;

use classify::outcome::{FetchOutcome, ForecastRow, PollutantRow, StationReport};
use error::VayuError;
use format::{format_reading, format_timestamp_in};
use model::StationFeed;
use pollutant::{display_rank, is_pollutant};
use scale::schema::TierDef;
use source::{FeedSource, StationQuery};

const OUTDOOR_CAUTION: &str = "Consider reducing outdoor activities.";

/// Main API entry point: parse a feed payload and build its station report.
pub fn report_feed_json(
    json: &str,
    classifier: &Classifier,
    opts: &FormatOptions,
) -> Result<StationReport, VayuError> {
    let feed = parsing::parse_feed(json)?;
    Ok(build_report(&feed, classifier, opts))
}

/// Build the display report for an already-parsed feed.
///
/// Air pollutants come first in resolver table order, followed by weather
/// and unrecognised readings.
pub fn build_report(
    feed: &StationFeed,
    classifier: &Classifier,
    opts: &FormatOptions,
) -> StationReport {
    let tier = classifier.classify_value(&feed.aqi).clone();

    let mut codes: Vec<&String> = feed.readings.keys().collect();
    codes.sort_by(|a, b| display_rank(a).cmp(&display_rank(b)).then(a.cmp(b)));

    let mut pollutants = Vec::new();
    let mut weather = Vec::new();
    for code in codes {
        let value = feed.readings[code];
        let row = pollutant_row(code, value);
        if is_pollutant(code) {
            pollutants.push(row);
        } else {
            weather.push(row);
        }
    }

    let forecast = feed
        .forecast
        .iter()
        .map(|day| ForecastRow {
            code: day.code.clone(),
            name: resolve_pollutant(&day.code).display_name,
            day: day.day.clone(),
            avg: day.avg,
            min: day.min,
            max: day.max,
            tier_label: classifier.classify(day.avg).label.clone(),
        })
        .collect();

    StationReport {
        station: feed.station.clone(),
        geo: feed.geo,
        aqi: feed.aqi,
        gauge_fraction: classifier.gauge_fraction_value(&feed.aqi),
        dominant_pollutant: feed.dominant_pollutant.as_deref().map(resolve_pollutant),
        pollutants,
        weather,
        updated: format_timestamp_in(feed.time, feed.tz.as_deref(), opts),
        health_tip: health_tip(&tier, feed.aqi.is_unavailable()),
        forecast,
        attributions: feed.attributions.clone(),
        tier,
    }
}

fn pollutant_row(code: &str, value: f64) -> PollutantRow {
    let d = resolve_pollutant(code);
    PollutantRow {
        line: format!("{}: {}", d.display_name, format_reading(value, &d.unit)),
        code: d.code,
        name: d.display_name,
        value,
        unit: d.unit,
    }
}

fn health_tip(tier: &TierDef, unavailable: bool) -> String {
    if unavailable {
        return tier.advice.clone();
    }
    let mut tip = format!("{} air quality. {}", tier.label, tier.advice);
    if tier.outdoor_caution {
        tip.push(' ');
        tip.push_str(OUTDOOR_CAUTION);
    }
    tip
}

/// Fetch and report many stations with bounded concurrency.
///
/// Each query yields one outcome, in input order; failures are reported per
/// query and never abort the batch.
pub fn fetch_reports(
    source: &dyn FeedSource,
    queries: &[StationQuery],
    classifier: &Classifier,
    opts: &FormatOptions,
    workers: usize,
) -> Vec<FetchOutcome> {
    let payloads = source::fetch_all(source, queries, workers);

    queries
        .iter()
        .zip(payloads)
        .map(|(query, payload)| {
            let result = payload
                .and_then(|json| report_feed_json(&json, classifier, opts))
                .map_err(|e| e.to_string());
            FetchOutcome {
                query: query.to_string(),
                result,
            }
        })
        .collect()
}
