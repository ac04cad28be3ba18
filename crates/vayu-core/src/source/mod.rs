pub mod waqi;

use crate::error::VayuError;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

/// What to look up on the feed API.
#[derive(Debug, Clone, PartialEq)]
pub enum StationQuery {
    /// City name, e.g. "Delhi".
    City(String),
    /// Upstream station id, written `@1437`.
    Station(String),
    Geo { lat: f64, lon: f64 },
    /// Nearest station to the caller's IP address.
    Here,
}

impl StationQuery {
    /// Parse a query as typed by a user.
    ///
    /// - `@1437` -> Station
    /// - `geo:28.6;77.2` -> Geo
    /// - `here` -> Here
    /// - anything else -> City
    pub fn parse(s: &str) -> Result<StationQuery, VayuError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(VayuError::Config("empty station query".into()));
        }
        if s.eq_ignore_ascii_case("here") {
            return Ok(StationQuery::Here);
        }
        if let Some(id) = s.strip_prefix('@') {
            if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
                return Err(VayuError::Config(format!("invalid station id '{s}'")));
            }
            return Ok(StationQuery::Station(id.to_string()));
        }
        if let Some(coords) = s.strip_prefix("geo:") {
            let parsed: Option<(f64, f64)> = coords
                .split_once(';')
                .and_then(|(lat, lon)| Some((lat.trim().parse().ok()?, lon.trim().parse().ok()?)));
            return match parsed {
                Some((lat, lon)) if valid_coords(lat, lon) => Ok(StationQuery::Geo { lat, lon }),
                _ => Err(VayuError::Config(format!(
                    "invalid coordinates '{coords}' (expected geo:LAT;LON)"
                ))),
            };
        }
        Ok(StationQuery::City(s.to_string()))
    }

    /// The unencoded feed path segment for this query.
    pub fn path_segment(&self) -> String {
        match self {
            StationQuery::City(name) => name.clone(),
            StationQuery::Station(id) => format!("@{id}"),
            StationQuery::Geo { lat, lon } => format!("geo:{lat};{lon}"),
            StationQuery::Here => "here".to_string(),
        }
    }
}

fn valid_coords(lat: f64, lon: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

impl fmt::Display for StationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path_segment())
    }
}

/// Trait for station feed backends.
pub trait FeedSource: Send + Sync {
    /// Fetch the raw JSON payload for one query.
    fn fetch_feed(&self, query: &StationQuery) -> Result<String, VayuError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Fetch many queries with at most `workers` requests in flight.
///
/// Results come back in input order. A failed query only affects its own
/// entry; there is no retry and no cancellation.
pub fn fetch_all(
    source: &dyn FeedSource,
    queries: &[StationQuery],
    workers: usize,
) -> Vec<Result<String, VayuError>> {
    if queries.is_empty() {
        return Vec::new();
    }
    let workers = workers.clamp(1, queries.len());
    tracing::debug!(
        backend = source.backend_name(),
        queries = queries.len(),
        workers,
        "fetching feeds"
    );

    let next = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel();

    thread::scope(|s| {
        for _ in 0..workers {
            let tx = tx.clone();
            let next = &next;
            s.spawn(move || loop {
                let i = next.fetch_add(1, Ordering::Relaxed);
                let Some(query) = queries.get(i) else {
                    break;
                };
                let result = source.fetch_feed(query);
                match &result {
                    Ok(_) => tracing::info!(query = %query, "fetched feed"),
                    Err(e) => tracing::warn!(query = %query, error = %e, "feed fetch failed"),
                }
                if tx.send((i, result)).is_err() {
                    break;
                }
            });
        }
    });
    drop(tx);

    let mut slots: Vec<Option<Result<String, VayuError>>> = queries.iter().map(|_| None).collect();
    for (i, result) in rx {
        slots[i] = Some(result);
    }
    slots
        .into_iter()
        .map(|slot| {
            slot.unwrap_or_else(|| Err(VayuError::Request("query was never fetched".into())))
        })
        .collect()
}
