pub mod values;

use crate::error::VayuError;
use crate::model::{ForecastDay, StationFeed};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use values::{parse_aqi_value, parse_number};

/// Name used when a feed carries no city name.
pub const UNNAMED_STATION: &str = "Unknown station";

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawData {
    aqi: Option<Value>,
    idx: Option<Value>,
    attributions: Option<Vec<RawAttribution>>,
    city: Option<RawCity>,
    dominentpol: Option<String>,
    iaqi: Option<BTreeMap<String, RawIaqi>>,
    time: Option<RawTime>,
    forecast: Option<RawForecast>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAttribution {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCity {
    name: Option<String>,
    geo: Option<Vec<Value>>,
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawIaqi {
    v: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTime {
    v: Option<Value>,
    tz: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawForecast {
    daily: Option<BTreeMap<String, Vec<RawForecastDay>>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawForecastDay {
    day: Option<String>,
    avg: Option<Value>,
    min: Option<Value>,
    max: Option<Value>,
}

/// Parse a station feed payload into a validated StationFeed.
///
/// The payload must carry `"status": "ok"`. Every optional field falls back
/// to a defined default, so downstream code never probes raw JSON.
pub fn parse_feed(json: &str) -> Result<StationFeed, VayuError> {
    let envelope: Envelope = serde_json::from_str(json)?;

    if envelope.status != "ok" {
        let message = match envelope.data {
            Some(Value::String(s)) if !s.trim().is_empty() => s,
            _ => format!("status '{}'", envelope.status),
        };
        return Err(VayuError::FeedStatus(message));
    }

    let data = match envelope.data {
        Some(v @ Value::Object(_)) => v,
        _ => return Err(VayuError::FeedParse("missing 'data' object".into())),
    };
    let raw: RawData =
        serde_json::from_value(data).map_err(|e| VayuError::FeedParse(e.to_string()))?;

    Ok(into_feed(raw))
}

fn into_feed(raw: RawData) -> StationFeed {
    let city = raw.city.unwrap_or_default();
    let station = city
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| UNNAMED_STATION.to_string());

    let geo = city.geo.as_deref().and_then(|g| match g {
        [lat, lon, ..] => Some((parse_number(lat)?, parse_number(lon)?)),
        _ => None,
    });

    let mut readings = BTreeMap::new();
    for (code, entry) in raw.iaqi.unwrap_or_default() {
        match entry.v.as_ref().and_then(parse_number) {
            Some(v) => {
                readings.insert(code, v);
            }
            None => tracing::debug!(code = %code, "skipping non-numeric reading"),
        }
    }

    let time = raw.time.unwrap_or_default();

    StationFeed {
        station,
        station_idx: raw.idx.as_ref().and_then(parse_number).map(|n| n as i64),
        geo,
        url: city.url.filter(|u| !u.is_empty()),
        aqi: raw.aqi.as_ref().map(parse_aqi_value).unwrap_or_default(),
        readings,
        dominant_pollutant: raw.dominentpol.filter(|p| !p.trim().is_empty()),
        time: time.v.as_ref().and_then(parse_number).map(|n| n as i64),
        tz: time.tz.filter(|t| !t.trim().is_empty()),
        forecast: flatten_forecast(raw.forecast),
        attributions: raw
            .attributions
            .unwrap_or_default()
            .into_iter()
            .filter_map(|a| a.name)
            .collect(),
    }
}

fn flatten_forecast(forecast: Option<RawForecast>) -> Vec<ForecastDay> {
    let daily = forecast.and_then(|f| f.daily).unwrap_or_default();

    let mut days = Vec::new();
    for (code, entries) in daily {
        for entry in entries {
            let (Some(day), Some(avg)) = (entry.day, entry.avg.as_ref().and_then(parse_number))
            else {
                tracing::debug!(code = %code, "skipping incomplete forecast entry");
                continue;
            };
            let min = entry.min.as_ref().and_then(parse_number).unwrap_or(avg);
            let max = entry.max.as_ref().and_then(parse_number).unwrap_or(avg);
            days.push(ForecastDay {
                code: code.clone(),
                day,
                avg,
                min,
                max,
            });
        }
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AqiValue;

    const DELHI: &str = r#"{
        "status": "ok",
        "data": {
            "aqi": 142,
            "idx": 1437,
            "attributions": [{ "url": "https://cpcb.nic.in/", "name": "CPCB - India Central Pollution Control Board" }],
            "city": { "geo": [28.63576, 77.22445], "name": "Delhi", "url": "https://aqicn.org/city/delhi" },
            "dominentpol": "pm25",
            "iaqi": { "pm25": { "v": 88 }, "no2": { "v": 21 }, "t": { "v": 24.5 } },
            "time": { "s": "2023-11-15 03:43:20", "tz": "+05:30", "v": 1700000000 },
            "forecast": { "daily": { "pm25": [
                { "avg": 160, "day": "2023-11-15", "max": 190, "min": 138 },
                { "avg": 171, "day": "2023-11-16", "max": 200, "min": 150 }
            ] } }
        }
    }"#;

    #[test]
    fn test_parse_full_feed() {
        let feed = parse_feed(DELHI).unwrap();
        assert_eq!(feed.station, "Delhi");
        assert_eq!(feed.station_idx, Some(1437));
        assert_eq!(feed.aqi, AqiValue::Measured(142.0));
        assert_eq!(feed.geo, Some((28.63576, 77.22445)));
        assert_eq!(feed.readings.get("pm25"), Some(&88.0));
        assert_eq!(feed.readings.get("t"), Some(&24.5));
        assert_eq!(feed.dominant_pollutant.as_deref(), Some("pm25"));
        assert_eq!(feed.time, Some(1_700_000_000));
        assert_eq!(feed.tz.as_deref(), Some("+05:30"));
        assert_eq!(feed.forecast.len(), 2);
        assert_eq!(feed.forecast[1].max, 200.0);
        assert_eq!(feed.attributions.len(), 1);
    }

    #[test]
    fn test_dash_aqi_is_unavailable() {
        let feed = parse_feed(r#"{ "status": "ok", "data": { "aqi": "-", "city": { "name": "Silent" } } }"#)
            .unwrap();
        assert!(feed.aqi.is_unavailable());
        assert!(feed.readings.is_empty());
        assert!(feed.forecast.is_empty());
        assert_eq!(feed.time, None);
    }

    #[test]
    fn test_minimal_feed_defaults() {
        let feed = parse_feed(r#"{ "status": "ok", "data": {} }"#).unwrap();
        assert_eq!(feed.station, UNNAMED_STATION);
        assert!(feed.aqi.is_unavailable());
        assert_eq!(feed.geo, None);
        assert_eq!(feed.dominant_pollutant, None);
    }

    #[test]
    fn test_null_sections_tolerated() {
        let json = r#"{ "status": "ok", "data": { "aqi": 30, "city": null, "iaqi": null, "time": null, "forecast": null } }"#;
        let feed = parse_feed(json).unwrap();
        assert_eq!(feed.aqi, AqiValue::Measured(30.0));
        assert_eq!(feed.station, UNNAMED_STATION);
    }

    #[test]
    fn test_non_numeric_reading_skipped() {
        let json = r#"{ "status": "ok", "data": { "aqi": 30, "iaqi": { "pm10": { "v": "-" }, "o3": { "v": 12 } } } }"#;
        let feed = parse_feed(json).unwrap();
        assert_eq!(feed.readings.len(), 1);
        assert!(feed.readings.contains_key("o3"));
    }

    #[test]
    fn test_error_status() {
        let err = parse_feed(r#"{ "status": "error", "data": "Unknown station" }"#).unwrap_err();
        match err {
            VayuError::FeedStatus(msg) => assert_eq!(msg, "Unknown station"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_error_status_without_message() {
        let err = parse_feed(r#"{ "status": "nope" }"#).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_missing_data_object() {
        let err = parse_feed(r#"{ "status": "ok", "data": "oops" }"#).unwrap_err();
        assert!(matches!(err, VayuError::FeedParse(_)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_feed("{ status"), Err(VayuError::Json(_))));
    }
}
