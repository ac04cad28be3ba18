use chrono::{DateTime, FixedOffset, Offset, Utc};
use std::fmt::Write;

/// Placeholder shown for missing timestamps.
pub const UNKNOWN: &str = "Unknown";

/// How timestamps are rendered.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// strftime-style pattern.
    pub pattern: String,
    /// Offset used when the feed carries no usable offset of its own.
    pub offset: FixedOffset,
    pub placeholder: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            pattern: "%Y-%m-%d %H:%M".to_string(),
            offset: Utc.fix(),
            placeholder: UNKNOWN.to_string(),
        }
    }
}

/// Format a Unix timestamp (seconds) for display.
///
/// Missing, zero and negative timestamps render as the placeholder rather
/// than as a 1970 date.
pub fn format_timestamp(epoch_seconds: Option<i64>, opts: &FormatOptions) -> String {
    render(epoch_seconds, opts.offset, opts)
}

/// Like [`format_timestamp`], but prefers a station-supplied offset such as
/// `"+05:30"` when one parses.
pub fn format_timestamp_in(
    epoch_seconds: Option<i64>,
    tz_hint: Option<&str>,
    opts: &FormatOptions,
) -> String {
    let offset = tz_hint.and_then(parse_offset).unwrap_or(opts.offset);
    render(epoch_seconds, offset, opts)
}

fn render(epoch_seconds: Option<i64>, offset: FixedOffset, opts: &FormatOptions) -> String {
    let Some(secs) = epoch_seconds.filter(|s| *s > 0) else {
        return opts.placeholder.clone();
    };
    let Some(utc) = DateTime::<Utc>::from_timestamp(secs, 0) else {
        return opts.placeholder.clone();
    };

    // An invalid pattern surfaces as a fmt error rather than a panic here.
    let mut out = String::new();
    match write!(out, "{}", utc.with_timezone(&offset).format(&opts.pattern)) {
        Ok(()) => out,
        Err(_) => opts.placeholder.clone(),
    }
}

/// Parse a UTC offset written as `+HH:MM`, `-HH:MM`, `+HHMM` or `Z`.
pub fn parse_offset(s: &str) -> Option<FixedOffset> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return Some(Utc.fix());
    }

    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Render a reading with at most one decimal, dropping a trailing `.0`.
pub fn format_value(v: f64) -> String {
    if !v.is_finite() {
        return "-".to_string();
    }
    let rounded = (v * 10.0).round() / 10.0;
    if rounded == 0.0 {
        "0".to_string()
    } else if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

/// Render a reading with its unit, e.g. `"88 µg/m³"`.
pub fn format_reading(value: f64, unit: &str) -> String {
    if unit.is_empty() {
        format_value(value)
    } else {
        format!("{} {}", format_value(value), unit)
    }
}
