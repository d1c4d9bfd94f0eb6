use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use serde_json::Value;

use crate::{
    error::{Result, ScrobbleError},
    types::{ScrobbleCounts, ScrobbleEvent},
};

/// Spacing between synthesized plays, roughly one track length.
pub const TRACK_DURATION_SECS: i64 = 180;
/// Ceiling imposed by `track.scrobble` on a single request.
pub const MAX_BATCH_SIZE: usize = 50;
pub const MIN_SCROBBLE_COUNT: u32 = 1;
pub const MAX_SCROBBLE_COUNT: u32 = 1000;

/// Generates `count` timestamps ending at `base`, `spacing` seconds apart,
/// in ascending order.
pub fn plan_timestamps(base: i64, count: usize, spacing: i64) -> Vec<i64> {
    let mut timestamps: Vec<i64> = (0..count as i64).map(|i| base - i * spacing).collect();
    timestamps.sort_unstable();
    timestamps
}

pub fn build_events(artist: &str, track: &str, timestamps: &[i64]) -> Vec<ScrobbleEvent> {
    timestamps
        .iter()
        .map(|ts| ScrobbleEvent::new(artist, track, *ts))
        .collect()
}

pub fn clamp_count(raw: i64) -> u32 {
    raw.clamp(MIN_SCROBBLE_COUNT as i64, MAX_SCROBBLE_COUNT as i64) as u32
}

/// Parses a repetition count and clamps it into `[1, 1000]`.
pub fn parse_count(input: &str) -> Result<u32> {
    let raw: i64 = input
        .trim()
        .parse()
        .map_err(|_| ScrobbleError::Input(format!("{:?} is not a whole number", input.trim())))?;
    Ok(clamp_count(raw))
}

pub fn parse_days_ago(input: &str) -> Result<u32> {
    input
        .trim()
        .parse()
        .map_err(|_| ScrobbleError::Input(format!("{:?} is not a number of days", input.trim())))
}

pub fn parse_yes_no(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Moves `now` back by `days_ago` days. Offsets reaching past the earliest
/// representable date are an input error.
pub fn backdate(now: DateTime<Utc>, days_ago: u32) -> Result<DateTime<Utc>> {
    TimeDelta::try_days(days_ago as i64)
        .and_then(|delta| now.checked_sub_signed(delta))
        .ok_or_else(|| ScrobbleError::Input(format!("{days_ago} days ago is too far back")))
}

/// Parses a day offset and turns it into a start time relative to now.
pub fn parse_start_time(input: &str) -> Result<DateTime<Utc>> {
    backdate(Utc::now(), parse_days_ago(input)?)
}

/// Reads `scrobbles.@attr.{accepted,ignored}` from a `track.scrobble` response.
///
/// The API sends these as numbers or as numeric strings depending on the
/// endpoint version. Returns `None` when the accepted count is absent or not
/// a number; a missing ignored count reads as zero.
pub fn scrobble_counts(result: &Value) -> Option<ScrobbleCounts> {
    let attr = result.get("scrobbles")?.get("@attr")?;
    let accepted = count_field(attr.get("accepted")?)?;
    let ignored = attr.get("ignored").and_then(count_field).unwrap_or(0);
    Some(ScrobbleCounts { accepted, ignored })
}

fn count_field(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Extracts the message of an API error payload (`{"error": 9, "message": ...}`).
pub fn api_error_message(body: &Value) -> Option<String> {
    let code = body.get("error")?;
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown error");
    Some(format!("{message} (code {code})"))
}

pub fn format_timestamp(timestamp: i64) -> String {
    match Utc.timestamp_opt(timestamp, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => timestamp.to_string(),
    }
}
