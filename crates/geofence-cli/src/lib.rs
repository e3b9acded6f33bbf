//! Geofence CLI library: argument parsing helpers and text rendering.

use std::fmt::Write as _;

use anyhow::{anyhow, Context, Result};

use geofence_lib::{Alert, EventRecord, GeoPoint};

/// Parse `"LAT,LON"` into a validated point.
///
/// Whitespace around either component is ignored.
pub fn parse_coordinate_pair(input: &str) -> Result<GeoPoint> {
    let (lat, lon) = input
        .split_once(',')
        .ok_or_else(|| anyhow!("expected LAT,LON but got {input:?}"))?;

    let lat: f64 = lat
        .trim()
        .parse()
        .with_context(|| format!("latitude {:?} is not a number", lat.trim()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .with_context(|| format!("longitude {:?} is not a number", lon.trim()))?;

    Ok(GeoPoint::new(lat, lon)?)
}

/// Human-readable summary of a record followed by its alert.
pub fn render_check(record: &EventRecord) -> String {
    let alert = Alert::from_record(record);
    let mut out = String::new();

    let _ = writeln!(out, "Event:     {}", record.event_id());
    let _ = writeln!(out, "Timestamp: {}", record.timestamp().to_rfc3339());
    let _ = writeln!(
        out,
        "Verdict:   {}",
        if record.inside() { "inside" } else { "outside" }
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", alert.subject);
    let _ = writeln!(out, "{}", alert.message);
    out
}

/// Distance line printed by `distance`.
pub fn render_distance(from: &GeoPoint, to: &GeoPoint, meters: f64) -> String {
    format!("{from} -> {to}: {meters:.2} m")
}
