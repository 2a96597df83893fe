//! Human-readable rendering of estimates

use chrono::{DateTime, TimeDelta, Utc};

use crate::{
    errors::EtaError,
    models::{EtaResult, GeoPoint},
};

/// Year-month-day-hour format of the ETA, sorts by date
pub const ETA_FORMAT: &str = "%Y-%m-%d %Hh UTC";

pub fn format_eta(eta: &DateTime<Utc>) -> String {
    eta.format(ETA_FORMAT).to_string()
}

/// Render a position with hemisphere letters, e.g. `59.1000°N, 9.6500°E`
pub fn format_coordinate(point: &GeoPoint) -> String {
    let ns = if point.latitude < 0.0 { 'S' } else { 'N' };
    let ew = if point.longitude < 0.0 { 'W' } else { 'E' };
    format!(
        "{:.4}°{}, {:.4}°{}",
        point.latitude.abs(),
        ns,
        point.longitude.abs(),
        ew
    )
}

/// Render a duration as days, hours and minutes, e.g. `1 day 3 hours 12 minutes`
///
/// Seconds are dropped and zero components are skipped, but minutes are
/// always shown when nothing else is. Negative durations are rendered as
/// their magnitude prefixed with `-`, unless the magnitude is below one
/// minute, which renders as `0 minutes`.
pub fn humanize_duration(duration: TimeDelta) -> String {
    let total = duration.num_seconds();
    let seconds = total.unsigned_abs();

    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    let mut parts = Vec::with_capacity(3);
    if days > 0 {
        parts.push(plural(days, "day"));
    }
    if hours > 0 {
        parts.push(plural(hours, "hour"));
    }
    if minutes > 0 || parts.is_empty() {
        parts.push(plural(minutes, "minute"));
    }

    let rendered = parts.join(" ");
    if total < 0 && seconds >= 60 {
        format!("-{}", rendered)
    } else {
        rendered
    }
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("{} {}", count, unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

/// Multi-line report of an estimate for console output
pub fn render_report(result: &EtaResult) -> String {
    format!(
        "Vessel:     {} (MMSI {})\n\
         Position:   {}\n\
         Route:      {} -> {}\n\
         Remaining:  {:.2} nm\n\
         Speed:      {:.1} kn\n\
         ETA:        {}\n\
         Progress:   {:.1}%\n\
         Elapsed:    {}\n\
         Time left:  {}",
        result.vessel_name,
        result.mmsi,
        format_coordinate(&result.current_position),
        result.departure_port,
        result.arrival_port,
        result.distance_remaining_nm,
        result.speed_knots,
        result.eta_formatted,
        result.voyage_progress_pct,
        humanize_duration(result.time_elapsed),
        humanize_duration(result.time_remaining),
    )
}

/// Pretty JSON rendering of an estimate, durations in whole seconds
pub fn render_json(result: &EtaResult) -> Result<String, EtaError> {
    Ok(serde_json::to_string_pretty(result)?)
}
