//! Arrival time and voyage progress estimation
//!
//! All functions here are pure: the reference time is always passed in by
//! the caller, nothing reads the wall clock.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::{
    display::format_eta,
    distance::distance_nm,
    models::{EtaResult, GeoPoint, RouteRecord},
};

/// Speed assumed when the reported speed is zero, negative or missing, knots
pub const FALLBACK_SPEED_KNOTS: f64 = 10.0;

const MICROS_PER_HOUR: f64 = 3_600_000_000.0;

/// Speed to use for a projection
///
/// Anything that is not strictly positive (including NaN) is replaced by
/// [`FALLBACK_SPEED_KNOTS`].
pub fn effective_speed(speed_knots: f64) -> f64 {
    if speed_knots > 0.0 {
        speed_knots
    } else {
        debug!(
            "Speed {} kn is not positive, assuming {} kn",
            speed_knots, FALLBACK_SPEED_KNOTS
        );
        FALLBACK_SPEED_KNOTS
    }
}

/// Projected arrival time at `destination` when sailing from `current`
/// at `speed_knots`, starting at `now`
///
/// The result is never earlier than `now`. A projection beyond the
/// representable range saturates at [`DateTime::<Utc>::MAX_UTC`].
pub fn projected_arrival(
    current: &GeoPoint,
    destination: &GeoPoint,
    speed_knots: f64,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    let remaining = distance_nm(current, destination);
    let hours = remaining / effective_speed(speed_knots);

    now.checked_add_signed(hours_to_delta(hours))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Voyage progress in percent, 0.0 - 100.0
///
/// Straight-line distance covered from `departure` relative to the
/// straight-line distance from `departure` to `arrival`. A degenerate
/// route (zero length) reports 0.0, overshoot is clamped to 100.0.
pub fn voyage_progress(departure: &GeoPoint, current: &GeoPoint, arrival: &GeoPoint) -> f64 {
    let total = distance_nm(departure, arrival);
    if total <= 0.0 {
        return 0.0;
    }

    let traveled = distance_nm(departure, current);
    (100.0 * traveled / total).min(100.0)
}

/// Full estimate for a vessel on `route`, given its current position and
/// speed at time `now`
pub fn full_estimate(
    vessel_name: &str,
    mmsi: &str,
    current: GeoPoint,
    speed_knots: f64,
    route: &RouteRecord,
    now: DateTime<Utc>,
) -> EtaResult {
    let destination = &route.arrival_port.position;
    let speed_knots = effective_speed(speed_knots);

    let eta = projected_arrival(&current, destination, speed_knots, now);
    let distance_remaining_nm = distance_nm(&current, destination);
    let voyage_progress_pct =
        voyage_progress(&route.departure_port.position, &current, destination);

    EtaResult {
        vessel_name: vessel_name.to_string(),
        mmsi: mmsi.to_string(),
        current_position: current,
        departure_port: route.departure_port.name.clone(),
        arrival_port: route.arrival_port.name.clone(),
        distance_remaining_nm,
        speed_knots,
        eta,
        eta_formatted: format_eta(&eta),
        voyage_progress_pct,
        time_elapsed: now.signed_duration_since(route.departure_time),
        time_remaining: eta.signed_duration_since(now),
    }
}

/// Convert fractional hours to a time delta, rounded to the microsecond
fn hours_to_delta(hours: f64) -> TimeDelta {
    // `as` saturates for values beyond i64, the addition then overflows
    TimeDelta::microseconds((hours * MICROS_PER_HOUR).round() as i64)
}
