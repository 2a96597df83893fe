//! Vessel ETA estimator

use chrono::{DateTime, Utc};
use tracing::info;

use vessel_eta::{
    config::{AppConfig, OutputFormat, SampleConfig},
    display::{format_coordinate, render_json, render_report},
    distance::distance_nm,
    errors::EtaError,
    estimator::{effective_speed, full_estimate, projected_arrival},
    routes::{canonical_mmsi, load_routes},
};

fn main() -> Result<(), EtaError> {
    #[cfg(feature = "dotenv")]
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load()?;
    config.validate()?;
    info!("Configuration loaded: {:?}", config);

    let now = Utc::now();
    match &config.sample.mmsi {
        Some(mmsi) => estimate_route(&config, mmsi, now),
        None => estimate_point_to_point(&config.sample, now),
    }
}

/// Full estimate for a vessel from the route table
fn estimate_route(config: &AppConfig, mmsi: &str, now: DateTime<Utc>) -> Result<(), EtaError> {
    let routes = load_routes(&config.routes.path)?;
    let mmsi = canonical_mmsi(mmsi);
    let route = routes
        .get(&mmsi)
        .ok_or_else(|| EtaError::UnknownVessel(mmsi.clone()))?;

    let result = full_estimate(
        &route.vessel_name,
        &route.mmsi,
        config.sample.position(),
        config.sample.speed_knots,
        route,
        now,
    );

    match config.output.format {
        OutputFormat::Text => println!("{}", render_report(&result)),
        OutputFormat::Json => println!("{}", render_json(&result)?),
    }
    Ok(())
}

/// Distance and ETA from the sample position to a fixed destination
fn estimate_point_to_point(sample: &SampleConfig, now: DateTime<Utc>) -> Result<(), EtaError> {
    let destination = sample
        .destination()
        .ok_or_else(|| EtaError::ConfigurationError {
            message: "Destination not configured".to_string(),
        })?;
    let position = sample.position();

    let distance = distance_nm(&position, &destination);
    let eta = projected_arrival(&position, &destination, sample.speed_knots, now);

    println!("Position:    {}", format_coordinate(&position));
    println!("Destination: {}", format_coordinate(&destination));
    println!("Distance:    {:.2} nm", distance);
    println!("Speed:       {} kn", effective_speed(sample.speed_knots));
    println!("ETA:         {}", eta.format("%Y-%m-%d %H:%M:%S"));
    Ok(())
}
