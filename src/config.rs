//! Application configuration

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use tracing::warn;

use crate::{errors::EtaError, models::GeoPoint};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub routes: RoutesConfig,
    pub sample: SampleConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RoutesConfig {
    pub path: PathBuf,
}

/// Live position and speed sample fed to the estimator
#[derive(Debug, Deserialize, Clone)]
pub struct SampleConfig {
    /// Vessel to look up in the route table
    pub mmsi: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub speed_knots: f64,
    /// Point-to-point destination, used when no MMSI is given
    pub destination_latitude: Option<f64>,
    pub destination_longitude: Option<f64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("routes.path", "data/ship_routes.csv")?
            .set_default("output.format", "text")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                Environment::with_prefix("VESSELETA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), EtaError> {
        self.routes.validate()?;
        self.sample.validate()?;
        Ok(())
    }
}

impl RoutesConfig {
    fn validate(&self) -> Result<(), EtaError> {
        if self.path.as_os_str().is_empty() {
            return Err(EtaError::ConfigurationError {
                message: "Routes path cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl SampleConfig {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Configured point-to-point destination, if both coordinates are set
    pub fn destination(&self) -> Option<GeoPoint> {
        match (self.destination_latitude, self.destination_longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), EtaError> {
        validate_coordinates(self.latitude, self.longitude, "Sample")?;
        if !self.speed_knots.is_finite() {
            return Err(EtaError::ConfigurationError {
                message: format!("Sample speed must be finite, got {}", self.speed_knots),
            });
        }
        if self.speed_knots <= 0.0 {
            warn!(
                "Sample speed {} kn is not positive, the fallback speed will be used",
                self.speed_knots
            );
        }

        match (self.destination_latitude, self.destination_longitude) {
            (Some(lat), Some(lon)) => validate_coordinates(lat, lon, "Destination")?,
            (None, None) => {
                if self.mmsi.is_none() {
                    return Err(EtaError::ConfigurationError {
                        message: "Either sample MMSI or destination must be given".to_string(),
                    });
                }
            }
            _ => {
                return Err(EtaError::ConfigurationError {
                    message: "Destination needs both latitude and longitude".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn validate_coordinates(latitude: f64, longitude: f64, what: &str) -> Result<(), EtaError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(EtaError::ConfigurationError {
            message: format!("{} latitude {} outside -90..90", what, latitude),
        });
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(EtaError::ConfigurationError {
            message: format!("{} longitude {} outside -180..180", what, longitude),
        });
    }
    Ok(())
}
