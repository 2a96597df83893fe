//! Route table loading from CSV
//!
//! Expected header:
//! `vessel_name,mmsi,departure_port,departure_lat,departure_lon,arrival_port,arrival_lat,arrival_lon,departure_time,status`

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    errors::EtaError,
    models::{GeoPoint, Port, RouteRecord},
};

/// Routes keyed by canonical vessel identifier
pub type RouteTable = HashMap<String, RouteRecord>;

/// One row of the route file
#[derive(Debug, Deserialize)]
struct RouteRow {
    vessel_name: String,
    mmsi: String,
    departure_port: String,
    departure_lat: f64,
    departure_lon: f64,
    arrival_port: String,
    arrival_lat: f64,
    arrival_lon: f64,
    departure_time: String,
    status: String,
}

impl TryFrom<RouteRow> for RouteRecord {
    type Error = EtaError;

    fn try_from(row: RouteRow) -> Result<Self, Self::Error> {
        let mmsi = canonical_mmsi(&row.mmsi);
        if row.departure_port.is_empty() || row.arrival_port.is_empty() {
            return Err(EtaError::EmptyPortName(mmsi));
        }

        Ok(RouteRecord {
            vessel_name: row.vessel_name,
            departure_port: Port::new(
                row.departure_port,
                GeoPoint::new(row.departure_lat, row.departure_lon),
            ),
            arrival_port: Port::new(
                row.arrival_port,
                GeoPoint::new(row.arrival_lat, row.arrival_lon),
            ),
            departure_time: parse_departure_time(&row.departure_time)?,
            status: row.status,
            mmsi,
        })
    }
}

/// Load the route table from a CSV file
pub fn load_routes(path: impl AsRef<Path>) -> Result<RouteTable, EtaError> {
    let path = path.as_ref();
    info!("Loading routes from {}", path.display());
    let file = std::fs::File::open(path)?;
    let routes = load_routes_from_reader(file)?;
    info!("Loaded {} routes", routes.len());
    Ok(routes)
}

/// Load the route table from any CSV source
///
/// When an identifier appears more than once, the later row wins.
pub fn load_routes_from_reader<R: Read>(reader: R) -> Result<RouteTable, EtaError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut routes = RouteTable::new();
    for row in csv_reader.deserialize::<RouteRow>() {
        let record = RouteRecord::try_from(row?)?;
        if let Some(previous) = routes.insert(record.mmsi.clone(), record) {
            warn!(
                "Duplicate route for MMSI {}, replacing route of {}",
                previous.mmsi, previous.vessel_name
            );
        }
    }

    Ok(routes)
}

/// Canonical string form of a vessel identifier
///
/// Numeric identifiers are normalised to their integer rendering, so
/// `" 0257646000 "` and `"257646000.0"` both become `"257646000"`.
/// Anything else is kept as trimmed text.
pub fn canonical_mmsi(raw: &str) -> String {
    let trimmed = raw.trim();
    let digits = trimmed.strip_suffix(".0").unwrap_or(trimmed);
    match digits.parse::<u64>() {
        Ok(value) => value.to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// Parse a departure timestamp
///
/// Accepts RFC 3339 with any offset, or a naive date / date-time which is
/// taken to be UTC.
pub fn parse_departure_time(value: &str) -> Result<DateTime<Utc>, EtaError> {
    const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| EtaError::InvalidDepartureTime(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const HEADER: &str = "vessel_name,mmsi,departure_port,departure_lat,departure_lon,arrival_port,arrival_lat,arrival_lon,departure_time,status\n";

    #[test]
    fn canonical_identifiers() {
        assert_eq!(canonical_mmsi("257646000"), "257646000");
        assert_eq!(canonical_mmsi(" 257646000 "), "257646000");
        assert_eq!(canonical_mmsi("0257646000"), "257646000");
        assert_eq!(canonical_mmsi("257646000.0"), "257646000");
        assert_eq!(canonical_mmsi("TEST-01"), "TEST-01");
    }

    #[test]
    fn departure_time_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 14, 6, 30, 0).unwrap();
        assert_eq!(parse_departure_time("2025-03-14 06:30:00").unwrap(), expected);
        assert_eq!(parse_departure_time("2025-03-14T06:30:00").unwrap(), expected);
        assert_eq!(parse_departure_time("2025-03-14 06:30").unwrap(), expected);
        assert_eq!(parse_departure_time("2025-03-14T06:30:00Z").unwrap(), expected);
        assert_eq!(
            parse_departure_time("2025-03-14T07:30:00+01:00").unwrap(),
            expected
        );
        assert_eq!(
            parse_departure_time("2025-03-14").unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn departure_time_invalid() {
        assert!(matches!(
            parse_departure_time("yesterday"),
            Err(EtaError::InvalidDepartureTime(v)) if v == "yesterday"
        ));
        assert!(parse_departure_time("2025-13-01").is_err());
    }

    #[test]
    fn parse_route_rows() {
        let data = format!(
            "{HEADER}\
             YARA BIRKELAND, 257646000 ,Herøya,59.1,9.65,Brevik,59.1333,9.65,2025-03-14 06:00:00,underway\n\
             SUULA,230123456,Helsinki,60.1675,24.9525,Tallinn,59.4439,24.7636,2025-03-13T22:15:00Z,arrived\n"
        );
        let routes = load_routes_from_reader(data.as_bytes()).unwrap();
        assert_eq!(routes.len(), 2);

        let yara = &routes["257646000"];
        assert_eq!(yara.vessel_name, "YARA BIRKELAND");
        assert_eq!(yara.departure_port, Port::new("Herøya", GeoPoint::new(59.1, 9.65)));
        assert_eq!(yara.arrival_port.position, GeoPoint::new(59.1333, 9.65));
        assert_eq!(
            yara.departure_time,
            Utc.with_ymd_and_hms(2025, 3, 14, 6, 0, 0).unwrap()
        );
        assert_eq!(yara.status, "underway");

        assert_eq!(routes["230123456"].status, "arrived");
    }

    #[test]
    fn duplicate_identifier_later_wins() {
        let data = format!(
            "{HEADER}\
             OLD NAME,257646000,A,59.0,9.0,B,60.0,10.0,2025-03-14,underway\n\
             NEW NAME,257646000,C,59.0,9.0,D,60.0,10.0,2025-03-15,underway\n"
        );
        let routes = load_routes_from_reader(data.as_bytes()).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes["257646000"].vessel_name, "NEW NAME");
        assert_eq!(routes["257646000"].departure_port.name, "C");
    }

    #[test]
    fn empty_port_name_rejected() {
        let data = format!("{HEADER}X,1,,59.0,9.0,B,60.0,10.0,2025-03-14,underway\n");
        assert!(matches!(
            load_routes_from_reader(data.as_bytes()),
            Err(EtaError::EmptyPortName(m)) if m == "1"
        ));
    }

    #[test]
    fn malformed_number_rejected() {
        let data = format!("{HEADER}X,1,A,north,9.0,B,60.0,10.0,2025-03-14,underway\n");
        assert!(matches!(
            load_routes_from_reader(data.as_bytes()),
            Err(EtaError::CsvError(_))
        ));
    }
}
