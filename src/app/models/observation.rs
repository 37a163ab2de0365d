//! Derived observation records
//!
//! Location, time, vertical coordinate and station identity derived from the
//! qualifiers in force, and the observation emitted for each data element.

use super::{Descriptor, QualifierValue};
use crate::constants::UNKNOWN_STATION;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// ISO-8601 UTC format used for every emitted timestamp
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// =============================================================================
// Location
// =============================================================================

/// Point location, each axis rounded to its descriptor's declared scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
    /// Station ground elevation above mean sea level
    pub height: Option<f64>,
}

impl Location {
    /// GeoJSON coordinate array `[lon, lat]` or `[lon, lat, height]`
    pub fn coordinates(&self) -> Vec<f64> {
        match self.height {
            Some(height) => vec![self.longitude, self.latitude, height],
            None => vec![self.longitude, self.latitude],
        }
    }
}

/// Resolved vertical coordinate of an observation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VerticalCoordinate {
    /// A non-height quantity such as pressure or geopotential
    Other {
        name: String,
        value: f64,
        units: String,
    },
    /// Height above mean sea level and/or above local ground
    Height {
        height_above_mean_sea_level: Option<f64>,
        height_above_local_ground: Option<f64>,
    },
}

// =============================================================================
// Time
// =============================================================================

/// Phenomenon time: a single instant or a start/end interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSpan {
    Instant(DateTime<Utc>),
    Interval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl TimeSpan {
    /// Result time: the end of an interval, or the instant itself
    pub fn result_time(&self) -> DateTime<Utc> {
        match self {
            TimeSpan::Instant(instant) => *instant,
            TimeSpan::Interval { end, .. } => *end,
        }
    }

    /// Result time formatted as an ISO-8601 timestamp
    pub fn result_time_string(&self) -> String {
        self.result_time().format(TIMESTAMP_FORMAT).to_string()
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeSpan::Instant(instant) => write!(f, "{}", instant.format(TIMESTAMP_FORMAT)),
            TimeSpan::Interval { start, end } => write!(
                f,
                "{}/{}",
                start.format(TIMESTAMP_FORMAT),
                end.format(TIMESTAMP_FORMAT)
            ),
        }
    }
}

impl Serialize for TimeSpan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =============================================================================
// Station Identity
// =============================================================================

/// Identification scheme that produced a station identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityScheme {
    WigosStationIdentifier,
    BlockAndStationNumber,
    ShipOrMobileLandStationIdentifier,
    BuoyOrPlatformIdentifier,
    MarinePlatformIdentifier,
}

impl IdentityScheme {
    /// Snake-case scheme name
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityScheme::WigosStationIdentifier => "wigos_station_identifier",
            IdentityScheme::BlockAndStationNumber => "block_and_station_number",
            IdentityScheme::ShipOrMobileLandStationIdentifier => {
                "ship_or_mobile_land_station_identifier"
            }
            IdentityScheme::BuoyOrPlatformIdentifier => "buoy_or_platform_identifier",
            IdentityScheme::MarinePlatformIdentifier => "marine_platform_identifier",
        }
    }
}

impl fmt::Display for IdentityScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// WIGOS and traditional station identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StationIdentity {
    /// WIGOS Station Identifier
    pub wsi: Option<String>,
    /// Traditional (scheme-specific) station identifier
    pub tsi: Option<String>,
    /// Scheme the identity was derived from
    pub scheme: Option<IdentityScheme>,
}

impl StationIdentity {
    /// Identity with neither WSI nor TSI
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Whether any identifier is known
    pub fn is_known(&self) -> bool {
        self.wsi.is_some() || self.tsi.is_some()
    }

    /// WSI, or the placeholder when it cannot be derived
    pub fn station_identifier(&self) -> &str {
        self.wsi.as_deref().unwrap_or(UNKNOWN_STATION)
    }
}

// =============================================================================
// Observation
// =============================================================================

/// Value of a data element, shaped by its encoding
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObservedValue {
    /// Physical quantity after unit preference and rounding
    Measurement { value: f64, units: String },
    /// Code table entry
    CodedEntry { code: i64, description: String },
    /// Flag table value and the meaning of each set bit
    FlagSet { value: i64, flags: Vec<String> },
    /// CCITT IA5 text
    Text { text: String },
}

impl ObservedValue {
    /// Value as JSON (number for measurements, codes and flags, string for text)
    pub fn value_json(&self) -> serde_json::Value {
        match self {
            ObservedValue::Measurement { value, .. } => serde_json::json!(value),
            ObservedValue::CodedEntry { code, .. } => serde_json::json!(code),
            ObservedValue::FlagSet { value, .. } => serde_json::json!(value),
            ObservedValue::Text { text } => serde_json::json!(text),
        }
    }

    /// Units reported with the value
    pub fn units(&self) -> &str {
        match self {
            ObservedValue::Measurement { units, .. } => units,
            ObservedValue::CodedEntry { .. } => crate::constants::UNITS_CODE_TABLE,
            ObservedValue::FlagSet { .. } => crate::constants::UNITS_FLAG_TABLE,
            ObservedValue::Text { .. } => crate::constants::UNITS_CCITT_IA5,
        }
    }

    /// Decoded description as JSON (string, list of flag meanings, or null)
    pub fn description_json(&self) -> serde_json::Value {
        match self {
            ObservedValue::Measurement { .. } => serde_json::Value::Null,
            ObservedValue::CodedEntry { description, .. } => serde_json::json!(description),
            ObservedValue::FlagSet { flags, .. } => serde_json::json!(flags),
            ObservedValue::Text { text } => serde_json::json!(text),
        }
    }
}

/// Generic qualifier metadata attached to an observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataEntry {
    pub name: String,
    pub value: Option<QualifierValue>,
    pub units: String,
    pub description: Option<String>,
}

/// One observation per data-bearing element
///
/// Created when a data element with a non-null value is scanned and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    /// Normalized element key, e.g. `air_temperature`
    pub name: String,

    /// Descriptor of the data element
    pub descriptor: Descriptor,

    /// Value after unit preference, rounding and table resolution
    pub value: ObservedValue,

    /// Point location, `None` when latitude or longitude is missing
    pub location: Option<Location>,

    /// Vertical coordinate, `None` when unknown or ambiguous
    pub vertical: Option<VerticalCoordinate>,

    /// Phenomenon time, `None` when the time qualifiers do not form a valid date
    pub time: Option<TimeSpan>,

    /// Station identity in force
    pub identity: StationIdentity,

    /// Generic qualifiers in force (location, time and identity keys excluded)
    pub metadata: Vec<MetadataEntry>,

    /// Digest of `metadata`
    pub metadata_hash: String,

    /// Position of the element in the subset's stream
    pub sequence_index: usize,
}

impl Observation {
    /// Units of the emitted value
    pub fn units(&self) -> &str {
        self.value.units()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_time_span_formatting() {
        let start = Utc.with_ymd_and_hms(2022, 3, 20, 20, 50, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2022, 3, 20, 21, 0, 0).unwrap();

        let instant = TimeSpan::Instant(end);
        assert_eq!(instant.to_string(), "2022-03-20T21:00:00Z");
        assert_eq!(instant.result_time(), end);

        let interval = TimeSpan::Interval { start, end };
        assert_eq!(
            interval.to_string(),
            "2022-03-20T20:50:00Z/2022-03-20T21:00:00Z"
        );
        assert_eq!(interval.result_time_string(), "2022-03-20T21:00:00Z");
        assert_eq!(
            serde_json::to_string(&interval).unwrap(),
            "\"2022-03-20T20:50:00Z/2022-03-20T21:00:00Z\""
        );
    }

    #[test]
    fn test_location_coordinates() {
        let flat = Location {
            longitude: -6.25,
            latitude: 53.43,
            height: None,
        };
        assert_eq!(flat.coordinates(), vec![-6.25, 53.43]);

        let elevated = Location {
            height: Some(71.0),
            ..flat
        };
        assert_eq!(elevated.coordinates(), vec![-6.25, 53.43, 71.0]);
    }

    #[test]
    fn test_station_identity_placeholder() {
        let unknown = StationIdentity::unknown();
        assert!(!unknown.is_known());
        assert_eq!(unknown.station_identifier(), "UNKNOWN");

        let known = StationIdentity {
            wsi: Some("0-20000-0-03951".to_string()),
            tsi: None,
            scheme: Some(IdentityScheme::WigosStationIdentifier),
        };
        assert_eq!(known.station_identifier(), "0-20000-0-03951");
        assert_eq!(
            known.scheme.map(|s| s.to_string()).as_deref(),
            Some("wigos_station_identifier")
        );
    }

    #[test]
    fn test_observed_value_json_views() {
        let coded = ObservedValue::CodedEntry {
            code: 2,
            description: "Manned station".to_string(),
        };
        assert_eq!(coded.value_json(), serde_json::json!(2));
        assert_eq!(coded.units(), "CODE TABLE");
        assert_eq!(coded.description_json(), serde_json::json!("Manned station"));

        let measured = ObservedValue::Measurement {
            value: 26.85,
            units: "Celsius".to_string(),
        };
        assert_eq!(measured.value_json(), serde_json::json!(26.85));
        assert_eq!(measured.description_json(), serde_json::Value::Null);
    }
}
