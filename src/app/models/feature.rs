//! GeoJSON feature output
//!
//! Shapes an [`Observation`] into the GeoJSON feature written per observation.

use super::{IdentityScheme, MetadataEntry, Observation, VerticalCoordinate};
use serde::Serialize;

/// GeoJSON point geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub geometry_type: &'static str,
    pub coordinates: Vec<f64>,
}

impl Geometry {
    /// Point geometry from a coordinate array
    pub fn point(coordinates: Vec<f64>) -> Self {
        Self {
            geometry_type: "Point",
            coordinates,
        }
    }
}

/// Properties of an observation feature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureProperties {
    pub wigos_station_identifier: String,
    pub traditional_station_identifier: Option<String>,
    pub identity_scheme: Option<IdentityScheme>,
    #[serde(rename = "phenomenonTime")]
    pub phenomenon_time: Option<String>,
    #[serde(rename = "resultTime")]
    pub result_time: Option<String>,
    pub name: String,
    pub fxxyyy: String,
    pub value: serde_json::Value,
    pub units: String,
    pub description: serde_json::Value,
    pub vertical: Option<VerticalCoordinate>,
    pub metadata: Vec<MetadataEntry>,
    #[serde(rename = "metadataHash")]
    pub metadata_hash: String,
    pub index: usize,
}

/// GeoJSON feature for one observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    pub id: String,
    #[serde(rename = "reportId")]
    pub report_id: String,
    #[serde(rename = "type")]
    pub feature_type: &'static str,
    pub geometry: Option<Geometry>,
    pub properties: FeatureProperties,
}

impl Feature {
    /// Build a feature from an observation and its report identifier
    ///
    /// The feature id is `{report_id}-{sequence_index}` so it is stable across runs.
    pub fn from_observation(observation: &Observation, report_id: &str) -> Self {
        let identity = &observation.identity;
        Self {
            id: format!("{}-{}", report_id, observation.sequence_index),
            report_id: report_id.to_string(),
            feature_type: "Feature",
            geometry: observation
                .location
                .map(|location| Geometry::point(location.coordinates())),
            properties: FeatureProperties {
                wigos_station_identifier: identity.station_identifier().to_string(),
                traditional_station_identifier: identity.tsi.clone(),
                identity_scheme: identity.scheme,
                phenomenon_time: observation.time.map(|time| time.to_string()),
                result_time: observation.time.map(|time| time.result_time_string()),
                name: observation.name.clone(),
                fxxyyy: observation.descriptor.code(),
                value: observation.value.value_json(),
                units: observation.units().to_string(),
                description: observation.value.description_json(),
                vertical: observation.vertical.clone(),
                metadata: observation.metadata.clone(),
                metadata_hash: observation.metadata_hash.clone(),
                index: observation.sequence_index,
            },
        }
    }
}
