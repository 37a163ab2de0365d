//! Decoded message input contract
//!
//! A decoded message is what the external BUFR decoder hands over: the
//! section headers plus, per subset, the flat ordered element stream.

use super::Element;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// BUFR message headers used for feature identifiers and table selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageHeaders {
    /// Message identifier (usually the source file stem)
    #[serde(default)]
    pub id: String,

    /// Typical date, `YYYYMMDD`
    #[serde(default)]
    pub typical_date: String,

    /// Typical time, `HHMMSS`
    #[serde(default)]
    pub typical_time: String,

    /// BUFR master tables version
    #[serde(default)]
    pub master_tables_version_number: Option<u32>,

    /// Number of subsets declared in section 3
    #[serde(default)]
    pub number_of_subsets: Option<usize>,

    /// Any further headers, passed through untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl MessageHeaders {
    /// Prefix shared by report and feature identifiers
    pub fn report_prefix(&self, station_identifier: &str) -> String {
        format!(
            "WIGOS_{}_{}T{}",
            station_identifier, self.typical_date, self.typical_time
        )
    }
}

/// Element stream of one subset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodedSubset {
    pub elements: Vec<Element>,
}

/// One decoded BUFR message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodedMessage {
    pub headers: MessageHeaders,
    #[serde(default)]
    pub subsets: Vec<DecodedSubset>,
}

impl DecodedMessage {
    /// Number of subsets actually present
    pub fn subset_count(&self) -> usize {
        self.subsets.len()
    }
}
