//! Shared fixtures for transform tests

use crate::app::models::{DecodedMessage, DecodedSubset, Element, MessageHeaders, RawValue};

pub mod stats_tests;

pub fn num(key: &str, code: &str, value: f64, units: &str, scale: i32) -> Element {
    Element::new(key, code.parse().unwrap(), Some(RawValue::Float(value)), units, scale)
}

/// Subset for block/station `03nnn` with a single air temperature
pub fn station_subset(station: f64, temperature: f64) -> DecodedSubset {
    DecodedSubset {
        elements: vec![
            num("#1#blockNumber", "001001", 3.0, "Numeric", 0),
            num("#1#stationNumber", "001002", station, "Numeric", 0),
            num("#1#year", "004001", 2022.0, "a", 0),
            num("#1#month", "004002", 3.0, "mon", 0),
            num("#1#day", "004003", 20.0, "d", 0),
            num("#1#hour", "004004", 21.0, "h", 0),
            num("#1#latitude", "005001", 53.43, "deg", 2),
            num("#1#longitude", "006001", -6.25, "deg", 2),
            num("#1#airTemperature", "012101", temperature, "K", 2),
        ],
    }
}

/// Subset that fails with an unsupported time increment
pub fn failing_subset() -> DecodedSubset {
    let mut subset = station_subset(1.0, 280.0);
    subset
        .elements
        .insert(6, num("#1#timeIncrement", "004011", 1.0, "a", 0));
    subset
}

pub fn message(id: &str, subsets: Vec<DecodedSubset>) -> DecodedMessage {
    DecodedMessage {
        headers: MessageHeaders {
            id: id.to_string(),
            typical_date: "20220320".to_string(),
            typical_time: "210000".to_string(),
            master_tables_version_number: Some(37),
            number_of_subsets: Some(subsets.len()),
            ..Default::default()
        },
        subsets,
    }
}
