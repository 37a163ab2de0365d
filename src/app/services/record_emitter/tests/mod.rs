//! Shared fixtures for record emitter tests

use crate::app::models::{Element, RawValue};
use crate::app::services::table_resolver::CodeFlagTables;


/// Build an element from a decoder key, code, value, units and scale
pub fn element(key: &str, code: &str, value: Option<RawValue>, units: &str, scale: i32) -> Element {
    Element::new(key, code.parse().unwrap(), value, units, scale)
}

/// Numeric element shorthand
pub fn num(key: &str, code: &str, value: f64, units: &str, scale: i32) -> Element {
    element(key, code, Some(RawValue::Float(value)), units, scale)
}

/// Text element shorthand
pub fn text(key: &str, code: &str, value: &str) -> Element {
    element(key, code, Some(RawValue::Text(value.to_string())), "CCITT IA5", 0)
}

/// Table store with the entries the fixtures reference
pub fn test_tables() -> CodeFlagTables {
    let tables = CodeFlagTables::in_memory();
    tables.insert_entry(37, "002001".parse().unwrap(), 1, "Manned station");
    tables.insert_entry(37, "008021".parse().unwrap(), 2, "Time averaged");
    tables.insert_entry(37, "002002".parse().unwrap(), 1, "Automatic data processing");
    tables.insert_entry(37, "002002".parse().unwrap(), 3, "Originally measured in knots");
    tables
}

/// A small surface station subset: identity, location, time, one temperature,
/// a missing dewpoint, a replication factor and a ten-minute wind
pub fn station_subset() -> Vec<Element> {
    vec![
        num("#1#wigosIdentifierSeries", "001125", 0.0, "Numeric", 0),
        num("#1#wigosIssuerOfIdentifier", "001126", 20000.0, "Numeric", 0),
        num("#1#wigosIssueNumber", "001127", 0.0, "Numeric", 0),
        text("#1#wigosLocalIdentifierCharacter", "001128", "03951           "),
        num("#1#blockNumber", "001001", 3.0, "Numeric", 0),
        num("#1#stationNumber", "001002", 969.0, "Numeric", 0),
        element("#1#typeOfStation", "002001", Some(RawValue::Integer(1)), "CODE TABLE", 0),
        num("#1#year", "004001", 2022.0, "a", 0),
        num("#1#month", "004002", 3.0, "mon", 0),
        num("#1#day", "004003", 20.0, "d", 0),
        num("#1#hour", "004004", 21.0, "h", 0),
        num("#1#minute", "004005", 0.0, "min", 0),
        num("#1#latitude", "005001", 53.42806, "deg", 5),
        num("#1#longitude", "006001", -6.24056, "deg", 5),
        num("#1#heightOfStationGroundAboveMeanSeaLevel", "007030", 71.0, "m", 1),
        num("#1#heightOfSensorAboveLocalGroundOrDeckOfMarinePlatform", "007032", 2.0, "m", 2),
        num("#1#airTemperature", "012101", 300.0, "K", 2),
        element("#1#dewpointTemperature", "012103", None, "K", 2),
        element("#1#delayedDescriptorReplicationFactor", "031001", Some(RawValue::Integer(1)), "Numeric", 0),
        element("#1#timeSignificance", "008021", Some(RawValue::Integer(2)), "CODE TABLE", 0),
        num("#1#timePeriod", "004025", -10.0, "min", 0),
        num("#1#windSpeed", "011002", 5.2, "m/s", 1),
    ]
}
