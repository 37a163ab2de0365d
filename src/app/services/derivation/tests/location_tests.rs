use super::*;
use crate::Error;
use crate::app::services::derivation::{derive_location, round_to_scale};

#[test]
fn test_latitude_rounded_to_declared_scale() {
    let context = ContextBuilder::new()
        .number("005001", "latitude", 51.474, "deg", 2)
        .number("006001", "longitude", -0.4543, "deg", 2)
        .build();

    let location = derive_location(&context, false).unwrap().unwrap();
    assert_eq!(location.latitude, 51.47);
    assert_eq!(location.longitude, -0.45);
    assert_eq!(location.height, None);
}

#[test]
fn test_displacement_added_before_rounding() {
    let context = ContextBuilder::new()
        .number("005001", "latitude", 50.0, "deg", 2)
        .number("005015", "latitude_displacement", 0.256, "deg", 2)
        .number("006001", "longitude", 10.0, "deg", 2)
        .number("006015", "longitude_displacement", -0.5, "deg", 2)
        .build();

    let location = derive_location(&context, false).unwrap().unwrap();
    assert_eq!(location.latitude, 50.26);
    assert_eq!(location.longitude, 9.5);
}

#[test]
fn test_increment_descriptor_rejected_under_any_key() {
    let context = ContextBuilder::new()
        .number("005001", "latitude", 50.0, "deg", 2)
        .number("005012", "latitude_displacement", 0.256, "deg", 2)
        .number("006001", "longitude", 10.0, "deg", 2)
        .build();

    assert!(matches!(
        derive_location(&context, false),
        Err(Error::UnsupportedIncrement { .. })
    ));
}

#[test]
fn test_ground_elevation_becomes_height() {
    let context = ContextBuilder::new()
        .number("005001", "latitude", 53.43, "deg", 2)
        .number("006001", "longitude", -6.25, "deg", 2)
        .number("007030", "height_of_station_ground_above_mean_sea_level", 71.04, "m", 1)
        .build();

    let location = derive_location(&context, false).unwrap().unwrap();
    assert_eq!(location.coordinates(), vec![-6.25, 53.43, 71.0]);
}

#[test]
fn test_missing_longitude_yields_null_geometry_when_lenient() {
    let context = ContextBuilder::new()
        .number("005001", "latitude", 53.43, "deg", 2)
        .build();

    assert_eq!(derive_location(&context, false).unwrap(), None);
}

#[test]
fn test_missing_latitude_is_error_when_strict() {
    let context = ContextBuilder::new()
        .number("006001", "longitude", -6.25, "deg", 2)
        .build();

    match derive_location(&context, true) {
        Err(Error::MissingCoordinate { axis }) => assert_eq!(axis, "latitude"),
        other => panic!("expected missing latitude, got {:?}", other),
    }
}

#[test]
fn test_series_latitude_is_treated_as_missing() {
    let context = ContextBuilder::new()
        .number("005001", "latitude", 53.43, "deg", 2)
        .number("005001", "latitude", 53.44, "deg", 2)
        .number("006001", "longitude", -6.25, "deg", 2)
        .build();

    assert_eq!(derive_location(&context, false).unwrap(), None);
}

#[test]
fn test_location_increment_fails_loudly() {
    let context = ContextBuilder::new()
        .number("005001", "latitude", 53.43, "deg", 2)
        .number("006001", "longitude", -6.25, "deg", 2)
        .number("005011", "latitude_increment", 0.5, "deg", 2)
        .build();

    assert!(matches!(
        derive_location(&context, false),
        Err(Error::UnsupportedIncrement { .. })
    ));
}

#[test]
fn test_round_to_scale() {
    assert_eq!(round_to_scale(51.474, 2), 51.47);
    assert_eq!(round_to_scale(1234.0, -1), 1230.0);
    assert_eq!(round_to_scale(26.849_999_999, 6), 26.85);
}
