use super::*;
use crate::app::models::VerticalCoordinate;
use crate::app::services::derivation::derive_vertical;

const GROUND: &str = "height_of_station_ground_above_mean_sea_level";
const SENSOR: &str = "height_of_sensor_above_local_ground_or_deck_of_marine_platform";

#[test]
fn test_single_other_quantity_wins_outright() {
    let context = ContextBuilder::new()
        .number("007030", GROUND, 71.0, "m", 1)
        .number("007004", "pressure", 85000.0, "Pa", -1)
        .number("007032", SENSOR, 2.0, "m", 2)
        .build();

    assert_eq!(
        derive_vertical(&context),
        Some(VerticalCoordinate::Other {
            name: "pressure".to_string(),
            value: 85000.0,
            units: "Pa".to_string(),
        })
    );
}

#[test]
fn test_relative_height_added_to_ground_level() {
    let context = ContextBuilder::new()
        .number("007030", GROUND, 71.0, "m", 1)
        .number("007032", SENSOR, 1.5, "m", 2)
        .build();

    assert_eq!(
        derive_vertical(&context),
        Some(VerticalCoordinate::Height {
            height_above_mean_sea_level: Some(72.5),
            height_above_local_ground: Some(1.5),
        })
    );
}

#[test]
fn test_depth_is_sign_flipped() {
    let context = ContextBuilder::new()
        .number("007030", GROUND, 10.0, "m", 1)
        .number("007061", "depth_below_land_surface", 0.1, "m", 2)
        .build();

    assert_eq!(
        derive_vertical(&context),
        Some(VerticalCoordinate::Height {
            height_above_mean_sea_level: Some(9.9),
            height_above_local_ground: Some(0.1),
        })
    );
}

#[test]
fn test_absolute_height_relative_to_ground() {
    let context = ContextBuilder::new()
        .number("007030", GROUND, 71.0, "m", 1)
        .number("007002", "height_or_altitude", 1500.0, "m", -1)
        .build();

    assert_eq!(
        derive_vertical(&context),
        Some(VerticalCoordinate::Height {
            height_above_mean_sea_level: Some(1500.0),
            height_above_local_ground: Some(1429.0),
        })
    );
}

#[test]
fn test_two_candidates_in_same_category_are_discarded() {
    let context = ContextBuilder::new()
        .number("007030", GROUND, 71.0, "m", 1)
        .number("007002", "height_or_altitude", 1500.0, "m", -1)
        .number("007001", "height_of_station", 1490.0, "m", 0)
        .build();

    assert_eq!(derive_vertical(&context), None);
}

#[test]
fn test_ambiguous_category_falls_through_to_next() {
    let context = ContextBuilder::new()
        .number("007004", "pressure", 85000.0, "Pa", -1)
        .number("010009", "geopotential_height", 1457.0, "gpm", 0)
        .number("007002", "height_or_altitude", 1500.0, "m", -1)
        .build();

    // class 10 keys never reach the vertical slot, so pressure is the only "other"
    assert!(matches!(
        derive_vertical(&context),
        Some(VerticalCoordinate::Other { .. })
    ));

    let context = ContextBuilder::new()
        .number("007004", "pressure", 85000.0, "Pa", -1)
        .number("007009", "geopotential_height", 1457.0, "gpm", 0)
        .number("007002", "height_or_altitude", 1500.0, "m", -1)
        .build();

    assert_eq!(
        derive_vertical(&context),
        Some(VerticalCoordinate::Height {
            height_above_mean_sea_level: Some(1500.0),
            height_above_local_ground: None,
        })
    );
}

#[test]
fn test_relative_without_ground_reports_local_height_only() {
    let context = ContextBuilder::new()
        .number("007032", SENSOR, 2.0, "m", 2)
        .build();

    assert_eq!(
        derive_vertical(&context),
        Some(VerticalCoordinate::Height {
            height_above_mean_sea_level: None,
            height_above_local_ground: Some(2.0),
        })
    );
}

#[test]
fn test_no_candidates() {
    let context = ContextBuilder::new()
        .number("007030", GROUND, 71.0, "m", 1)
        .build();
    assert_eq!(derive_vertical(&context), None);
}
