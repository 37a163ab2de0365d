//! Application constants for bufr2geojson
//!
//! This module contains descriptor groupings, identity scheme constants,
//! default values and sentinels used throughout the derivation engine.

// =============================================================================
// BUFR Tables and Encodings
// =============================================================================

/// Default BUFR master table version when a message header carries none
pub const DEFAULT_TABLE_VERSION: u32 = 37;

/// File name of the WMO combined code and flag table in each table version directory
pub const CODE_FLAG_TABLE_FILE: &str = "BUFRCREX_CodeFlag_en.txt";

/// Units attribute value for code table encoded elements
pub const UNITS_CODE_TABLE: &str = "CODE TABLE";

/// Units attribute value for flag table encoded elements
pub const UNITS_FLAG_TABLE: &str = "FLAG TABLE";

/// Units attribute value for character (text) elements
pub const UNITS_CCITT_IA5: &str = "CCITT IA5";

/// Placeholder text returned when a code or flag table entry is missing
pub const INVALID_TABLE_ENTRY: &str = "Invalid";

/// Placeholder used for identity-dependent fields when no station identity is known
pub const UNKNOWN_STATION: &str = "UNKNOWN";

// =============================================================================
// Element Classification
// =============================================================================

/// Descriptor classes below this value are scope qualifiers
pub const QUALIFIER_CLASS_LIMIT: u8 = 9;

/// Structural / replication class, skipped while scanning
pub const STRUCTURAL_CLASS: u8 = 31;

/// Auxiliary qualifier classes (processing, quality, monitoring)
pub const AUXILIARY_CLASSES: &[u8] = &[25, 33, 35];

/// Inclusive class range whose repeated keys are appended into paired bounds
pub const APPENDABLE_CLASSES: std::ops::RangeInclusive<u8> = 4..=7;

/// `022067` as (F, XX, YYY): a data-class descriptor that is semantically a
/// qualifier (instrument type for water temperature profile measurement)
pub const PINNED_QUALIFIER_DESCRIPTOR: (u8, u8, u16) = (0, 22, 67);

// =============================================================================
// Descriptor Groups Held Out Of Generic Metadata
// =============================================================================

/// Keys surfaced through location derivation
pub const LOCATION_KEYS: &[&str] = &[
    "latitude",
    "latitude_increment",
    "latitude_displacement",
    "longitude",
    "longitude_increment",
    "longitude_displacement",
    "height_of_station_ground_above_mean_sea_level",
];

/// Keys surfaced through time derivation
pub const TIME_KEYS: &[&str] = &[
    "year",
    "month",
    "day",
    "hour",
    "minute",
    "second",
    "time_increment",
    "time_period",
];

/// Keys surfaced through station identity derivation
pub const IDENTITY_KEYS: &[&str] = &[
    "block_number",
    "station_number",
    "ship_or_mobile_land_station_identifier",
    "wmo_region_sub_area",
    "region_number",
    "buoy_or_platform_identifier",
    "stationary_buoy_platform_identifier_e_g_c_man_buoys",
    "marine_observing_platform_identifier",
    "wigos_identifier_series",
    "wigos_issuer_of_identifier",
    "wigos_issue_number",
    "wigos_local_identifier_character",
];

/// Latitude/longitude increment descriptors (not supported)
pub const LOCATION_INCREMENT_DESCRIPTORS: &[&str] = &["005011", "005012", "006011", "006012"];

/// Time increment descriptors (not supported)
pub const TIME_INCREMENT_DESCRIPTORS: &[&str] =
    &["004011", "004012", "004013", "004014", "004015", "004016"];

// =============================================================================
// Vertical Coordinate Candidates (class 07)
// =============================================================================

/// Station ground elevation key
pub const GROUND_HEIGHT_KEY: &str = "height_of_station_ground_above_mean_sea_level";

/// Absolute non-height vertical quantities; a single one wins outright
pub const OTHER_VERTICAL_KEYS: &[&str] = &[
    "geopotential",
    "pressure",
    "geopotential_height",
    "water_pressure",
];

/// Heights relative to the station ground or water surface
pub const RELATIVE_HEIGHT_KEYS: &[&str] = &[
    "height_above_station",
    "height_of_sensor_above_local_ground_or_deck_of_marine_platform",
    "height_of_sensor_above_water_surface",
    "depth_below_land_surface",
    "depth_below_sea_water_surface",
];

/// Relative keys measured downwards (sign flipped when made absolute)
pub const DEPTH_KEYS: &[&str] = &["depth_below_land_surface", "depth_below_sea_water_surface"];

/// Heights above mean sea level
pub const ABSOLUTE_HEIGHT_KEYS: &[&str] = &[
    "height_of_station",
    "height_or_altitude",
    "height",
    "height_of_barometer_above_mean_sea_level",
    "flight_level",
];

// =============================================================================
// Station Identity
// =============================================================================

/// WIGOS identifier series used for synthesized identifiers
pub const WSI_SERIES: u32 = 0;

/// WIGOS issue number used for synthesized identifiers
pub const WSI_ISSUE_NUMBER: u32 = 0;

/// WIGOS issuer for WMO block/station numbers
pub const WSI_ISSUER_BLOCK_STATION: u32 = 20000;

/// WIGOS issuer for WMO buoy and marine platform identifiers
pub const WSI_ISSUER_MARINE: u32 = 20002;

/// WIGOS issuer for ship and mobile land station call signs
pub const WSI_ISSUER_SHIP: u32 = 20004;

// =============================================================================
// Values and Units
// =============================================================================

/// Default number of decimals kept after a preferred-unit conversion
pub const DEFAULT_VALUE_PRECISION: u32 = 6;

/// Maximum accepted value precision
pub const MAX_VALUE_PRECISION: u32 = 12;

/// Default unit preferences (source units -> preferred units)
pub const DEFAULT_PREFERRED_UNITS: &[(&str, &str)] = &[("K", "Celsius"), ("Pa", "hPa")];

// =============================================================================
// Configuration
// =============================================================================

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "BUFR2GEOJSON";

/// Application directory name under the user config directory
pub const APP_DIR_NAME: &str = "bufr2geojson";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";
