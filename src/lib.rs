//! bufr2geojson Library
//!
//! A Rust library for turning decoded WMO BUFR element streams into discrete,
//! geolocated observation records shaped as GeoJSON features.
//!
//! This library provides tools for:
//! - Tracking BUFR "qualifiers in force" by descriptor class while scanning a subset
//! - Deriving location, time, vertical coordinate and station identity from qualifiers
//! - Resolving code and flag table entries through a lazily cached table store
//! - Emitting one unit-normalized observation per data-bearing element
//! - Isolating failures per subset and per message across a decoded stream

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod derivation;
        pub mod qualifier_context;
        pub mod record_emitter;
        pub mod table_resolver;
        pub mod transform;
    }
    pub mod adapters {
        pub mod decoder_dump;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Descriptor, Element, Observation, StationIdentity, TimeSpan};
pub use config::Config;

/// Result type alias for the bufr2geojson library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for BUFR semantic derivation and transformation
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failed
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// CSV parsing error while loading code and flag tables
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Code/flag table store could not be loaded
    #[error("Table load error: {message}")]
    TableLoad { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Descriptor code is not a valid FXXYYY string
    #[error("Invalid descriptor code '{code}': {reason}")]
    InvalidDescriptor { code: String, reason: String },

    /// Latitude or longitude is not available for the current scan position
    #[error("Missing coordinate: no usable {axis} in force")]
    MissingCoordinate { axis: String },

    /// Time qualifiers do not form a valid date
    #[error("Invalid date: {message}")]
    InvalidDate { message: String },

    /// Increment operator qualifiers are not supported
    #[error("Unsupported increment descriptor {descriptor} ({key})")]
    UnsupportedIncrement { descriptor: String, key: String },

    /// Displacement qualifier cannot be applied
    #[error("Unsupported displacement: {message}")]
    UnsupportedDisplacement { message: String },

    /// More than one vertical coordinate candidate in the same category
    #[error("Ambiguous vertical coordinate: {count} {category} candidates ({keys})")]
    AmbiguousVerticalCoordinate {
        category: String,
        count: usize,
        keys: String,
    },

    /// Code or flag table entry not found
    #[error("Table lookup miss: {descriptor} entry {entry} not found in table version {table_version}")]
    TableLookupMiss {
        table_version: u32,
        descriptor: String,
        entry: String,
    },

    /// Unit conversion not available
    #[error("Unit conversion error: cannot convert '{from}' to '{to}'")]
    UnitConversion { from: String, to: String },

    /// Decoder-level failure for a whole message
    #[error("Decoder error: {message}")]
    Decoder { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a table load error
    pub fn table_load(message: impl Into<String>) -> Self {
        Self::TableLoad {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid descriptor error
    pub fn invalid_descriptor(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            code: code.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing coordinate error
    pub fn missing_coordinate(axis: impl Into<String>) -> Self {
        Self::MissingCoordinate { axis: axis.into() }
    }

    /// Create an invalid date error
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Create an unsupported increment error
    pub fn unsupported_increment(descriptor: impl Into<String>, key: impl Into<String>) -> Self {
        Self::UnsupportedIncrement {
            descriptor: descriptor.into(),
            key: key.into(),
        }
    }

    /// Create an unsupported displacement error
    pub fn unsupported_displacement(message: impl Into<String>) -> Self {
        Self::UnsupportedDisplacement {
            message: message.into(),
        }
    }

    /// Create an ambiguous vertical coordinate error
    pub fn ambiguous_vertical_coordinate(
        category: impl Into<String>,
        keys: &[&str],
    ) -> Self {
        Self::AmbiguousVerticalCoordinate {
            category: category.into(),
            count: keys.len(),
            keys: keys.join(", "),
        }
    }

    /// Create a table lookup miss error
    pub fn table_lookup_miss(
        table_version: u32,
        descriptor: impl Into<String>,
        entry: impl Into<String>,
    ) -> Self {
        Self::TableLookupMiss {
            table_version,
            descriptor: descriptor.into(),
            entry: entry.into(),
        }
    }

    /// Create a unit conversion error
    pub fn unit_conversion(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::UnitConversion {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create a decoder error
    pub fn decoder(message: impl Into<String>) -> Self {
        Self::Decoder {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}
