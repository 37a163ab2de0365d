//! Derivation engine
//!
//! Pure functions over a [`QualifierContext`] producing the location, vertical
//! coordinate, phenomenon time and station identity in force at the current
//! scan position.
//!
//! - [`location`] - point geometry with displacements applied
//! - [`vertical`] - vertical coordinate precedence across competing height descriptors
//! - [`time`] - phenomenon time, hour-24 normalization and time periods
//! - [`identity`] - WIGOS and traditional station identifiers

pub mod identity;
pub mod location;
pub mod time;
pub mod vertical;

#[cfg(test)]
pub mod tests;

pub use identity::derive_identity;
pub use location::derive_location;
pub use time::derive_time;
pub use vertical::derive_vertical;

use crate::Result;
use crate::app::models::{Location, StationIdentity, TimeSpan, VerticalCoordinate};
use crate::app::services::qualifier_context::QualifierContext;
use crate::config::Config;

/// Everything derived from the qualifiers in force
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedQualifiers {
    pub location: Option<Location>,
    pub vertical: Option<VerticalCoordinate>,
    pub time: Option<TimeSpan>,
    pub identity: StationIdentity,
}

/// Run every derivation against the current context
pub fn derive(context: &QualifierContext, config: &Config) -> Result<DerivedQualifiers> {
    Ok(DerivedQualifiers {
        location: derive_location(context, config.strict)?,
        vertical: derive_vertical(context),
        time: derive_time(context, config.strict)?,
        identity: derive_identity(context, config.guess_wsi),
    })
}

/// Round to a BUFR decimal scale (negative scales round to tens, hundreds, ...)
pub fn round_to_scale(value: f64, scale: i32) -> f64 {
    let factor = 10f64.powi(scale);
    (value * factor).round() / factor
}
