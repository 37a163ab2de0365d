//! Point location from class 05/06 qualifiers

use super::round_to_scale;
use crate::app::models::{Location, QualifierClass};
use crate::app::services::qualifier_context::QualifierContext;
use crate::constants::{GROUND_HEIGHT_KEY, LOCATION_INCREMENT_DESCRIPTORS};
use crate::{Error, Result};
use tracing::warn;

/// Derive the point location in force
///
/// Returns `Ok(None)` with a warning when latitude or longitude is missing, or
/// [`Error::MissingCoordinate`] in strict mode. Increment operators always fail.
pub fn derive_location(context: &QualifierContext, strict: bool) -> Result<Option<Location>> {
    reject_increments(context)?;

    let latitude = axis(
        context,
        QualifierClass::Latitude,
        "latitude",
        "latitude_displacement",
    );
    let longitude = axis(
        context,
        QualifierClass::Longitude,
        "longitude",
        "longitude_displacement",
    );

    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Ok(Some(Location {
            longitude,
            latitude,
            height: ground_elevation(context),
        })),
        (latitude, _) => {
            let missing = if latitude.is_none() {
                "latitude"
            } else {
                "longitude"
            };
            let error = Error::missing_coordinate(missing);
            if strict {
                return Err(error);
            }
            warn!("{}, geometry set to null", error);
            Ok(None)
        }
    }
}

/// Station ground elevation above mean sea level, rounded to its scale
pub fn ground_elevation(context: &QualifierContext) -> Option<f64> {
    let record = context.record(QualifierClass::Vertical, GROUND_HEIGHT_KEY)?;
    let value = record.value.as_ref()?.as_scalar()?;
    Some(round_to_scale(value, record.attributes.scale))
}

fn axis(
    context: &QualifierContext,
    class: QualifierClass,
    key: &str,
    displacement_key: &str,
) -> Option<f64> {
    let record = context.record(class, key)?;
    let mut value = record.value.as_ref()?.as_scalar()?;
    if let Some(displacement) = context.record(class, displacement_key) {
        value += displacement.value.as_ref()?.as_scalar()?;
    }
    Some(round_to_scale(value, record.attributes.scale))
}

fn reject_increments(context: &QualifierContext) -> Result<()> {
    for class in [QualifierClass::Latitude, QualifierClass::Longitude] {
        if let Some(record) = context
            .records(class)
            .find(|record| LOCATION_INCREMENT_DESCRIPTORS.contains(&record.code.code().as_str()))
        {
            return Err(Error::unsupported_increment(record.code.code(), &record.key));
        }
    }
    Ok(())
}
