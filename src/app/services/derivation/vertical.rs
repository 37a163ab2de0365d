//! Vertical coordinate from class 07 qualifiers
//!
//! Several descriptors can express a height. Candidates are grouped into three
//! categories evaluated in order: other absolute quantities (pressure,
//! geopotential), heights relative to the station ground, and heights above
//! mean sea level. A category with more than one candidate is discarded.

use super::location::ground_elevation;
use super::round_to_scale;
use crate::Error;
use crate::app::models::{QualifierClass, QualifierRecord, VerticalCoordinate};
use crate::app::services::qualifier_context::QualifierContext;
use crate::constants::{
    ABSOLUTE_HEIGHT_KEYS, DEPTH_KEYS, GROUND_HEIGHT_KEY, OTHER_VERTICAL_KEYS, RELATIVE_HEIGHT_KEYS,
};
use tracing::warn;

/// Resolve the vertical coordinate in force, `None` when unknown or ambiguous
pub fn derive_vertical(context: &QualifierContext) -> Option<VerticalCoordinate> {
    let ground = ground_elevation(context);

    if let Some((record, value)) = single_candidate(context, "other", OTHER_VERTICAL_KEYS) {
        return Some(VerticalCoordinate::Other {
            name: record.key.clone(),
            value,
            units: record.attributes.units.clone(),
        });
    }

    let relative = single_candidate(context, "relative height", RELATIVE_HEIGHT_KEYS);
    if let (Some((record, value)), Some(ground)) = (relative, ground) {
        let offset = if DEPTH_KEYS.contains(&record.key.as_str()) {
            -value
        } else {
            value
        };
        let scale = record.attributes.scale.max(ground_scale(context));
        return Some(VerticalCoordinate::Height {
            height_above_mean_sea_level: Some(round_to_scale(ground + offset, scale)),
            height_above_local_ground: Some(value),
        });
    }

    if let Some((record, value)) = single_candidate(context, "absolute height", ABSOLUTE_HEIGHT_KEYS)
    {
        let scale = record.attributes.scale.max(ground_scale(context));
        return Some(VerticalCoordinate::Height {
            height_above_mean_sea_level: Some(value),
            height_above_local_ground: ground.map(|ground| round_to_scale(value - ground, scale)),
        });
    }

    relative.map(|(_, value)| VerticalCoordinate::Height {
        height_above_mean_sea_level: None,
        height_above_local_ground: Some(value),
    })
}

/// The only scalar candidate of a category, rounded to its scale
fn single_candidate<'a>(
    context: &'a QualifierContext,
    category: &str,
    keys: &[&str],
) -> Option<(&'a QualifierRecord, f64)> {
    let candidates: Vec<(&QualifierRecord, f64)> = keys
        .iter()
        .filter_map(|key| context.record(QualifierClass::Vertical, key))
        .filter_map(|record| {
            let value = record.value.as_ref()?.as_scalar()?;
            Some((record, round_to_scale(value, record.attributes.scale)))
        })
        .collect();

    match candidates.as_slice() {
        [] => None,
        [single] => Some(*single),
        many => {
            let keys: Vec<&str> = many.iter().map(|(record, _)| record.key.as_str()).collect();
            warn!(
                "{}, discarding category",
                Error::ambiguous_vertical_coordinate(category, &keys)
            );
            None
        }
    }
}

fn ground_scale(context: &QualifierContext) -> i32 {
    context
        .record(QualifierClass::Vertical, GROUND_HEIGHT_KEY)
        .map(|record| record.attributes.scale)
        .unwrap_or(0)
}
