//! Station identity from class 01 qualifiers
//!
//! Schemes are tried in a fixed order and the first one satisfied wins:
//! WIGOS identifier, block/station number, ship call sign, 5-digit buoy
//! composite, stationary buoy or 7-digit marine platform identifier.

use crate::app::models::{IdentityScheme, QualifierClass, QualifierReading, StationIdentity};
use crate::app::services::qualifier_context::QualifierContext;
use crate::constants::{
    WSI_ISSUE_NUMBER, WSI_ISSUER_BLOCK_STATION, WSI_ISSUER_MARINE, WSI_ISSUER_SHIP, WSI_SERIES,
};
use tracing::{debug, warn};

const CLASS: QualifierClass = QualifierClass::Identification;

/// Derive the station identity in force
///
/// With `guess_wsi` a WIGOS identifier is synthesized for the legacy schemes.
pub fn derive_identity(context: &QualifierContext, guess_wsi: bool) -> StationIdentity {
    if let Some(wsi) = wigos_identifier(context) {
        return StationIdentity {
            wsi: Some(wsi),
            tsi: None,
            scheme: Some(IdentityScheme::WigosStationIdentifier),
        };
    }

    let legacy = block_and_station(context)
        .map(|tsi| (tsi, WSI_ISSUER_BLOCK_STATION, IdentityScheme::BlockAndStationNumber))
        .or_else(|| {
            trimmed_text(context, "ship_or_mobile_land_station_identifier").map(|tsi| {
                (
                    tsi,
                    WSI_ISSUER_SHIP,
                    IdentityScheme::ShipOrMobileLandStationIdentifier,
                )
            })
        })
        .or_else(|| {
            buoy_composite(context)
                .map(|tsi| (tsi, WSI_ISSUER_MARINE, IdentityScheme::BuoyOrPlatformIdentifier))
        })
        .or_else(|| {
            marine_platform(context)
                .map(|tsi| (tsi, WSI_ISSUER_MARINE, IdentityScheme::MarinePlatformIdentifier))
        });

    match legacy {
        Some((tsi, issuer, scheme)) => StationIdentity {
            wsi: guess_wsi.then(|| synthesize_wsi(issuer, &tsi)),
            tsi: Some(tsi),
            scheme: Some(scheme),
        },
        None => {
            debug!("No station identification qualifiers in force");
            StationIdentity::unknown()
        }
    }
}

/// WIGOS identifier `{series}-{issuer}-{number}-{local}` for a legacy scheme
pub fn synthesize_wsi(issuer: u32, local: &str) -> String {
    format!("{}-{}-{}-{}", WSI_SERIES, issuer, WSI_ISSUE_NUMBER, local)
}

fn wigos_identifier(context: &QualifierContext) -> Option<String> {
    let series = integer(context, "wigos_identifier_series")?;
    let issuer = integer(context, "wigos_issuer_of_identifier")?;
    let number = integer(context, "wigos_issue_number")?;
    let local = trimmed_text(context, "wigos_local_identifier_character")?;
    Some(format!("{}-{}-{}-{}", series, issuer, number, local))
}

fn block_and_station(context: &QualifierContext) -> Option<String> {
    let block = integer(context, "block_number")?;
    let station = integer(context, "station_number")?;
    Some(format!("{:02}{:03}", block, station))
}

fn buoy_composite(context: &QualifierContext) -> Option<String> {
    let region = integer(context, "region_number")?;
    let sub_area = integer(context, "wmo_region_sub_area")?;
    let platform = integer(context, "buoy_or_platform_identifier")?;
    Some(format!("{:01}{:01}{:03}", region, sub_area, platform))
}

fn marine_platform(context: &QualifierContext) -> Option<String> {
    trimmed_text(context, "stationary_buoy_platform_identifier_e_g_c_man_buoys").or_else(|| {
        match context.get(CLASS, "marine_observing_platform_identifier")? {
            QualifierReading::Number(value) => Some(format!("{:07}", value.round() as i64)),
            QualifierReading::Text(text) => Some(trim_identifier(
                "marine_observing_platform_identifier",
                text,
            )),
            QualifierReading::Series(_) => None,
        }
    })
}

fn integer(context: &QualifierContext, key: &str) -> Option<i64> {
    context.number(CLASS, key).map(|value| value.round() as i64)
}

fn trimmed_text(context: &QualifierContext, key: &str) -> Option<String> {
    let text = context.text(CLASS, key)?;
    let trimmed = trim_identifier(key, text);
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Trim an IA5 identifier, warning unless only trailing blanks were removed
pub fn trim_identifier(key: &str, raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() != raw.trim_end_matches(' ').len() {
        warn!("Identifier {} '{}' trimmed to '{}'", key, raw, trimmed);
    }
    trimmed.to_string()
}
