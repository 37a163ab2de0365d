//! Decoder element name normalization

use regex::Regex;
use std::sync::LazyLock;

static OCCURRENCE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[0-9]+#").expect("occurrence tag regex"));
static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("camel case regex"));

/// Normalize a decoder element name: `#2#airTemperature` -> `air_temperature`
pub fn normalize_key(name: &str) -> String {
    let untagged = OCCURRENCE_TAG.replace_all(name, "");
    CAMEL_BOUNDARY
        .replace_all(&untagged, "${1}_${2}")
        .to_lowercase()
}
