//! Shared fixtures for qualifier context tests

use super::QualifierContext;
use crate::app::models::{Descriptor, ElementAttributes};


/// Parse a descriptor code
pub fn descriptor(code: &str) -> Descriptor {
    code.parse().unwrap()
}

/// Set a numeric qualifier with the given units and scale
#[allow(clippy::too_many_arguments)]
pub fn set_number(
    context: &mut QualifierContext,
    code: &str,
    key: &str,
    value: Option<f64>,
    units: &str,
    scale: i32,
    append: bool,
) {
    let d = descriptor(code);
    let attributes = ElementAttributes::new(d, units, scale, 0, 16);
    context.set(d, key, value, None, &attributes, append);
}

/// Set a CCITT IA5 text qualifier
pub fn set_text(context: &mut QualifierContext, code: &str, key: &str, text: Option<&str>) {
    let d = descriptor(code);
    let attributes = ElementAttributes::new(d, "CCITT IA5", 0, 0, 128);
    context.set(d, key, None, text.map(str::to_string), &attributes, false);
}
