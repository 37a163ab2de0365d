//! Preferred-unit conversion
//!
//! Only linear conversions within a dimension are known: temperature between
//! kelvin and degrees Celsius, pressure between pascal, hectopascal and
//! kilopascal.

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dimension {
    Temperature,
    Pressure,
}

/// (unit, dimension, scale to base unit, offset to base unit)
const UNITS: &[(&str, Dimension, f64, f64)] = &[
    ("K", Dimension::Temperature, 1.0, 0.0),
    ("Celsius", Dimension::Temperature, 1.0, 273.15),
    ("C", Dimension::Temperature, 1.0, 273.15),
    ("degC", Dimension::Temperature, 1.0, 273.15),
    ("Pa", Dimension::Pressure, 1.0, 0.0),
    ("hPa", Dimension::Pressure, 100.0, 0.0),
    ("kPa", Dimension::Pressure, 1000.0, 0.0),
];

fn lookup(units: &str) -> Option<(Dimension, f64, f64)> {
    UNITS
        .iter()
        .find(|(name, ..)| *name == units)
        .map(|(_, dimension, scale, offset)| (*dimension, *scale, *offset))
}

/// Whether `from` can be converted to `to`
pub fn is_supported(from: &str, to: &str) -> bool {
    from == to
        || matches!((lookup(from), lookup(to)), (Some((a, ..)), Some((b, ..))) if a == b)
}

/// Convert `value` from `from` units to `to` units
pub fn convert(value: f64, from: &str, to: &str) -> Result<f64> {
    if from == to {
        return Ok(value);
    }
    match (lookup(from), lookup(to)) {
        (Some((from_dim, from_scale, from_offset)), Some((to_dim, to_scale, to_offset)))
            if from_dim == to_dim =>
        {
            let base = value * from_scale + from_offset;
            Ok((base - to_offset) / to_scale)
        }
        _ => Err(Error::unit_conversion(from, to)),
    }
}

/// Change in decimal scale when a value moves from `from` to `to` units
///
/// Pascal at scale -1 becomes hectopascal at scale 1. Unknown or unrelated
/// units keep their scale.
pub fn scale_shift(from: &str, to: &str) -> i32 {
    match (lookup(from), lookup(to)) {
        (Some((from_dim, from_scale, _)), Some((to_dim, to_scale, _))) if from_dim == to_dim => {
            (to_scale / from_scale).log10().round() as i32
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::derivation::round_to_scale;

    #[test]
    fn test_kelvin_to_celsius() {
        let celsius = convert(300.0, "K", "Celsius").unwrap();
        assert_eq!(round_to_scale(celsius, 6), 26.85);
    }

    #[test]
    fn test_pascal_to_hectopascal() {
        assert_eq!(convert(101325.0, "Pa", "hPa").unwrap(), 1013.25);
        assert_eq!(convert(1013.25, "hPa", "Pa").unwrap(), 101325.0);
    }

    #[test]
    fn test_scale_shift() {
        assert_eq!(scale_shift("Pa", "hPa"), 2);
        assert_eq!(scale_shift("hPa", "Pa"), -2);
        assert_eq!(scale_shift("hPa", "kPa"), 1);
        assert_eq!(scale_shift("K", "Celsius"), 0);
        assert_eq!(scale_shift("m", "ft"), 0);
    }

    #[test]
    fn test_unsupported_conversions() {
        assert!(convert(1.0, "K", "hPa").is_err());
        assert!(convert(1.0, "m", "ft").is_err());
        assert!(!is_supported("K", "Pa"));
        assert!(is_supported("K", "degC"));
        assert!(is_supported("m", "m"));
    }
}
