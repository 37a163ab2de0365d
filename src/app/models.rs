//! Data models for BUFR semantic derivation
//!
//! This module contains the core data structures describing the decoded element
//! stream handed over by an external BUFR decoder (descriptors, attributes, raw
//! values) and the qualifier records held while a subset is scanned.

use crate::constants::{
    AUXILIARY_CLASSES, PINNED_QUALIFIER_DESCRIPTOR, QUALIFIER_CLASS_LIMIT, STRUCTURAL_CLASS,
    UNITS_CCITT_IA5, UNITS_CODE_TABLE, UNITS_FLAG_TABLE,
};
use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub mod feature;
pub mod message;
pub mod observation;

pub use feature::{Feature, FeatureProperties, Geometry};
pub use message::{DecodedMessage, DecodedSubset, MessageHeaders};
pub use observation::{
    IdentityScheme, Location, MetadataEntry, Observation, ObservedValue, StationIdentity,
    TimeSpan, VerticalCoordinate,
};

// =============================================================================
// Descriptor
// =============================================================================

/// BUFR element descriptor `FXXYYY`
///
/// `F` selects the table, `XX` the class and `YYY` the entry within the class.
/// The class decides how the element is treated while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Descriptor {
    f: u8,
    x: u8,
    y: u16,
}

impl Descriptor {
    /// Create a descriptor from its F, X and Y parts
    pub fn new(f: u8, x: u8, y: u16) -> Result<Self> {
        if f > 3 || x > 63 || y > 255 {
            return Err(Error::invalid_descriptor(
                format!("{}{:02}{:03}", f, x, y),
                "F must be 0-3, XX 0-63 and YYY 0-255",
            ));
        }
        Ok(Self { f, x, y })
    }

    /// Table part (F)
    pub fn table(&self) -> u8 {
        self.f
    }

    /// Class part (XX)
    pub fn class(&self) -> u8 {
        self.x
    }

    /// Entry part (YYY)
    pub fn entry(&self) -> u16 {
        self.y
    }

    /// Six-digit code string
    pub fn code(&self) -> String {
        self.to_string()
    }

    /// Check whether this descriptor matches a six-digit code string
    pub fn is(&self, code: &str) -> bool {
        code.parse::<Descriptor>().is_ok_and(|other| other == *self)
    }

    /// Qualifier class slot for this descriptor, if its class holds qualifiers
    pub fn qualifier_class(&self) -> Option<QualifierClass> {
        QualifierClass::from_number(self.x)
    }

    /// Classify the element by descriptor class
    pub fn role(&self) -> ElementRole {
        if (self.f, self.x, self.y) == PINNED_QUALIFIER_DESCRIPTOR {
            return ElementRole::Qualifier;
        }
        match self.x {
            x if x < QUALIFIER_CLASS_LIMIT => ElementRole::Qualifier,
            STRUCTURAL_CLASS => ElementRole::Structural,
            x if AUXILIARY_CLASSES.contains(&x) => ElementRole::Auxiliary,
            _ => ElementRole::Data,
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}{:03}", self.f, self.x, self.y)
    }
}

impl FromStr for Descriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim();
        if code.len() != 6 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_descriptor(code, "expected six digits FXXYYY"));
        }
        let digit = |range: std::ops::Range<usize>| -> Result<u16> {
            code[range]
                .parse::<u16>()
                .map_err(|e| Error::invalid_descriptor(code, e.to_string()))
        };
        Self::new(digit(0..1)? as u8, digit(1..3)? as u8, digit(3..6)?)
    }
}

impl Serialize for Descriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Descriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        // Decoders emit either "012101" or the integer 12101
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(u32),
        }

        let code = match Repr::deserialize(deserializer)? {
            Repr::Text(text) => text,
            Repr::Number(number) => format!("{:06}", number),
        };
        code.parse().map_err(serde::de::Error::custom)
    }
}

/// How an element is treated while scanning a subset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    /// Scope qualifier (classes 01-08) or the pinned class-22 qualifier
    Qualifier,
    /// Auxiliary qualifier (processing, quality, monitoring)
    Auxiliary,
    /// Replication / structural descriptor, skipped
    Structural,
    /// Data-bearing element, emitted as an observation
    Data,
}

// =============================================================================
// Qualifier Classes
// =============================================================================

/// Closed set of descriptor classes that hold qualifiers in force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualifierClass {
    Identification,
    Instrumentation,
    InstrumentationDetail,
    Time,
    Latitude,
    Longitude,
    Vertical,
    Significance,
    Reserved,
    Oceanographic,
    Processing,
    Structural,
    Quality,
    Monitoring,
}

impl QualifierClass {
    /// Number of qualifier classes
    pub const COUNT: usize = 14;

    /// All qualifier classes in class-number order
    pub const ALL: [QualifierClass; Self::COUNT] = [
        Self::Identification,
        Self::Instrumentation,
        Self::InstrumentationDetail,
        Self::Time,
        Self::Latitude,
        Self::Longitude,
        Self::Vertical,
        Self::Significance,
        Self::Reserved,
        Self::Oceanographic,
        Self::Processing,
        Self::Structural,
        Self::Quality,
        Self::Monitoring,
    ];

    /// Map a descriptor class number onto its qualifier slot
    pub fn from_number(class: u8) -> Option<Self> {
        let class = match class {
            1 => Self::Identification,
            2 => Self::Instrumentation,
            3 => Self::InstrumentationDetail,
            4 => Self::Time,
            5 => Self::Latitude,
            6 => Self::Longitude,
            7 => Self::Vertical,
            8 => Self::Significance,
            9 => Self::Reserved,
            22 => Self::Oceanographic,
            25 => Self::Processing,
            31 => Self::Structural,
            33 => Self::Quality,
            35 => Self::Monitoring,
            _ => return None,
        };
        Some(class)
    }

    /// Descriptor class number
    pub fn number(&self) -> u8 {
        match self {
            Self::Identification => 1,
            Self::Instrumentation => 2,
            Self::InstrumentationDetail => 3,
            Self::Time => 4,
            Self::Latitude => 5,
            Self::Longitude => 6,
            Self::Vertical => 7,
            Self::Significance => 8,
            Self::Reserved => 9,
            Self::Oceanographic => 22,
            Self::Processing => 25,
            Self::Structural => 31,
            Self::Quality => 33,
            Self::Monitoring => 35,
        }
    }

    /// Two-digit class id ("01".."35")
    pub fn id(&self) -> String {
        format!("{:02}", self.number())
    }

    /// Position of this class in a fixed-size class table
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Auxiliary classes are never cleared by a missing value
    pub fn is_auxiliary(&self) -> bool {
        AUXILIARY_CLASSES.contains(&self.number())
    }
}

// =============================================================================
// Element Attributes and Values
// =============================================================================

/// How the value of an element is encoded, derived from its units attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueEncoding {
    Numeric,
    CodeTable,
    FlagTable,
    Text,
}

/// BUFR attributes of one descriptor occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementAttributes {
    /// Descriptor the attributes belong to
    pub code: Descriptor,

    /// Units, or one of "CODE TABLE", "FLAG TABLE", "CCITT IA5"
    pub units: String,

    /// Decimal scale
    #[serde(default)]
    pub scale: i32,

    /// Reference value
    #[serde(default)]
    pub reference: i64,

    /// Data width in bits
    #[serde(default)]
    pub width: u32,
}

impl ElementAttributes {
    /// Create attributes with explicit scale, reference and width
    pub fn new(
        code: Descriptor,
        units: impl Into<String>,
        scale: i32,
        reference: i64,
        width: u32,
    ) -> Self {
        Self {
            code,
            units: units.into(),
            scale,
            reference,
            width,
        }
    }

    /// Value encoding implied by the units attribute
    pub fn encoding(&self) -> ValueEncoding {
        match self.units.as_str() {
            UNITS_CODE_TABLE => ValueEncoding::CodeTable,
            UNITS_FLAG_TABLE => ValueEncoding::FlagTable,
            UNITS_CCITT_IA5 => ValueEncoding::Text,
            _ => ValueEncoding::Numeric,
        }
    }

    /// Whether the element carries text
    pub fn is_text(&self) -> bool {
        self.encoding() == ValueEncoding::Text
    }
}

/// Scalar value of a decoded element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawValue {
    /// Numeric view of the value
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Integer(value) => Some(*value as f64),
            RawValue::Float(value) => Some(*value),
            RawValue::Text(text) => text.trim().parse::<f64>().ok(),
        }
    }

    /// Integral view of the value, if it has no fractional part
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RawValue::Integer(value) => Some(*value),
            other => other
                .as_f64()
                .filter(|value| value.fract() == 0.0 && value.is_finite())
                .map(|value| value as i64),
        }
    }

    /// Text view of the value
    pub fn as_text(&self) -> String {
        match self {
            RawValue::Integer(value) => value.to_string(),
            RawValue::Float(value) => value.to_string(),
            RawValue::Text(text) => text.clone(),
        }
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Integer(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

/// One decoded element as produced by the external decoder
///
/// Missing-value sentinels are already normalized to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Decoder element name, e.g. `#1#airTemperature`
    pub key: String,

    /// Descriptor code
    #[serde(rename = "descriptorCode")]
    pub descriptor: Descriptor,

    /// Scalar value, `None` when the decoder reported a missing value
    #[serde(rename = "rawValue", default)]
    pub value: Option<RawValue>,

    /// BUFR attributes
    pub attributes: ElementAttributes,
}

impl Element {
    /// Create an element whose attributes code matches its descriptor
    pub fn new(
        key: impl Into<String>,
        descriptor: Descriptor,
        value: Option<RawValue>,
        units: impl Into<String>,
        scale: i32,
    ) -> Self {
        Self {
            key: key.into(),
            descriptor,
            value,
            attributes: ElementAttributes::new(descriptor, units, scale, 0, 0),
        }
    }

    /// Builder for the bit width attribute
    pub fn with_width(mut self, width: u32) -> Self {
        self.attributes.width = width;
        self
    }
}

// =============================================================================
// Qualifier Records
// =============================================================================

/// Numeric value of a qualifier in force
///
/// A series appears when a class 04-07 key repeats immediately in the stream,
/// e.g. a pair of time displacements bounding a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QualifierValue {
    Scalar(f64),
    Series(Vec<f64>),
}

impl QualifierValue {
    /// Scalar view, `None` for a series
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            QualifierValue::Scalar(value) => Some(*value),
            QualifierValue::Series(_) => None,
        }
    }

    /// All values in stream order
    pub fn values(&self) -> Vec<f64> {
        match self {
            QualifierValue::Scalar(value) => vec![*value],
            QualifierValue::Series(values) => values.clone(),
        }
    }

    /// Append a value, turning a scalar into an ordered pair
    pub fn push(&mut self, value: f64) {
        match self {
            QualifierValue::Scalar(previous) => {
                *self = QualifierValue::Series(vec![*previous, value]);
            }
            QualifierValue::Series(values) => values.push(value),
        }
    }
}

/// A qualifier in force, owned by its class slot in the qualifier context
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualifierRecord {
    /// Descriptor that set the qualifier
    pub code: Descriptor,

    /// Normalized key name
    pub key: String,

    /// Numeric value (absent for text qualifiers)
    pub value: Option<QualifierValue>,

    /// BUFR attributes of the setting element
    pub attributes: ElementAttributes,

    /// Decoded text (code/flag table entry or IA5 payload)
    pub description: Option<String>,
}

/// Read view of a qualifier: text for IA5 qualifiers, otherwise numeric
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QualifierReading<'a> {
    Number(f64),
    Series(&'a [f64]),
    Text(&'a str),
}

impl QualifierReading<'_> {
    /// Numeric value, if scalar
    pub fn as_number(&self) -> Option<f64> {
        match self {
            QualifierReading::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Text value, if text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            QualifierReading::Text(text) => Some(text),
            _ => None,
        }
    }
}
