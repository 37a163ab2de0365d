//! Scan state machine and pull-based observation stream

use super::fingerprint::metadata_hash;
use super::keys::normalize_key;
use super::stats::EmitterStats;
use super::units;
use crate::Result;
use crate::app::models::{
    Element, ElementRole, MetadataEntry, Observation, ObservedValue, RawValue, ValueEncoding,
};
use crate::app::services::derivation::{DerivedQualifiers, derive, round_to_scale};
use crate::app::services::qualifier_context::QualifierContext;
use crate::app::services::table_resolver::{TableResolver, flag_bits};
use crate::config::Config;
use crate::constants::APPENDABLE_CLASSES;
use std::borrow::Borrow;
use tracing::{debug, trace};

/// Element value after unit preference and table resolution
#[derive(Debug, Clone, PartialEq)]
struct DecodedValue {
    value: Option<f64>,
    units: String,
    /// Decimal scale of `value` in `units`
    scale: i32,
    description: Option<String>,
    flags: Vec<String>,
}

/// Derivations and metadata in force, reused until a qualifier changes
#[derive(Debug, Clone)]
struct InForce {
    derived: DerivedQualifiers,
    metadata: Vec<MetadataEntry>,
    metadata_hash: String,
}

/// Scanner for one subset's element stream
///
/// Each emitter owns a fresh [`QualifierContext`]; create one per subset.
pub struct RecordEmitter<'a> {
    config: &'a Config,
    resolver: &'a dyn TableResolver,
    table_version: u32,
    context: QualifierContext,
    last_key: Option<String>,
    position: usize,
    in_force: Option<InForce>,
    stats: EmitterStats,
}

impl<'a> RecordEmitter<'a> {
    /// Create an emitter resolving coded values against `table_version`
    pub fn new(config: &'a Config, resolver: &'a dyn TableResolver, table_version: u32) -> Self {
        Self {
            config,
            resolver,
            table_version,
            context: QualifierContext::new(),
            last_key: None,
            position: 0,
            in_force: None,
            stats: EmitterStats::new(),
        }
    }

    /// Qualifiers currently in force
    pub fn context(&self) -> &QualifierContext {
        &self.context
    }

    /// Statistics so far
    pub fn stats(&self) -> &EmitterStats {
        &self.stats
    }

    /// Wrap the emitter around an element source
    pub fn stream<I>(self, elements: I) -> ObservationStream<'a, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Borrow<Element>,
    {
        ObservationStream {
            emitter: self,
            elements: elements.into_iter(),
            failed: false,
        }
    }

    /// Consume one element, returning the observation it produces, if any
    pub fn step(&mut self, element: &Element) -> Result<Option<Observation>> {
        let index = self.position;
        self.position += 1;
        self.stats.elements += 1;

        let key = normalize_key(&element.key);
        let descriptor = element.descriptor;
        let role = descriptor.role();
        trace!("[{}] {} {} {:?}", index, descriptor, key, role);

        let observation = match role {
            ElementRole::Structural => {
                self.stats.structural += 1;
                None
            }
            ElementRole::Qualifier | ElementRole::Auxiliary => {
                let decoded = self.decode(element)?;
                let append = role == ElementRole::Qualifier
                    && APPENDABLE_CLASSES.contains(&descriptor.class())
                    && self.last_key.as_deref() == Some(key.as_str());
                let mut attributes = element.attributes.clone();
                attributes.units = decoded.units;
                attributes.scale = decoded.scale;
                self.context.set(
                    descriptor,
                    &key,
                    decoded.value,
                    decoded.description,
                    &attributes,
                    append,
                );
                self.in_force = None;
                match role {
                    ElementRole::Auxiliary => self.stats.auxiliary += 1,
                    _ => self.stats.qualifiers += 1,
                }
                None
            }
            ElementRole::Data => self.emit(element, &key, index)?,
        };

        self.last_key = Some(key);
        Ok(observation)
    }

    fn emit(&mut self, element: &Element, key: &str, index: usize) -> Result<Option<Observation>> {
        let Some(raw) = element.value.as_ref() else {
            debug!("Dropping {} ({}): missing value", key, element.descriptor);
            self.stats.dropped_missing += 1;
            return Ok(None);
        };

        let value = match element.attributes.encoding() {
            ValueEncoding::Text => ObservedValue::Text {
                text: raw.as_text(),
            },
            encoding => {
                let decoded = self.decode(element)?;
                let Some(number) = decoded.value else {
                    debug!("Dropping {} ({}): value is not numeric", key, element.descriptor);
                    self.stats.dropped_missing += 1;
                    return Ok(None);
                };
                match encoding {
                    ValueEncoding::CodeTable => ObservedValue::CodedEntry {
                        code: number.round() as i64,
                        description: decoded.description.unwrap_or_default(),
                    },
                    ValueEncoding::FlagTable => ObservedValue::FlagSet {
                        value: number.round() as i64,
                        flags: decoded.flags,
                    },
                    _ => ObservedValue::Measurement {
                        value: number,
                        units: decoded.units,
                    },
                }
            }
        };

        let in_force = self.in_force()?;
        let observation = Observation {
            name: key.to_string(),
            descriptor: element.descriptor,
            value,
            location: in_force.derived.location,
            vertical: in_force.derived.vertical.clone(),
            time: in_force.derived.time,
            identity: in_force.derived.identity.clone(),
            metadata: in_force.metadata.clone(),
            metadata_hash: in_force.metadata_hash.clone(),
            sequence_index: index,
        };
        self.stats.observations += 1;
        Ok(Some(observation))
    }

    fn in_force(&mut self) -> Result<&InForce> {
        let in_force = match self.in_force.take() {
            Some(in_force) => in_force,
            None => {
                let metadata = self.context.snapshot();
                InForce {
                    derived: derive(&self.context, self.config)?,
                    metadata_hash: metadata_hash(&metadata)?,
                    metadata,
                }
            }
        };
        Ok(&*self.in_force.insert(in_force))
    }

    /// Apply unit preference and table resolution to an element's value
    fn decode(&mut self, element: &Element) -> Result<DecodedValue> {
        let attributes = &element.attributes;
        let mut decoded = DecodedValue {
            value: None,
            units: attributes.units.clone(),
            scale: attributes.scale,
            description: None,
            flags: Vec::new(),
        };
        let Some(raw) = element.value.as_ref() else {
            return Ok(decoded);
        };

        match attributes.encoding() {
            ValueEncoding::Text => decoded.description = Some(raw.as_text()),
            ValueEncoding::CodeTable => {
                decoded.value = raw.as_f64();
                decoded.description = code_of(raw).map(|code| {
                    self.resolver
                        .resolve_code(self.table_version, &element.descriptor, code)
                });
            }
            ValueEncoding::FlagTable => {
                decoded.value = raw.as_f64();
                if let Some(value) = code_of(raw) {
                    let width = if attributes.width > 0 {
                        attributes.width
                    } else {
                        u64::BITS - (value as u64).leading_zeros()
                    };
                    decoded.flags = self.resolver.resolve_flags(
                        self.table_version,
                        &element.descriptor,
                        &flag_bits(value, width),
                    );
                    decoded.description =
                        (!decoded.flags.is_empty()).then(|| decoded.flags.join("; "));
                }
            }
            ValueEncoding::Numeric => {
                decoded.value = raw.as_f64();
                if let (Some(value), Some(preferred)) =
                    (decoded.value, self.config.preferred_unit(&attributes.units))
                {
                    let converted = units::convert(value, &attributes.units, preferred)?;
                    decoded.value = Some(round_to_scale(
                        converted,
                        self.config.value_precision as i32,
                    ));
                    decoded.scale += units::scale_shift(&attributes.units, preferred);
                    decoded.units = preferred.to_string();
                    self.stats.conversions += 1;
                }
            }
        }
        Ok(decoded)
    }
}

fn code_of(raw: &RawValue) -> Option<i64> {
    raw.as_i64()
        .or_else(|| raw.as_f64().map(|value| value.round() as i64))
}

/// Pull-based iterator of observations over one subset
///
/// Stops after the first error; the emitter's context is never shared, so an
/// abandoned stream leaves nothing behind.
pub struct ObservationStream<'a, I> {
    emitter: RecordEmitter<'a>,
    elements: I,
    failed: bool,
}

impl<'a, I> ObservationStream<'a, I> {
    /// Statistics so far
    pub fn stats(&self) -> &EmitterStats {
        self.emitter.stats()
    }

    /// Recover the emitter (e.g. to read final statistics)
    pub fn into_emitter(self) -> RecordEmitter<'a> {
        self.emitter
    }
}

impl<I> Iterator for ObservationStream<'_, I>
where
    I: Iterator,
    I::Item: Borrow<Element>,
{
    type Item = Result<Observation>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        for element in self.elements.by_ref() {
            match self.emitter.step(element.borrow()) {
                Ok(Some(observation)) => return Some(Ok(observation)),
                Ok(None) => continue,
                Err(error) => {
                    self.failed = true;
                    return Some(Err(error));
                }
            }
        }
        None
    }
}
