//! Qualifier context for a single subset scan
//!
//! Holds the "qualifiers in force" while the element stream of one subset is
//! scanned. Each qualifier class owns an ordered map from normalized key to
//! [`QualifierRecord`]; a record stays in force until it is overwritten or
//! explicitly cleared by an element with neither value nor description.
//!
//! # Set semantics
//!
//! - value and description both absent: the key is removed from its class slot
//!   (auxiliary classes 25, 33 and 35 ignore the clear)
//! - `append` with the key already present: the new value is pushed onto the
//!   existing one, producing an ordered series
//! - otherwise the full record is stored, replacing any previous one

use crate::app::models::{
    Descriptor, ElementAttributes, MetadataEntry, QualifierClass, QualifierReading,
    QualifierRecord, QualifierValue,
};
use crate::constants::{IDENTITY_KEYS, LOCATION_KEYS, TIME_KEYS};
use std::collections::BTreeMap;
use tracing::debug;

#[cfg(test)]
pub mod tests;

/// Class-scoped store of the qualifiers in force
#[derive(Debug, Clone, Default)]
pub struct QualifierContext {
    slots: [BTreeMap<String, QualifierRecord>; QualifierClass::COUNT],
}

impl QualifierContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the qualifier `key` of the descriptor's class
    pub fn set(
        &mut self,
        descriptor: Descriptor,
        key: &str,
        value: Option<f64>,
        description: Option<String>,
        attributes: &ElementAttributes,
        append: bool,
    ) {
        let Some(class) = descriptor.qualifier_class() else {
            debug!(
                "Descriptor {} ({}) is not in a qualifier class, ignoring",
                descriptor, key
            );
            return;
        };
        let slot = &mut self.slots[class.index()];

        if value.is_none() && description.is_none() {
            if class.is_auxiliary() {
                debug!("Keeping auxiliary qualifier {} in class {}", key, class.id());
            } else if slot.remove(key).is_some() {
                debug!("Cleared qualifier {} in class {}", key, class.id());
            }
            return;
        }

        if append {
            if let Some(record) = slot.get_mut(key) {
                if let Some(value) = value {
                    match record.value.as_mut() {
                        Some(existing) => existing.push(value),
                        None => record.value = Some(QualifierValue::Scalar(value)),
                    }
                }
                return;
            }
        }

        slot.insert(
            key.to_string(),
            QualifierRecord {
                code: descriptor,
                key: key.to_string(),
                value: value.map(QualifierValue::Scalar),
                attributes: attributes.clone(),
                description,
            },
        );
    }

    /// Record in force for `key`, if any
    pub fn record(&self, class: QualifierClass, key: &str) -> Option<&QualifierRecord> {
        self.slots[class.index()].get(key)
    }

    /// Whether `key` is in force
    pub fn contains(&self, class: QualifierClass, key: &str) -> bool {
        self.slots[class.index()].contains_key(key)
    }

    /// All records in force for a class, ordered by key
    pub fn records(&self, class: QualifierClass) -> impl Iterator<Item = &QualifierRecord> {
        self.slots[class.index()].values()
    }

    /// Read a qualifier: text for CCITT IA5 qualifiers, otherwise its value
    pub fn get(&self, class: QualifierClass, key: &str) -> Option<QualifierReading<'_>> {
        let reading = self.record(class, key).and_then(|record| {
            if record.attributes.is_text() {
                record.description.as_deref().map(QualifierReading::Text)
            } else {
                match record.value.as_ref()? {
                    QualifierValue::Scalar(value) => Some(QualifierReading::Number(*value)),
                    QualifierValue::Series(values) => Some(QualifierReading::Series(values)),
                }
            }
        });
        if reading.is_none() {
            debug!("Qualifier {} not found in class {}", key, class.id());
        }
        reading
    }

    /// Read a qualifier, falling back to `default` when absent
    pub fn get_or<'a>(
        &'a self,
        class: QualifierClass,
        key: &str,
        default: QualifierReading<'a>,
    ) -> QualifierReading<'a> {
        self.get(class, key).unwrap_or(default)
    }

    /// Scalar numeric value of a qualifier
    pub fn number(&self, class: QualifierClass, key: &str) -> Option<f64> {
        self.get(class, key).and_then(|reading| reading.as_number())
    }

    /// Text value of a CCITT IA5 qualifier
    pub fn text(&self, class: QualifierClass, key: &str) -> Option<&str> {
        match self.get(class, key)? {
            QualifierReading::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Generic metadata: every qualifier in force, in class then key order,
    /// except those surfaced through location, time or identity derivation
    pub fn snapshot(&self) -> Vec<MetadataEntry> {
        QualifierClass::ALL
            .iter()
            .flat_map(|class| self.records(*class))
            .filter(|record| !is_held_out(&record.key))
            .map(|record| MetadataEntry {
                name: record.key.clone(),
                value: record.value.clone(),
                units: record.attributes.units.clone(),
                description: record.description.clone(),
            })
            .collect()
    }

    /// Remove every qualifier
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(BTreeMap::clear);
    }

    /// Whether no qualifier is in force
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(BTreeMap::is_empty)
    }

    /// Number of qualifiers in force across all classes
    pub fn len(&self) -> usize {
        self.slots.iter().map(BTreeMap::len).sum()
    }
}

fn is_held_out(key: &str) -> bool {
    LOCATION_KEYS.contains(&key) || TIME_KEYS.contains(&key) || IDENTITY_KEYS.contains(&key)
}
