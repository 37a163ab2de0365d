//! Record emission for one subset's element stream
//!
//! The [`RecordEmitter`] drives a single linear scan. Each element is
//! classified by its descriptor class:
//!
//! - classes 01-08 and the pinned `022067` update the qualifier context, with a
//!   key repeated immediately in classes 04-07 appended into a series
//! - class 31 (replication) is skipped
//! - classes 25, 33 and 35 are stored as auxiliary qualifiers
//! - every other class is data: a non-missing value becomes one
//!   [`Observation`](crate::app::models::Observation) carrying the location,
//!   time, identity and metadata in force
//!
//! [`ObservationStream`] wraps the emitter as a pull-based iterator; nothing is
//! read ahead and dropping the stream abandons the scan.
//!
//! Supporting modules:
//! - [`keys`] - decoder element name normalization
//! - [`units`] - preferred-unit conversion
//! - [`fingerprint`] - metadata snapshot hashing
//! - [`stats`] - scan statistics

pub mod emitter;
pub mod fingerprint;
pub mod keys;
pub mod stats;
pub mod units;

#[cfg(test)]
pub mod tests;

pub use emitter::{ObservationStream, RecordEmitter};
pub use fingerprint::metadata_hash;
pub use keys::normalize_key;
pub use stats::EmitterStats;
