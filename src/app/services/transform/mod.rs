//! Message transformation into GeoJSON features
//!
//! Runs a fresh [`RecordEmitter`] over every subset of every decoded message
//! and shapes the observations into [`Feature`]s with deterministic ids.
//!
//! Failures are isolated: a subset whose scan fails yields no features and the
//! run continues with the next subset; a message the decoder could not unpack
//! is skipped. With `fail_on_error` the first failure aborts the run instead.

pub mod stats;

#[cfg(test)]
pub mod tests;

pub use stats::TransformStats;

use crate::Result;
use crate::app::models::{DecodedMessage, DecodedSubset, Feature, MessageHeaders};
use crate::app::services::record_emitter::{EmitterStats, RecordEmitter};
use crate::app::services::table_resolver::TableResolver;
use crate::config::Config;
use tracing::{debug, error, info, warn};

/// Features produced by one subset
#[derive(Debug, Clone, PartialEq)]
pub struct SubsetFeatures {
    /// Message identifier from the headers
    pub message_id: String,
    /// Zero-based subset index within the message
    pub subset_index: usize,
    /// Features in emission order (empty when the subset failed)
    pub features: Vec<Feature>,
}

/// Transforms decoded messages using shared configuration and tables
pub struct MessageTransformer<'a> {
    config: &'a Config,
    resolver: &'a dyn TableResolver,
}

impl<'a> MessageTransformer<'a> {
    pub fn new(config: &'a Config, resolver: &'a dyn TableResolver) -> Self {
        Self { config, resolver }
    }

    /// Transform a stream of decoded messages
    ///
    /// Decoder failures are `Err` items of the stream; they are logged and
    /// counted unless `fail_on_error` is set.
    pub fn transform_messages<I>(&self, messages: I) -> Result<(Vec<SubsetFeatures>, TransformStats)>
    where
        I: IntoIterator<Item = Result<DecodedMessage>>,
    {
        let mut stats = TransformStats::new();
        let mut results = Vec::new();

        for message in messages {
            stats.messages += 1;
            match message {
                Ok(message) => {
                    results.extend(self.transform_message(&message, &mut stats)?);
                }
                Err(e) => {
                    if self.config.fail_on_error {
                        return Err(e);
                    }
                    error!("Skipping message {}: {}", stats.messages, e);
                    stats.failed_messages += 1;
                    stats.add_error(e.to_string());
                }
            }
        }

        info!("{}", stats.summary());
        Ok((results, stats))
    }

    /// Transform every subset of one message
    pub fn transform_message(
        &self,
        message: &DecodedMessage,
        stats: &mut TransformStats,
    ) -> Result<Vec<SubsetFeatures>> {
        let headers = &message.headers;
        let count = message.subset_count();
        info!("Processing message '{}' with {} subsets", headers.id, count);
        if let Some(declared) = headers.number_of_subsets {
            if declared != count {
                warn!(
                    "Message '{}' declares {} subsets but {} were decoded",
                    headers.id, declared, count
                );
            }
        }

        let mut results = Vec::with_capacity(count);
        for (index, subset) in message.subsets.iter().enumerate() {
            stats.subsets += 1;
            let features = match self.transform_subset(headers, subset, index, count) {
                Ok((features, emitter_stats)) => {
                    stats.features += features.len();
                    stats.elements.merge(&emitter_stats);
                    features
                }
                Err(e) => {
                    if self.config.fail_on_error {
                        return Err(e);
                    }
                    error!(
                        "Error transforming subset {} of message '{}', no data written: {}",
                        index, headers.id, e
                    );
                    stats.failed_subsets += 1;
                    stats.add_error(format!("{} subset {}: {}", headers.id, index, e));
                    Vec::new()
                }
            };
            results.push(SubsetFeatures {
                message_id: headers.id.clone(),
                subset_index: index,
                features,
            });
        }
        Ok(results)
    }

    /// Scan one subset; any error fails the whole subset
    pub fn transform_subset(
        &self,
        headers: &MessageHeaders,
        subset: &DecodedSubset,
        index: usize,
        subset_count: usize,
    ) -> Result<(Vec<Feature>, EmitterStats)> {
        let table_version = headers
            .master_tables_version_number
            .unwrap_or(self.config.default_table_version);
        let tag = if subset_count > 1 {
            format!("-{}", index)
        } else {
            String::new()
        };
        debug!(
            "Scanning subset {} ({} elements, table version {})",
            index,
            subset.elements.len(),
            table_version
        );

        let mut stream =
            RecordEmitter::new(self.config, self.resolver, table_version).stream(&subset.elements);
        let mut features = Vec::new();
        for observation in stream.by_ref() {
            let observation = observation?;
            let report_id = format!(
                "{}{}{}",
                headers.report_prefix(observation.identity.station_identifier()),
                headers.id,
                tag
            );
            features.push(Feature::from_observation(&observation, &report_id));
        }
        Ok((features, stream.stats().clone()))
    }
}
