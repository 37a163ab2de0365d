//! Shared fixtures for derivation tests

use crate::app::models::{Descriptor, ElementAttributes};
use crate::app::services::qualifier_context::QualifierContext;

pub mod location_tests;
pub mod vertical_tests;

/// Builder for a qualifier context from (code, key, value, units, scale) rows
pub struct ContextBuilder {
    context: QualifierContext,
    last_key: Option<String>,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self {
            context: QualifierContext::new(),
            last_key: None,
        }
    }

    /// Numeric qualifier; a key repeated immediately in class 04-07 is appended
    pub fn number(mut self, code: &str, key: &str, value: f64, units: &str, scale: i32) -> Self {
        let descriptor: Descriptor = code.parse().unwrap();
        let attributes = ElementAttributes::new(descriptor, units, scale, 0, 16);
        let append = (4..=7).contains(&descriptor.class())
            && self.last_key.as_deref() == Some(key);
        self.context
            .set(descriptor, key, Some(value), None, &attributes, append);
        self.last_key = Some(key.to_string());
        self
    }

    /// CCITT IA5 text qualifier
    pub fn text(mut self, code: &str, key: &str, text: &str) -> Self {
        let descriptor: Descriptor = code.parse().unwrap();
        let attributes = ElementAttributes::new(descriptor, "CCITT IA5", 0, 0, 128);
        self.context
            .set(descriptor, key, None, Some(text.to_string()), &attributes, false);
        self.last_key = Some(key.to_string());
        self
    }

    pub fn build(self) -> QualifierContext {
        self.context
    }
}

/// Context with a complete date: 2022-03-20 21:00:00
pub fn dated() -> ContextBuilder {
    ContextBuilder::new()
        .number("004001", "year", 2022.0, "a", 0)
        .number("004002", "month", 3.0, "mon", 0)
        .number("004003", "day", 20.0, "d", 0)
        .number("004004", "hour", 21.0, "h", 0)
        .number("004005", "minute", 0.0, "min", 0)
}
