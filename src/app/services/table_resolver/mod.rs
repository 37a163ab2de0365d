//! Code and flag table resolution
//!
//! Translates coded element values into their WMO table text. The
//! [`TableResolver`] trait is the seam the record emitter depends on;
//! [`CodeFlagTables`] is the file-backed implementation reading the combined
//! `BUFRCREX_CodeFlag_en.txt` table of each master table version.
//!
//! Version tables are loaded lazily on first use and cached for the lifetime of
//! the store, so one store can be shared by concurrently running emitters.
//! Missing entries resolve to the `"Invalid"` placeholder with a warning.

pub mod loader;

#[cfg(test)]
pub mod tests;

pub use loader::LoadStats;

use crate::Error;
use crate::app::models::Descriptor;
use crate::constants::{CODE_FLAG_TABLE_FILE, INVALID_TABLE_ENTRY};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Lookup of code and flag table text
pub trait TableResolver: Send + Sync {
    /// Text of `code` in the code table of `descriptor`
    fn resolve_code(&self, table_version: u32, descriptor: &Descriptor, code: i64) -> String;

    /// Text of every set bit in a flag table bitstring (most significant bit first)
    fn resolve_flags(&self, table_version: u32, descriptor: &Descriptor, bits: &str)
    -> Vec<String>;
}

/// Render a flag value as a bitstring of `width` bits, most significant first
pub fn flag_bits(value: i64, width: u32) -> String {
    (0..width)
        .rev()
        .map(|bit| {
            if bit < 64 && (value >> bit) & 1 == 1 {
                '1'
            } else {
                '0'
            }
        })
        .collect()
}

/// Entries of one master table version: (descriptor, code figure) -> text
#[derive(Debug, Clone, Default)]
pub struct VersionTable {
    entries: HashMap<(Descriptor, i64), String>,
}

impl VersionTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry
    pub fn insert(&mut self, descriptor: Descriptor, code: i64, text: impl Into<String>) {
        self.entries.insert((descriptor, code), text.into());
    }

    /// Look up an entry
    pub fn get(&self, descriptor: &Descriptor, code: i64) -> Option<&str> {
        self.entries.get(&(*descriptor, code)).map(String::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// File-backed, lazily populated code and flag table store
#[derive(Debug, Default)]
pub struct CodeFlagTables {
    root: Option<PathBuf>,
    versions: RwLock<HashMap<u32, Arc<VersionTable>>>,
}

impl CodeFlagTables {
    /// Store reading `{root}/{version}/BUFRCREX_CodeFlag_en.txt` on demand
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            versions: RwLock::new(HashMap::new()),
        }
    }

    /// Store without a table directory; only inserted entries resolve
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Store with one version preloaded from a CSV reader
    pub fn from_reader<R: std::io::Read>(version: u32, reader: R) -> crate::Result<Self> {
        let (table, stats) = VersionTable::from_reader(reader, "<reader>")?;
        debug!("Preloaded table version {}: {}", version, stats.summary());
        let store = Self::in_memory();
        store.write_versions().insert(version, Arc::new(table));
        Ok(store)
    }

    /// Add a single entry to a version (creating it if needed)
    pub fn insert_entry(
        &self,
        version: u32,
        descriptor: Descriptor,
        code: i64,
        text: impl Into<String>,
    ) {
        let mut versions = self.write_versions();
        let table = versions.entry(version).or_default();
        Arc::make_mut(table).insert(descriptor, code, text);
    }

    /// Table for a version, loading it on first use
    pub fn version(&self, version: u32) -> Arc<VersionTable> {
        if let Some(table) = self
            .versions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&version)
        {
            return Arc::clone(table);
        }

        let mut versions = self.write_versions();
        // Another emitter may have loaded it while we waited for the lock
        if let Some(table) = versions.get(&version) {
            return Arc::clone(table);
        }
        let table = Arc::new(self.load_version(version));
        versions.insert(version, Arc::clone(&table));
        table
    }

    /// Versions currently cached
    pub fn cached_versions(&self) -> Vec<u32> {
        let mut versions: Vec<u32> = self
            .versions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        versions.sort_unstable();
        versions
    }

    fn table_path(&self, version: u32) -> Option<PathBuf> {
        self.root
            .as_deref()
            .map(|root: &Path| root.join(version.to_string()).join(CODE_FLAG_TABLE_FILE))
    }

    fn load_version(&self, version: u32) -> VersionTable {
        let Some(path) = self.table_path(version) else {
            return VersionTable::new();
        };
        if !path.exists() {
            warn!(
                "Code/flag table for version {} not found at {}, coded values will resolve to '{}'",
                version,
                path.display(),
                INVALID_TABLE_ENTRY
            );
            return VersionTable::new();
        }
        match VersionTable::load(&path) {
            Ok((table, stats)) => {
                info!("Loaded table version {}: {}", version, stats.summary());
                table
            }
            Err(e) => {
                warn!(
                    "{}",
                    Error::table_load(format!("version {} unusable, cached as empty: {}", version, e))
                );
                VersionTable::new()
            }
        }
    }

    fn write_versions(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, HashMap<u32, Arc<VersionTable>>> {
        self.versions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lookup(&self, table_version: u32, descriptor: &Descriptor, code: i64) -> String {
        match self.version(table_version).get(descriptor, code) {
            Some(text) => text.to_string(),
            None => {
                warn!(
                    "{}",
                    Error::table_lookup_miss(table_version, descriptor.code(), code.to_string())
                );
                INVALID_TABLE_ENTRY.to_string()
            }
        }
    }
}

impl TableResolver for CodeFlagTables {
    fn resolve_code(&self, table_version: u32, descriptor: &Descriptor, code: i64) -> String {
        self.lookup(table_version, descriptor, code)
    }

    fn resolve_flags(
        &self,
        table_version: u32,
        descriptor: &Descriptor,
        bits: &str,
    ) -> Vec<String> {
        bits.chars()
            .enumerate()
            .filter(|(_, bit)| *bit == '1')
            .map(|(position, _)| self.lookup(table_version, descriptor, position as i64 + 1))
            .collect()
    }
}
