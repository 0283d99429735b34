//! Lazily built, shared airtime tables.
//!
//! Each band/bandwidth/spreading factor combination maps to one table. The
//! first request for a key expands the compact catalog entry; later requests
//! return the same `Arc`. Entries are never evicted: the key space is small
//! (at most 2 bands x 3 bandwidths x 6 spreading factors) and the tables are
//! fixed for the lifetime of the cache.
//!
//! The cache is an ordinary value. Share it between threads with an `Arc`
//! or a `&'static` reference; there is no process-wide instance.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use lora_airtime::{AirtimeError, Band, TableCache};
//!
//! let cache = TableCache::new();
//!
//! let a = cache.get_table(Band::Us915, 500_000, 8).unwrap();
//! let b = cache.get_table(Band::Us915, 500_000, 8).unwrap();
//! assert!(Arc::ptr_eq(&a, &b));
//!
//! // BW250 only exists for EU868 SF7
//! assert!(matches!(
//!     cache.get_table(Band::Eu868, 250_000, 9),
//!     Err(AirtimeError::UnsupportedCombination { .. })
//! ));
//! ```

use super::catalog::{lookup_spec, supported_keys};
use super::{expand, AirtimeError, AirtimeTable, Band, TableKey};
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cache of built airtime tables, keyed by [`TableKey`].
#[derive(Debug, Default)]
pub struct TableCache {
    tables: RwLock<HashMap<TableKey, Arc<AirtimeTable>>>,
}

impl TableCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the table for raw radio parameters, building it on first use.
    ///
    /// # Errors
    ///
    /// - [`AirtimeError::InvalidBandwidth`] if `bandwidth_hz` is not
    ///   125000, 250000 or 500000
    /// - [`AirtimeError::InvalidSpreadingFactor`] if `spreading_factor` is
    ///   outside 7..=12
    /// - [`AirtimeError::UnsupportedCombination`] if no regional data rate
    ///   uses this combination
    pub fn get_table(
        &self,
        band: Band,
        bandwidth_hz: u32,
        spreading_factor: u32,
    ) -> Result<Arc<AirtimeTable>, AirtimeError> {
        let key = TableKey::from_raw(band, bandwidth_hz, spreading_factor)?;
        self.get(key)
    }

    /// Get the table for an already validated key, building it on first use.
    ///
    /// A failed build leaves the cache untouched.
    pub fn get(&self, key: TableKey) -> Result<Arc<AirtimeTable>, AirtimeError> {
        if let Some(table) = self.read().get(&key) {
            return Ok(Arc::clone(table));
        }

        // Build outside the lock; expansion is pure, so a racing builder
        // produces an identical table and the first insert wins.
        let table = Arc::new(build(key)?);

        let mut tables = self.write();
        let entry = tables.entry(key).or_insert_with(|| {
            debug!("Cached airtime table {} ({} entries)", key, table.len());
            Arc::clone(&table)
        });
        Ok(Arc::clone(entry))
    }

    /// Whether a table for `key` has been built.
    pub fn contains(&self, key: TableKey) -> bool {
        self.read().contains_key(&key)
    }

    /// Number of tables built so far.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Build every table in the catalog.
    ///
    /// Returns the number of tables now cached.
    pub fn preload(&self) -> Result<usize, AirtimeError> {
        for key in supported_keys() {
            self.get(key)?;
        }
        Ok(self.len())
    }

    // Tables are immutable once inserted, so a panic while holding the lock
    // cannot leave the map half-updated; recover from poisoning.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<TableKey, Arc<AirtimeTable>>> {
        self.tables.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<TableKey, Arc<AirtimeTable>>> {
        self.tables.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Expand the catalog entry for `key`.
fn build(key: TableKey) -> Result<AirtimeTable, AirtimeError> {
    let spec = lookup_spec(key).ok_or(AirtimeError::UnsupportedCombination { key })?;
    let tenths = expand(spec);
    if tenths.len() < spec.max_table_size {
        warn!(
            "Airtime table {} ({}) has {} entries, declared {}",
            key,
            spec.data_rate,
            tenths.len(),
            spec.max_table_size
        );
    }
    AirtimeTable::new(key, tenths).ok_or(AirtimeError::UnsupportedCombination { key })
}
