//! LoRa time-on-air tables.
//!
//! Estimates how long a LoRaWAN packet occupies the channel for a given
//! region, bandwidth, spreading factor and payload size, and answers the
//! inverse question of which payload sizes fit an airtime budget. Values
//! come from the regional parameter data-rate tables, with one decimal of
//! millisecond precision.
//!
//! # Example
//!
//! ```
//! use lora_airtime::{Band, TableCache};
//!
//! let cache = TableCache::new();
//! let table = cache.get_table(Band::Eu868, 125_000, 12).unwrap();
//!
//! assert_eq!(table.estimate_airtime_ms(0).unwrap(), 1155.1);
//! assert_eq!(table.max_payload_size(), 51);
//! ```

pub mod airtime;
pub mod geo;
#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used items
pub use airtime::{
    expand, lookup_spec, Airtime, AirtimeError, AirtimeTable, Band, BandWidth, ExpansionSpec,
    LoRaParams, SpreadingFactor, TableCache, TableKey,
};
#[cfg(feature = "server")]
pub use server::{AirtimeServer, ServerConfig, ServerError, DEFAULT_PORT};
