//! LoRa airtime tables.
//!
//! This module contains:
//! - [`params`]: Band, bandwidth and spreading factor validation
//! - [`catalog`]: Compact regional data-rate tables
//! - [`expand`]: Run-length expansion of compact tables
//! - [`cache`]: Lazily built, shared tables
//! - [`table`]: Forward and inverse airtime queries
//! - [`formula`]: Semtech time-on-air formula

pub mod cache;
pub mod catalog;
mod error;
pub mod expand;
pub mod formula;
pub mod params;
pub mod table;

pub use cache::TableCache;
pub use catalog::{lookup_spec, supported_keys, ExpansionSpec};
pub use error::AirtimeError;
pub use expand::expand;
pub use formula::{
    calculate_airtime, calculate_airtime_ms, calculate_airtime_us, LoRaParams,
    LORAWAN_OVERHEAD_BYTES,
};
pub use params::{Band, BandWidth, ParseParamError, SpreadingFactor, TableKey};
pub use table::{Airtime, AirtimeTable};
