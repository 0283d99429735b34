//! Airtime lookup tables and the queries run against them.
//!
//! A table holds one airtime per payload size, stored as integer tenths of a
//! millisecond. Values never decrease with payload size, which the inverse
//! queries rely on.
//!
//! # Example
//!
//! ```
//! use lora_airtime::{Band, TableCache};
//!
//! let cache = TableCache::new();
//! let table = cache.get_table(Band::Eu868, 125_000, 7).unwrap();
//!
//! assert_eq!(table.estimate_airtime_ms(51).unwrap(), 118.0);
//! assert_eq!(table.max_payload_size(), 222);
//!
//! // First payload size that needs at least 100 ms
//! let budget = table.min_payload_size_for_airtime(100.0);
//! assert!(table.estimate_airtime_ms(budget).unwrap() >= 100.0);
//! ```

use super::{AirtimeError, Band, BandWidth, SpreadingFactor, TableKey};
use serde::{Serialize, Serializer};
use std::fmt;

/// Airtime as a fixed-point count of tenths of a millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Airtime(u32);

impl Airtime {
    pub const fn from_tenths(tenths: u32) -> Self {
        Self(tenths)
    }

    /// Round a millisecond value to the nearest tenth.
    ///
    /// Negative and NaN inputs map to zero.
    pub fn from_ms(ms: f64) -> Self {
        // float-to-int `as` saturates, and NaN becomes 0
        Self((ms * 10.0).round() as u32)
    }

    pub const fn as_tenths(self) -> u32 {
        self.0
    }

    /// Value in milliseconds.
    ///
    /// Division of two exact integers is correctly rounded, so the result is
    /// the same `f64` as the one-decimal literal (2888 tenths == `288.8`).
    pub fn as_ms(self) -> f64 {
        f64::from(self.0) / 10.0
    }

    /// Value in microseconds.
    pub fn as_us(self) -> u64 {
        u64::from(self.0) * 100
    }
}

impl fmt::Display for Airtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

impl Serialize for Airtime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_ms())
    }
}

/// Airtime for every payload size of one band/bandwidth/spreading factor.
///
/// Built by [`TableCache`](super::TableCache); immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirtimeTable {
    key: TableKey,
    tenths: Vec<u32>,
}

impl AirtimeTable {
    /// Wrap an expanded table. Returns `None` for an empty table.
    pub(crate) fn new(key: TableKey, tenths: Vec<u32>) -> Option<Self> {
        if tenths.is_empty() {
            return None;
        }
        Some(Self { key, tenths })
    }

    pub fn key(&self) -> TableKey {
        self.key
    }

    pub fn band(&self) -> Band {
        self.key.band
    }

    pub fn bandwidth(&self) -> BandWidth {
        self.key.bandwidth
    }

    pub fn spreading_factor(&self) -> SpreadingFactor {
        self.key.spreading_factor
    }

    /// Number of payload sizes covered (`max_payload_size() + 1`).
    pub fn len(&self) -> usize {
        self.tenths.len()
    }

    /// Always false: empty tables are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.tenths.is_empty()
    }

    /// Raw table in tenths of a millisecond.
    pub fn as_tenths(&self) -> &[u32] {
        &self.tenths
    }

    /// Largest payload size the table covers.
    pub fn max_payload_size(&self) -> usize {
        self.tenths.len() - 1
    }

    /// Airtime of the largest payload size.
    pub fn max_airtime(&self) -> Airtime {
        Airtime(self.tenths[self.tenths.len() - 1])
    }

    /// Airtime for a payload size.
    ///
    /// # Errors
    ///
    /// Returns [`AirtimeError::PayloadOutOfRange`] if `payload_size` is larger
    /// than [`max_payload_size`](Self::max_payload_size).
    pub fn estimate_airtime(&self, payload_size: usize) -> Result<Airtime, AirtimeError> {
        self.tenths
            .get(payload_size)
            .map(|&t| Airtime(t))
            .ok_or_else(|| AirtimeError::PayloadOutOfRange {
                payload_size,
                max_payload_size: self.max_payload_size(),
                max_airtime_ms: self.max_airtime().as_ms(),
            })
    }

    /// Airtime for a payload size in milliseconds, exact to one decimal.
    pub fn estimate_airtime_ms(&self, payload_size: usize) -> Result<f64, AirtimeError> {
        self.estimate_airtime(payload_size).map(Airtime::as_ms)
    }

    /// Smallest payload size whose airtime is at least `ms_airtime`.
    ///
    /// The budget is rounded to the nearest tenth of a millisecond first.
    /// Returns `len()` (one past the last valid payload size) when even the
    /// largest payload is shorter than the budget; callers must treat that
    /// as out of range.
    pub fn min_payload_size_for_airtime(&self, ms_airtime: f64) -> usize {
        let target = Airtime::from_ms(ms_airtime).as_tenths();
        self.tenths.partition_point(|&t| t < target)
    }

    /// Exclusive upper bound of the payload sizes sharing the airtime found
    /// by [`min_payload_size_for_airtime`](Self::min_payload_size_for_airtime).
    ///
    /// # Errors
    ///
    /// Returns [`AirtimeError::AirtimeTooLarge`] if that run of equal airtime
    /// reaches the end of the table, or no payload reaches the budget.
    pub fn max_payload_size_for_airtime(&self, ms_airtime: f64) -> Result<usize, AirtimeError> {
        let min = self.min_payload_size_for_airtime(ms_airtime);
        let too_large = || AirtimeError::AirtimeTooLarge {
            airtime_ms: ms_airtime,
            max_airtime_ms: self.max_airtime().as_ms(),
        };

        let time = *self.tenths.get(min).ok_or_else(too_large)?;
        let end = min + self.tenths[min..].partition_point(|&t| t == time);
        if end == self.tenths.len() {
            return Err(too_large());
        }
        Ok(end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airtime::catalog::{lookup_spec, supported_keys};
    use crate::airtime::expand;

    fn table(key: TableKey) -> AirtimeTable {
        AirtimeTable::new(key, expand(lookup_spec(key).unwrap())).unwrap()
    }

    fn eu_sf7() -> AirtimeTable {
        table(TableKey::new(
            Band::Eu868,
            BandWidth::Bw125,
            SpreadingFactor::Sf7,
        ))
    }

    #[test]
    fn test_fixed_point_exact() {
        assert_eq!(Airtime::from_tenths(2888).as_ms(), 288.8);
        assert_eq!(Airtime::from_tenths(116).as_ms(), 11.6);
        assert_eq!(Airtime::from_tenths(2888).to_string(), "288.8");
        assert_eq!(Airtime::from_tenths(5).to_string(), "0.5");
        assert_eq!(Airtime::from_tenths(1180).to_string(), "118.0");
        assert_eq!(Airtime::from_tenths(463).as_us(), 46_300);
    }

    #[test]
    fn test_from_ms_rounds() {
        assert_eq!(Airtime::from_ms(288.8).as_tenths(), 2888);
        assert_eq!(Airtime::from_ms(46.34).as_tenths(), 463);
        assert_eq!(Airtime::from_ms(46.36).as_tenths(), 464);
        assert_eq!(Airtime::from_ms(-3.0).as_tenths(), 0);
        assert_eq!(Airtime::from_ms(f64::NAN).as_tenths(), 0);
    }

    #[test]
    fn test_empty_table_rejected() {
        let key = TableKey::new(Band::Eu868, BandWidth::Bw125, SpreadingFactor::Sf7);
        assert!(AirtimeTable::new(key, Vec::new()).is_none());
    }

    #[test]
    fn test_estimate_boundaries() {
        let t = eu_sf7();
        let max = t.max_payload_size();
        assert_eq!(max, 222);
        assert_eq!(t.estimate_airtime_ms(max).unwrap(), 368.9);
        assert_eq!(t.estimate_airtime_ms(0).unwrap(), 46.3);

        let err = t.estimate_airtime_ms(max + 1).unwrap_err();
        assert_eq!(
            err,
            AirtimeError::PayloadOutOfRange {
                payload_size: 223,
                max_payload_size: 222,
                max_airtime_ms: 368.9,
            }
        );
    }

    #[test]
    fn test_min_payload_for_airtime() {
        let t = eu_sf7();
        assert_eq!(t.min_payload_size_for_airtime(0.0), 0);
        assert_eq!(t.min_payload_size_for_airtime(46.3), 0);
        assert_eq!(t.min_payload_size_for_airtime(46.4), 3);
        assert_eq!(t.min_payload_size_for_airtime(51.5), 3);
        assert_eq!(t.min_payload_size_for_airtime(118.0), 49);
        assert_eq!(t.min_payload_size_for_airtime(368.9), 220);
        // Past the end
        assert_eq!(t.min_payload_size_for_airtime(369.0), t.len());
    }

    #[test]
    fn test_max_payload_for_airtime() {
        let t = eu_sf7();
        assert_eq!(t.max_payload_size_for_airtime(46.3), Ok(3));
        assert_eq!(t.max_payload_size_for_airtime(51.5), Ok(7));
        assert_eq!(t.max_payload_size_for_airtime(118.0), Ok(52));
    }

    #[test]
    fn test_max_payload_for_airtime_too_large() {
        let t = eu_sf7();
        // Last plateau runs to the end of the table
        let err = t.max_payload_size_for_airtime(368.9).unwrap_err();
        assert_eq!(err.max_airtime_ms(), Some(368.9));

        // Nothing reaches the budget at all
        let err = t.max_payload_size_for_airtime(1000.0).unwrap_err();
        assert_eq!(
            err,
            AirtimeError::AirtimeTooLarge {
                airtime_ms: 1000.0,
                max_airtime_ms: 368.9,
            }
        );
    }

    #[test]
    fn test_all_tables_monotonic() {
        for key in supported_keys() {
            let t = table(key);
            for (i, pair) in t.as_tenths().windows(2).enumerate() {
                assert!(
                    pair[0] <= pair[1],
                    "{} decreases at payload {}: {} -> {}",
                    key,
                    i + 1,
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn test_forward_inverse_consistency() {
        for key in supported_keys() {
            let t = table(key);
            for p in 0..=t.max_payload_size() {
                let ms = t.estimate_airtime_ms(p).unwrap();
                let min = t.min_payload_size_for_airtime(ms);
                assert!(min <= p, "{} payload {}: min {} > p", key, p, min);
                match t.max_payload_size_for_airtime(ms) {
                    Ok(max) => assert!(p < max, "{} payload {}: max {} <= p", key, p, max),
                    Err(AirtimeError::AirtimeTooLarge { .. }) => {
                        // Only the final plateau may run off the end
                        assert_eq!(t.as_tenths()[p], t.max_airtime().as_tenths());
                    }
                    Err(e) => panic!("unexpected error: {}", e),
                }
            }
        }
    }

    #[test]
    fn test_accessors() {
        let t = eu_sf7();
        assert_eq!(t.band(), Band::Eu868);
        assert_eq!(t.bandwidth(), BandWidth::Bw125);
        assert_eq!(t.spreading_factor(), SpreadingFactor::Sf7);
        assert_eq!(t.len(), 223);
        assert!(!t.is_empty());
        assert_eq!(t.max_airtime(), Airtime::from_tenths(3689));
    }
}
