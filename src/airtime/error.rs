//! Error type for airtime table construction and queries.

use super::TableKey;

/// Errors returned by table lookup and queries.
///
/// All variants are caller errors: the inputs were outside what the
/// regulatory tables cover. Nothing here is transient.
#[derive(Debug, Clone, PartialEq)]
pub enum AirtimeError {
    /// Raw bandwidth is not 125000, 250000 or 500000 Hz.
    InvalidBandwidth { hz: u32 },
    /// Raw spreading factor is outside 7..=12.
    InvalidSpreadingFactor { sf: u32 },
    /// No airtime table exists for this band/bandwidth/spreading factor.
    UnsupportedCombination { key: TableKey },
    /// Payload size is larger than the table covers.
    PayloadOutOfRange {
        payload_size: usize,
        max_payload_size: usize,
        /// Airtime of the largest payload the table covers.
        max_airtime_ms: f64,
    },
    /// No payload size reaches past the requested airtime.
    AirtimeTooLarge {
        airtime_ms: f64,
        /// Airtime of the largest payload the table covers.
        max_airtime_ms: f64,
    },
}

impl AirtimeError {
    /// Maximum airtime of the table involved, for errors raised by a query.
    pub fn max_airtime_ms(&self) -> Option<f64> {
        match self {
            Self::PayloadOutOfRange { max_airtime_ms, .. }
            | Self::AirtimeTooLarge { max_airtime_ms, .. } => Some(*max_airtime_ms),
            _ => None,
        }
    }

    /// Whether the error came from parameter validation rather than a query.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            Self::InvalidBandwidth { .. } | Self::InvalidSpreadingFactor { .. }
        )
    }
}

impl std::fmt::Display for AirtimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBandwidth { hz } => write!(f, "invalid bandwidth {} Hz", hz),
            Self::InvalidSpreadingFactor { sf } => write!(f, "invalid spreading factor {}", sf),
            Self::UnsupportedCombination { key } => write!(
                f,
                "unsupported combination: bandwidth {} spreading factor {} for {}",
                key.bandwidth, key.spreading_factor, key.band
            ),
            Self::PayloadOutOfRange {
                payload_size,
                max_payload_size,
                ..
            } => write!(
                f,
                "invalid payload size {}, needs to be in range 0 to {}",
                payload_size, max_payload_size
            ),
            Self::AirtimeTooLarge {
                airtime_ms,
                max_airtime_ms,
            } => write!(
                f,
                "invalid airtime {} ms, the maximum allowed airtime is {:.1} ms",
                airtime_ms, max_airtime_ms
            ),
        }
    }
}

impl std::error::Error for AirtimeError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airtime::{Band, BandWidth, SpreadingFactor};

    #[test]
    fn test_max_airtime_context() {
        let err = AirtimeError::PayloadOutOfRange {
            payload_size: 60,
            max_payload_size: 51,
            max_airtime_ms: 2793.5,
        };
        assert_eq!(err.max_airtime_ms(), Some(2793.5));
        assert!(!err.is_invalid_parameter());

        let err = AirtimeError::InvalidBandwidth { hz: 1 };
        assert_eq!(err.max_airtime_ms(), None);
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_display_messages() {
        let key = TableKey::new(Band::Eu868, BandWidth::Bw250, SpreadingFactor::Sf9);
        let msg = AirtimeError::UnsupportedCombination { key }.to_string();
        assert_eq!(
            msg,
            "unsupported combination: bandwidth BW250 spreading factor SF9 for EU868"
        );

        let msg = AirtimeError::AirtimeTooLarge {
            airtime_ms: 400.0,
            max_airtime_ms: 368.9,
        }
        .to_string();
        assert!(msg.contains("368.9 ms"), "got: {}", msg);
    }
}
