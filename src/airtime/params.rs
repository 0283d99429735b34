//! Band, bandwidth and spreading factor parameters.
//!
//! Raw radio settings arrive as plain numbers (`125000` Hz, SF `7`). This
//! module maps them onto the canonical enumerations used to key airtime
//! tables, rejecting anything outside the supported set.
//!
//! # Example
//!
//! ```
//! use lora_airtime::{Band, BandWidth, SpreadingFactor, TableKey};
//!
//! let bw = BandWidth::from_hz(125_000).unwrap();
//! let sf = SpreadingFactor::from_value(7).unwrap();
//! let key = TableKey::new(Band::Eu868, bw, sf);
//! assert_eq!(key.to_string(), "EU868 BW125 SF7");
//! ```

use super::AirtimeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Regional parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    /// EU 863-870 MHz band
    #[serde(rename = "EU868")]
    Eu868,
    /// US 902-928 MHz band
    #[serde(rename = "US915")]
    Us915,
}

impl Band {
    /// All supported bands.
    pub const ALL: [Band; 2] = [Band::Eu868, Band::Us915];

    /// Canonical name, as used in regional parameter documents.
    pub fn name(self) -> &'static str {
        match self {
            Self::Eu868 => "EU868",
            Self::Us915 => "US915",
        }
    }
}

impl Default for Band {
    /// Band picked by the `region-*` features. EU868 when `region-eu868` or
    /// no region feature is enabled.
    fn default() -> Self {
        #[cfg(feature = "region-us915")]
        return Self::Us915;
        // region-eu868, or no region selected
        #[cfg(not(feature = "region-us915"))]
        Self::Eu868
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Band {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EU868" => Ok(Self::Eu868),
            "US915" => Ok(Self::Us915),
            _ => Err(ParseParamError::new("band", s)),
        }
    }
}

/// Channel bandwidth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BandWidth {
    /// 125 kHz
    #[serde(rename = "BW125")]
    Bw125,
    /// 250 kHz
    #[serde(rename = "BW250")]
    Bw250,
    /// 500 kHz
    #[serde(rename = "BW500")]
    Bw500,
}

impl BandWidth {
    /// All supported bandwidths.
    pub const ALL: [BandWidth; 3] = [BandWidth::Bw125, BandWidth::Bw250, BandWidth::Bw500];

    /// Canonicalize a raw bandwidth in Hz.
    ///
    /// # Errors
    ///
    /// Returns [`AirtimeError::InvalidBandwidth`] unless `hz` is exactly
    /// 125000, 250000 or 500000.
    pub fn from_hz(hz: u32) -> Result<Self, AirtimeError> {
        match hz {
            125_000 => Ok(Self::Bw125),
            250_000 => Ok(Self::Bw250),
            500_000 => Ok(Self::Bw500),
            _ => Err(AirtimeError::InvalidBandwidth { hz }),
        }
    }

    /// Bandwidth in Hz.
    pub fn hz(self) -> u32 {
        match self {
            Self::Bw125 => 125_000,
            Self::Bw250 => 250_000,
            Self::Bw500 => 500_000,
        }
    }
}

impl TryFrom<u32> for BandWidth {
    type Error = AirtimeError;

    fn try_from(hz: u32) -> Result<Self, Self::Error> {
        Self::from_hz(hz)
    }
}

impl fmt::Display for BandWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BW{}", self.hz() / 1000)
    }
}

impl FromStr for BandWidth {
    type Err = ParseParamError;

    /// Accepts `BW125` style names as well as raw Hz values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let parsed = match upper.strip_prefix("BW") {
            Some(khz) => khz.parse::<u32>().ok().and_then(|k| k.checked_mul(1000)),
            None => upper.parse::<u32>().ok(),
        };
        parsed
            .and_then(|hz| Self::from_hz(hz).ok())
            .ok_or_else(|| ParseParamError::new("bandwidth", s))
    }
}

/// LoRa spreading factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpreadingFactor {
    #[serde(rename = "SF7")]
    Sf7,
    #[serde(rename = "SF8")]
    Sf8,
    #[serde(rename = "SF9")]
    Sf9,
    #[serde(rename = "SF10")]
    Sf10,
    #[serde(rename = "SF11")]
    Sf11,
    #[serde(rename = "SF12")]
    Sf12,
}

impl SpreadingFactor {
    /// All supported spreading factors, lowest first.
    pub const ALL: [SpreadingFactor; 6] = [
        SpreadingFactor::Sf7,
        SpreadingFactor::Sf8,
        SpreadingFactor::Sf9,
        SpreadingFactor::Sf10,
        SpreadingFactor::Sf11,
        SpreadingFactor::Sf12,
    ];

    /// Canonicalize a raw spreading factor.
    ///
    /// # Errors
    ///
    /// Returns [`AirtimeError::InvalidSpreadingFactor`] outside `7..=12`.
    pub fn from_value(sf: u32) -> Result<Self, AirtimeError> {
        match sf {
            7 => Ok(Self::Sf7),
            8 => Ok(Self::Sf8),
            9 => Ok(Self::Sf9),
            10 => Ok(Self::Sf10),
            11 => Ok(Self::Sf11),
            12 => Ok(Self::Sf12),
            _ => Err(AirtimeError::InvalidSpreadingFactor { sf }),
        }
    }

    /// Numeric spreading factor (7-12).
    pub fn value(self) -> u8 {
        match self {
            Self::Sf7 => 7,
            Self::Sf8 => 8,
            Self::Sf9 => 9,
            Self::Sf10 => 10,
            Self::Sf11 => 11,
            Self::Sf12 => 12,
        }
    }
}

impl TryFrom<u32> for SpreadingFactor {
    type Error = AirtimeError;

    fn try_from(sf: u32) -> Result<Self, Self::Error> {
        Self::from_value(sf)
    }
}

impl fmt::Display for SpreadingFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SF{}", self.value())
    }
}

impl FromStr for SpreadingFactor {
    type Err = ParseParamError;

    /// Accepts `SF7` style names as well as raw numbers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let digits = upper.strip_prefix("SF").unwrap_or(upper.as_str());
        digits
            .parse::<u32>()
            .ok()
            .and_then(|sf| Self::from_value(sf).ok())
            .ok_or_else(|| ParseParamError::new("spreading factor", s))
    }
}

/// Identity of one airtime table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableKey {
    pub band: Band,
    pub bandwidth: BandWidth,
    pub spreading_factor: SpreadingFactor,
}

impl TableKey {
    pub const fn new(band: Band, bandwidth: BandWidth, spreading_factor: SpreadingFactor) -> Self {
        Self {
            band,
            bandwidth,
            spreading_factor,
        }
    }

    /// Validate raw numeric inputs and build a key.
    ///
    /// Bandwidth is checked before spreading factor, so an input with both
    /// wrong reports the bandwidth.
    pub fn from_raw(band: Band, bandwidth_hz: u32, spreading_factor: u32) -> Result<Self, AirtimeError> {
        let bandwidth = BandWidth::from_hz(bandwidth_hz)?;
        let spreading_factor = SpreadingFactor::from_value(spreading_factor)?;
        Ok(Self::new(band, bandwidth, spreading_factor))
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.band, self.bandwidth, self.spreading_factor)
    }
}

/// Failure to parse a parameter from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseParamError {
    what: &'static str,
    input: String,
}

impl ParseParamError {
    fn new(what: &'static str, input: &str) -> Self {
        Self {
            what,
            input: input.to_string(),
        }
    }
}

impl fmt::Display for ParseParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {:?}", self.what, self.input)
    }
}

impl std::error::Error for ParseParamError {}
