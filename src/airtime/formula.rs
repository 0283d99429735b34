//! LoRa time-on-air from first principles.
//!
//! Calculates the transmission duration for a LoRa packet from payload size
//! and modulation parameters, using the formula from the Semtech SX1262
//! datasheet (Section 6.1.4). The regional tables in
//! [`catalog`](super::catalog) are derived from the same formula with
//! LoRaWAN defaults, so this is also how arbitrary parameters not covered
//! by a table are handled.
//!
//! # Example
//!
//! ```
//! use lora_airtime::airtime::{calculate_airtime_us, LoRaParams, LORAWAN_OVERHEAD_BYTES};
//!
//! let params = LoRaParams::default();
//! let airtime = calculate_airtime_us(51 + LORAWAN_OVERHEAD_BYTES, &params);
//! assert_eq!(airtime, 118_016);
//! ```

use super::{Airtime, TableKey};

/// Bytes a LoRaWAN frame adds around the application payload
/// (MHDR 1, FHDR 7, FPort 1, MIC 4).
pub const LORAWAN_OVERHEAD_BYTES: usize = 13;

/// LoRa modulation parameters for airtime calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoRaParams {
    /// Spreading factor (7-12)
    pub spreading_factor: u8,
    /// Bandwidth in Hz (typically 125000, 250000, or 500000)
    pub bandwidth_hz: u32,
    /// Coding rate denominator (5-8 for 4/5 to 4/8)
    pub coding_rate: u8,
    /// Preamble length in symbols (typically 8)
    pub preamble_symbols: u8,
    /// Whether explicit header mode is used
    pub explicit_header: bool,
    /// Whether CRC is enabled
    pub crc_enabled: bool,
}

impl Default for LoRaParams {
    /// LoRaWAN uplink defaults at SF7/125 kHz.
    fn default() -> Self {
        Self {
            spreading_factor: 7,
            bandwidth_hz: 125_000,
            coding_rate: 5, // 4/5
            preamble_symbols: 8,
            explicit_header: true,
            crc_enabled: true,
        }
    }
}

impl LoRaParams {
    /// LoRaWAN defaults for the bandwidth and spreading factor of a table.
    pub fn for_key(key: TableKey) -> Self {
        Self {
            spreading_factor: key.spreading_factor.value(),
            bandwidth_hz: key.bandwidth.hz(),
            ..Default::default()
        }
    }

    /// Check if low data rate optimization should be enabled.
    ///
    /// Required when symbol time exceeds 16ms (SF11/SF12 at 125kHz).
    pub fn low_data_rate_optimize(&self) -> bool {
        self.symbol_duration_us() > 16_000
    }

    /// Calculate symbol duration in microseconds.
    pub fn symbol_duration_us(&self) -> u64 {
        // T_sym = 2^SF / BW seconds
        let sf = self.spreading_factor as u64;
        let bw = self.bandwidth_hz as u64;
        if bw == 0 {
            return 0;
        }
        (1u64 << sf) * 1_000_000 / bw
    }

    fn symbol_duration_ns(&self) -> u64 {
        let bw = self.bandwidth_hz as u64;
        if bw == 0 {
            return 0;
        }
        (1u64 << self.spreading_factor) * 1_000_000_000 / bw
    }

    /// Number of payload symbols for `payload_bytes` of PHY payload.
    pub fn payload_symbols(&self, payload_bytes: usize) -> u32 {
        let sf = i64::from(self.spreading_factor);
        let de = i64::from(self.low_data_rate_optimize());
        let h = i64::from(!self.explicit_header);
        let crc_bits = if self.crc_enabled { 16 } else { 0 };

        // 8*PL - 4*SF + 28 + 16*CRC - 20*H
        let numerator = 8 * payload_bytes as i64 - 4 * sf + 28 + crc_bits - 20 * h;
        // 4 * (SF - 2*DE)
        let denominator = 4 * (sf - 2 * de);
        if denominator <= 0 {
            return 8;
        }

        // ceil for positive numerators, clamped at zero
        let blocks = if numerator > 0 {
            (numerator + denominator - 1) / denominator
        } else {
            0
        };
        8 + (blocks * i64::from(self.coding_rate)) as u32
    }
}

/// Calculate LoRa packet airtime in microseconds.
///
/// `payload_bytes` is the full PHY payload; add [`LORAWAN_OVERHEAD_BYTES`]
/// to an application payload size to match the regional tables.
pub fn calculate_airtime_us(payload_bytes: usize, params: &LoRaParams) -> u64 {
    let t_sym_ns = params.symbol_duration_ns();
    if t_sym_ns == 0 {
        return 0;
    }

    // Preamble: (preamble_symbols + 4.25) symbols, kept in quarter symbols
    let preamble_quarters = u64::from(params.preamble_symbols) * 4 + 17;
    let payload_quarters = u64::from(params.payload_symbols(payload_bytes)) * 4;

    (preamble_quarters + payload_quarters) * t_sym_ns / 4 / 1000
}

/// Calculate airtime in milliseconds (convenience wrapper).
pub fn calculate_airtime_ms(payload_bytes: usize, params: &LoRaParams) -> f64 {
    calculate_airtime_us(payload_bytes, params) as f64 / 1000.0
}

/// Airtime rounded to the nearest tenth of a millisecond.
pub fn calculate_airtime(payload_bytes: usize, params: &LoRaParams) -> Airtime {
    let us = calculate_airtime_us(payload_bytes, params);
    Airtime::from_tenths(((us + 50) / 100) as u32)
}
