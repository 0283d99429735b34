//! Run-length expansion of compact airtime tables.
//!
//! # Algorithm
//!
//! 1. The first step value is repeated `preamble_run` times
//! 2. Following steps alternate between `first_run` and `second_run` repeats
//! 3. Output stops at `max_table_size` entries, truncating the last run
//! 4. If the steps run out first, the table is shorter than declared
//!
//! The alternation exists because LoRa symbols hold a non-integer number of
//! bytes at some spreading factors, so consecutive steps cover uneven byte
//! counts.

use super::ExpansionSpec;

/// Expand a compact table into one airtime (tenths of ms) per payload size.
///
/// The result has `min(max_table_size, total run length)` entries. A short
/// result is returned as-is; it is not zero padded.
pub fn expand(spec: &ExpansionSpec) -> Vec<u32> {
    let mut table = Vec::with_capacity(spec.max_table_size);
    let mut count = spec.preamble_run;
    let mut first = false;

    for &value in spec.sequence {
        let remaining = spec.max_table_size - table.len();
        let run = count.min(remaining);
        table.extend(std::iter::repeat(value).take(run));
        if table.len() >= spec.max_table_size {
            break;
        }

        first = !first;
        count = if first {
            spec.first_run
        } else {
            spec.second_run
        };
    }

    table
}

/// Total number of entries the sequence would produce without truncation.
pub fn full_run_length(spec: &ExpansionSpec) -> usize {
    let steps = spec.sequence.len();
    if steps == 0 {
        return 0;
    }
    // Steps after the first alternate first_run, second_run, first_run, ...
    let rest = steps - 1;
    let firsts = (rest + 1) / 2;
    let seconds = rest / 2;
    spec.preamble_run + firsts * spec.first_run + seconds * spec.second_run
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airtime::catalog::{lookup_spec, supported_keys};
    use crate::airtime::{Band, BandWidth, SpreadingFactor, TableKey};

    fn spec(
        preamble_run: usize,
        first_run: usize,
        second_run: usize,
        max_table_size: usize,
        sequence: &'static [u32],
    ) -> ExpansionSpec {
        ExpansionSpec {
            data_rate: "test",
            preamble_run,
            first_run,
            second_run,
            max_table_size,
            sequence,
        }
    }

    #[test]
    fn test_runs_alternate_after_preamble() {
        let table = expand(&spec(1, 2, 3, 100, &[10, 20, 30, 40]));
        assert_eq!(table, vec![10, 20, 20, 30, 30, 30, 40, 40]);
    }

    #[test]
    fn test_last_run_truncated_at_max() {
        let table = expand(&spec(2, 3, 3, 4, &[1, 2, 3]));
        assert_eq!(table, vec![1, 1, 2, 2]);
    }

    #[test]
    fn test_short_sequence_is_not_padded() {
        let s = spec(3, 4, 3, 50, &[5, 6]);
        let table = expand(&s);
        assert_eq!(table, vec![5, 5, 5, 6, 6, 6, 6]);
        assert_eq!(full_run_length(&s), 7);
    }

    #[test]
    fn test_zero_preamble_skips_first_value() {
        let table = expand(&spec(0, 1, 1, 10, &[7, 8, 9]));
        assert_eq!(table, vec![8, 9]);
    }

    #[test]
    fn test_eu868_sf7_index_51() {
        let key = TableKey::new(Band::Eu868, BandWidth::Bw125, SpreadingFactor::Sf7);
        let table = expand(lookup_spec(key).unwrap());
        assert_eq!(table.len(), 223);
        assert_eq!(&table[0..4], &[463, 463, 463, 515]);
        // 3 + 7 * 7 = 52 entries cover the first 15 steps
        assert_eq!(table[51], 1180);
        assert_eq!(table[52], 1231);
        assert_eq!(table[222], 3689);
    }

    #[test]
    fn test_catalog_lengths() {
        for key in supported_keys() {
            let spec = lookup_spec(key).unwrap();
            let table = expand(spec);
            assert_eq!(
                table.len(),
                spec.max_table_size.min(full_run_length(spec)),
                "length mismatch for {}",
                key
            );
        }
    }

    #[test]
    fn test_us915_dr3_is_short() {
        let key = TableKey::new(Band::Us915, BandWidth::Bw125, SpreadingFactor::Sf7);
        let spec = lookup_spec(key).unwrap();
        let table = expand(spec);
        assert_eq!(spec.max_table_size, 242);
        assert_eq!(table.len(), 147);
        assert_eq!(table.last(), Some(&2563));
    }

    #[test]
    fn test_expansion_is_deterministic() {
        for key in supported_keys() {
            let spec = lookup_spec(key).unwrap();
            assert_eq!(expand(spec), expand(spec));
        }
    }
}
