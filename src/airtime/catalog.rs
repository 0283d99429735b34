//! Compact airtime tables from the LoRaWAN regional parameters.
//!
//! Each table lists one airtime per "step" (in tenths of a millisecond). A
//! step covers a run of consecutive payload sizes that share the same number
//! of LoRa symbols; [`expand`](super::expand) turns the steps back into one
//! value per payload byte.
//!
//! Payload sizes are application payload bytes. The LoRaWAN MAC header,
//! FHDR, FPort and MIC (13 bytes) are already accounted for in the values.

use super::{Band, BandWidth, SpreadingFactor, TableKey};

/// Parameters for expanding one compact table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionSpec {
    /// Regional data rate name, e.g. `"DR5"`.
    pub data_rate: &'static str,
    /// Payload sizes covered by the first step.
    pub preamble_run: usize,
    /// Run length used after odd-numbered steps.
    pub first_run: usize,
    /// Run length used after even-numbered steps.
    pub second_run: usize,
    /// Number of payload sizes the table is declared to cover.
    pub max_table_size: usize,
    /// Airtime per step, tenths of a millisecond.
    pub sequence: &'static [u32],
}

// ==================== US915 uplink ====================

const US915_DR0_BW125_SF10: &[u32] = &[2888, 3297, 3707];

const US915_DR1_BW125_SF9: &[u32] = &[
    1649, 1853, 2058, 2263, 2468, 2673, 2877, 3082, 3287, 3492, 3697, 3901,
];

const US915_DR2_BW125_SF8: &[u32] = &[
    824, 927, 1029, 1132, 1234, 1336, 1439, 1541, 1644, 1746, 1848, 1951, 2053, 2156, 2258, 2360,
    2463, 2565, 2668, 2770, 2872, 2975, 3077, 3180, 3282, 3384, 3487, 3589, 3692, 3794, 3896, 3999,
];

const US915_DR3_BW125_SF7: &[u32] = &[
    463, 515, 566, 617, 668, 719, 771, 822, 873, 924, 975, 1027, 1078, 1129, 1180, 1231, 1283,
    1334, 1385, 1436, 1487, 1539, 1590, 1641, 1692, 1743, 1795, 1846, 1897, 1948, 1999, 2051,
    2102, 2153, 2204, 2255, 2307, 2358, 2409, 2460, 2511, 2563,
];

// DR4 (uplink, 904.6 MHz) and DR12 (downlink) share the same table.
const US915_DR4_DR12_BW500_SF8: &[u32] = &[
    206, 232, 257, 283, 308, 334, 360, 385, 411, 436, 462, 488, 513, 539, 564, 590, 616, 641, 667,
    692, 718, 744, 769, 795, 820, 846, 872, 897, 923, 948, 974, 1000, 1025, 1051, 1076, 1102,
    1128, 1153, 1179, 1204, 1230, 1256, 1281, 1307, 1332, 1358, 1384, 1409, 1435, 1460, 1486,
    1512, 1537, 1563, 1588, 1614, 1640,
];

// ==================== US915 downlink ====================

const US915_DR8_BW500_SF12: &[u32] = &[2888, 3297, 3707, 4116, 4529, 4936];

const US915_DR9_BW500_SF11: &[u32] = &[
    1444, 1649, 1853, 2058, 2263, 2468, 2673, 2877, 3082, 3287, 3492, 3697, 3901, 4106, 4311,
    4516, 4721, 4925, 5130, 5335, 5540,
];

// Step 35 is 430.6 ms (one 5-symbol step above 420.4 ms). The regional
// table this was taken from lists 4036 there, which would step down.
const US915_DR10_BW500_SF10: &[u32] = &[
    722, 824, 927, 1029, 1132, 1234, 1336, 1439, 1541, 1644, 1746, 1848, 1951, 2053, 2156, 2258,
    2360, 2463, 2565, 2668, 2770, 2872, 2975, 3077, 3180, 3282, 3384, 3487, 3589, 3692, 3794,
    3896, 3999, 4101, 4204, 4306, 4408, 4511, 4613, 4716, 4818, 4920, 5023, 5125, 5228, 5330,
];

const US915_DR11_BW500_SF9: &[u32] = &[
    412, 463, 515, 566, 617, 668, 719, 771, 822, 873, 924, 975, 1027, 1078, 1129, 1180, 1231,
    1283, 1334, 1385, 1436, 1487, 1539, 1590, 1641, 1692, 1743, 1795, 1846, 1897, 1948, 1999,
    2051, 2102, 2153, 2204, 2255, 2307, 2358, 2409, 2460, 2511, 2563, 2614, 2665, 2716, 2767,
    2819, 2870, 2921,
];

const US915_DR13_BW500_SF7: &[u32] = &[
    116, 129, 141, 154, 167, 180, 193, 205, 218, 231, 244, 257, 269, 282, 295, 308, 321, 333, 346,
    359, 372, 385, 397, 410, 423, 436, 449, 461, 474, 487, 500, 513, 525, 538, 551, 564, 577, 589,
    602, 615, 628, 641, 653, 666, 679, 692, 705, 717, 730, 743, 756, 769, 781, 794, 807, 820, 833,
    845, 858, 871, 884, 897, 909, 922,
];

// ==================== EU868 ====================

const EU868_DR0_BW125_SF12: &[u32] = &[
    11551, 13189, 14828, 16466, 18104, 19743, 21381, 23020, 24658, 26296, 27935,
];

const EU868_DR1_BW125_SF11: &[u32] = &[
    5775, 6595, 7414, 8233, 9052, 9871, 10691, 11510, 12329, 13148, 13967, 14787, 15606,
];

const EU868_DR2_BW125_SF10: &[u32] = &[
    2888, 3297, 3707, 4116, 4526, 4936, 5345, 5755, 6164, 6574, 6984,
];

const EU868_DR3_BW125_SF9: &[u32] = &[
    1649, 1853, 2058, 2263, 2468, 2673, 2877, 3082, 3287, 3492, 3697, 3901, 4106, 4311, 4516,
    4721, 4925, 5130, 5335, 5540, 5745, 5949, 6154, 6359, 6564, 6769,
];

const EU868_DR4_BW125_SF8: &[u32] = &[
    824, 927, 1029, 1132, 1234, 1336, 1439, 1541, 1644, 1746, 1848, 1951, 2053, 2156, 2258, 2360,
    2463, 2565, 2668, 2770, 2872, 2975, 3077, 3180, 3282, 3384, 3487, 3589, 3692, 3794, 3896,
    3999, 4101, 4204, 4306, 4408, 4511, 4613, 4716, 4818, 4920, 5023, 5125, 5228, 5330, 5432,
    5535, 5637, 5740, 5842, 5944, 6047, 6149, 6252, 6354, 6456, 6559,
];

const EU868_DR5_BW125_SF7: &[u32] = &[
    463, 515, 566, 617, 668, 719, 771, 822, 873, 924, 975, 1027, 1078, 1129, 1180, 1231, 1283,
    1334, 1385, 1436, 1487, 1539, 1590, 1641, 1692, 1743, 1795, 1846, 1897, 1948, 1999, 2051,
    2102, 2153, 2204, 2255, 2307, 2358, 2409, 2460, 2511, 2563, 2614, 2665, 2716, 2767, 2819,
    2870, 2921, 2972, 3023, 3075, 3126, 3177, 3228, 3279, 3331, 3382, 3433, 3484, 3535, 3587,
    3638, 3689,
];

const EU868_DR6_BW250_SF7: &[u32] = &[
    232, 257, 283, 308, 334, 360, 385, 411, 436, 462, 488, 513, 539, 564, 590, 616, 641, 667, 692,
    718, 744, 769, 795, 820, 846, 872, 897, 923, 948, 974, 1000, 1025, 1051, 1076, 1102, 1128,
    1153, 1179, 1204, 1230, 1256, 1281, 1307, 1332, 1358, 1384, 1409, 1435, 1460, 1486, 1512,
    1537, 1563, 1588, 1614, 1640, 1665, 1691, 1716, 1742, 1768, 1793, 1819, 1844,
];

const fn spec(
    data_rate: &'static str,
    preamble_run: usize,
    first_run: usize,
    second_run: usize,
    max_table_size: usize,
    sequence: &'static [u32],
) -> ExpansionSpec {
    ExpansionSpec {
        data_rate,
        preamble_run,
        first_run,
        second_run,
        max_table_size,
        sequence,
    }
}

use Band::{Eu868, Us915};
use BandWidth::{Bw125, Bw250, Bw500};
use SpreadingFactor::{Sf10, Sf11, Sf12, Sf7, Sf8, Sf9};

/// Every supported table.
static CATALOG: &[(TableKey, ExpansionSpec)] = &[
    (TableKey::new(Eu868, Bw125, Sf12), spec("DR0", 3, 5, 5, 52, EU868_DR0_BW125_SF12)),
    (TableKey::new(Eu868, Bw125, Sf11), spec("DR1", 1, 5, 4, 52, EU868_DR1_BW125_SF11)),
    (TableKey::new(Eu868, Bw125, Sf10), spec("DR2", 2, 5, 5, 52, EU868_DR2_BW125_SF10)),
    (TableKey::new(Eu868, Bw125, Sf9), spec("DR3", 5, 4, 5, 116, EU868_DR3_BW125_SF9)),
    (TableKey::new(Eu868, Bw125, Sf8), spec("DR4", 2, 4, 4, 223, EU868_DR4_BW125_SF8)),
    (TableKey::new(Eu868, Bw125, Sf7), spec("DR5", 3, 4, 3, 223, EU868_DR5_BW125_SF7)),
    (TableKey::new(Eu868, Bw250, Sf7), spec("DR6", 3, 4, 3, 223, EU868_DR6_BW250_SF7)),
    (TableKey::new(Us915, Bw125, Sf10), spec("DR0", 2, 5, 5, 11, US915_DR0_BW125_SF10)),
    (TableKey::new(Us915, Bw125, Sf9), spec("DR1", 5, 4, 5, 53, US915_DR1_BW125_SF9)),
    (TableKey::new(Us915, Bw125, Sf8), spec("DR2", 2, 4, 4, 125, US915_DR2_BW125_SF8)),
    (TableKey::new(Us915, Bw125, Sf7), spec("DR3", 3, 4, 3, 242, US915_DR3_BW125_SF7)),
    (TableKey::new(Us915, Bw500, Sf8), spec("DR4", 2, 4, 4, 222, US915_DR4_DR12_BW500_SF8)),
    (TableKey::new(Us915, Bw500, Sf12), spec("DR8", 6, 6, 6, 33, US915_DR8_BW500_SF12)),
    (TableKey::new(Us915, Bw500, Sf11), spec("DR9", 4, 6, 5, 109, US915_DR9_BW500_SF11)),
    (TableKey::new(Us915, Bw500, Sf10), spec("DR10", 2, 5, 5, 222, US915_DR10_BW500_SF10)),
    (TableKey::new(Us915, Bw500, Sf9), spec("DR11", 5, 4, 5, 222, US915_DR11_BW500_SF9)),
    (TableKey::new(Us915, Bw500, Sf7), spec("DR13", 3, 4, 3, 222, US915_DR13_BW500_SF7)),
];

/// Find the expansion parameters for a key.
///
/// Returns `None` for combinations with no regional data rate (e.g. BW250
/// outside EU868 SF7).
pub fn lookup_spec(key: TableKey) -> Option<&'static ExpansionSpec> {
    CATALOG.iter().find(|(k, _)| *k == key).map(|(_, spec)| spec)
}

/// Keys of every table in the catalog.
pub fn supported_keys() -> impl Iterator<Item = TableKey> {
    CATALOG.iter().map(|(key, _)| *key)
}
