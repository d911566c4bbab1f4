//! The stock level curve.

use saga_core::LevelCurve;

/// Per-level experience increments for the stock 150-level curve. Entry `n`
/// is the extra experience needed to go from level `n` to `n + 1`.
pub const LEVEL_DELTAS: [u64; 151] = [
    1000, 1020, 1040, 1061, 1082, 1117, 1153, 1190, 1228, 1267, 1308, 1350, 1393, 1438, 1488,
    1536, 1585, 1636, 1688, 1742, 1777, 1813, 1849, 1886, 1924, 1962, 2001, 2041, 2082, 2124,
    2166, 2209, 2253, 2298, 2378, 2461, 2547, 2636, 2728, 2823, 2913, 3006, 3102, 3201, 3303,
    3369, 3436, 3505, 3575, 3647, 3764, 3884, 4008, 4136, 4268, 4353, 4440, 4529, 4620, 4712,
    4863, 5019, 5180, 5346, 5517, 5694, 5876, 6064, 6258, 6458, 6684, 6918, 7160, 7411, 7670,
    7938, 8216, 8504, 8802, 9110, 9402, 9703, 10013, 10333, 10664, 10877, 11095, 11317, 11543,
    11774, 12151, 12540, 12941, 13355, 13782, 14223, 14678, 15148, 15633, 16133, 16456, 16785,
    17121, 17463, 17812, 18168, 18531, 18902, 19280, 19666, 20354, 21066, 21803, 22566, 23356,
    24173, 25019, 25895, 26801, 27739, 28627, 29543, 30488, 31464, 32471, 33120, 33782, 34458,
    35147, 35850, 36567, 37298, 38044, 38805, 39581, 40848, 42155, 43504, 44896, 46467, 48093,
    49776, 51518, 53321, 55187, 57119, 59118, 61187, 63329, 65546, 100000,
];

/// The stock curve as cumulative thresholds.
pub fn default_level_curve() -> LevelCurve {
    LevelCurve::from_deltas(&LEVEL_DELTAS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_curve_has_150_levels() {
        let curve = default_level_curve();
        assert_eq!(curve.max_level(), 150);
        assert_eq!(curve.threshold(1), Some(1000));
        assert_eq!(curve.threshold(2), Some(2020));
        assert_eq!(curve.level_for(1000), 1);
        assert_eq!(curve.level_for(2019), 1);
    }

    #[test]
    fn deltas_grow_monotonically() {
        assert!(LEVEL_DELTAS.windows(2).all(|w| w[0] <= w[1]));
    }
}
