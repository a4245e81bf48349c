use nutype_enum::nutype_enum;

nutype_enum! {
    /// Interpretation of the sample aspect ratio indicator.
    ///
    /// ITU-T H.265 - Table E.1
    pub enum AspectRatioIdc(u8) {
        /// Unspecified
        Unspecified = 0,
        /// 1:1 (square)
        Square = 1,
        /// 12:11
        Aspect12_11 = 2,
        /// 10:11
        Aspect10_11 = 3,
        /// 16:11
        Aspect16_11 = 4,
        /// 40:33
        Aspect40_33 = 5,
        /// 24:11
        Aspect24_11 = 6,
        /// 20:11
        Aspect20_11 = 7,
        /// 32:11
        Aspect32_11 = 8,
        /// 80:33
        Aspect80_33 = 9,
        /// 18:11
        Aspect18_11 = 10,
        /// 15:11
        Aspect15_11 = 11,
        /// 64:33
        Aspect64_33 = 12,
        /// 160:99
        Aspect160_99 = 13,
        /// 4:3
        Aspect4_3 = 14,
        /// 3:2
        Aspect3_2 = 15,
        /// 2:1
        Aspect2_1 = 16,
        /// sar_width and sar_height are coded explicitly
        ExtendedSar = 255,
    }
}

/// Table E.1 sample aspect ratios, indexed by `aspect_ratio_idc`. Index 0
/// ("unspecified") maps to 1:1.
pub(crate) const SAR_TABLE: [(u32, u32); 17] = [
    (1, 1),
    (1, 1),
    (12, 11),
    (10, 11),
    (16, 11),
    (40, 33),
    (24, 11),
    (20, 11),
    (32, 11),
    (80, 33),
    (18, 11),
    (15, 11),
    (64, 33),
    (160, 99),
    (4, 3),
    (3, 2),
    (2, 1),
];

/// Looks up the `aspect_ratio_idc` for an explicit sample aspect ratio.
///
/// Returns [`AspectRatioIdc::ExtendedSar`] when the ratio is not one of the
/// 16 predefined entries of Table E.1.
pub fn sar_to_aspect_ratio_idc(sar_width: u32, sar_height: u32) -> AspectRatioIdc {
    // Index 0 is 'unspecified' and never matched.
    for (idx, &(w, h)) in SAR_TABLE.iter().enumerate().skip(1) {
        if w == sar_width && h == sar_height {
            return AspectRatioIdc::from(idx as u8);
        }
    }
    AspectRatioIdc::ExtendedSar
}

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn table_round_trip() {
        for idx in 1..=16u8 {
            let (w, h) = SAR_TABLE[idx as usize];
            assert_eq!(sar_to_aspect_ratio_idc(w, h), AspectRatioIdc::from(idx));
        }
    }

    #[test]
    fn unknown_ratio_is_extended() {
        assert_eq!(sar_to_aspect_ratio_idc(5, 4), AspectRatioIdc::ExtendedSar);
        assert_eq!(sar_to_aspect_ratio_idc(0, 0), AspectRatioIdc::ExtendedSar);
    }
}
