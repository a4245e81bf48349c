/// Maximum number of temporal sub-layers.
///
/// 7.4.3.1 and 7.4.3.2.1 bound both `vps_max_sub_layers_minus1` and
/// `sps_max_sub_layers_minus1` to \[0, 6\].
pub const SUB_LAYERS_MAX: usize = 7;

/// Fields common to the general and sub-layer profile/tier/level blocks.
///
/// This factorization of the 7.3.3 syntax is backed by the paragraph
/// following the definition of `reserved_zero_2bits` in 7.4.4.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PtlCore {
    pub profile_space: u32,
    pub tier_flag: bool,
    pub profile_idc: u32,
    pub profile_compatibility_flag: [bool; 32],
    pub progressive_source_flag: bool,
    pub interlaced_source_flag: bool,
    pub non_packed_constraint_flag: bool,
    pub frame_only_constraint_flag: bool,

    pub max_12bit_constraint_flag: bool,
    pub max_10bit_constraint_flag: bool,
    pub max_8bit_constraint_flag: bool,
    pub max_422chroma_constraint_flag: bool,
    pub max_420chroma_constraint_flag: bool,
    pub max_monochrome_constraint_flag: bool,
    pub intra_constraint_flag: bool,
    pub one_picture_only_constraint_flag: bool,
    pub lower_bit_rate_constraint_flag: bool,
    pub max_14bit_constraint_flag: bool,

    pub inbld_flag: bool,

    pub level_idc: u32,
}

/// Per-sub-layer presence flags inside `profile_tier_level`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SubLayerPresentFlags {
    pub profile: bool,
    pub level: bool,
}

/// The profile, tier and level syntax structure.
///
/// ITU-T H.265 - 7.3.3
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileTierLevel {
    pub general: PtlCore,

    /// Only the first `max_sub_layers_minus1` entries are meaningful.
    pub sub_layer_present_flags: [SubLayerPresentFlags; SUB_LAYERS_MAX],

    /// Only the first `max_sub_layers_minus1` entries are meaningful.
    pub sub_layers: [PtlCore; SUB_LAYERS_MAX],
}
