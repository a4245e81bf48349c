use super::ptl::SUB_LAYERS_MAX;

/// Maximum number of coded picture buffers per sub-layer.
///
/// E.3.3 sets `CpbCnt = cpb_cnt_minus1[subLayerId] + 1` and E.3.2 bounds
/// `cpb_cnt_minus1` to \[0, 31\].
pub const CPBS_MAX: usize = 32;

/// One coded picture buffer entry of the sub-layer HRD parameters.
///
/// ITU-T H.265 - E.2.3
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cpb {
    pub bit_rate_value_minus1: u32,
    pub cpb_size_value_minus1: u32,
    pub cpb_size_du_value_minus1: u32,
    pub bit_rate_du_value_minus1: u32,
    pub cbr_flag: bool,
}

/// Sub-layer HRD parameters.
///
/// ITU-T H.265 - E.2.3
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubLayerHrd {
    /// Only the first `cpb_cnt_minus1 + 1` entries are meaningful.
    pub cpbs: [Cpb; CPBS_MAX],
}

/// Per-sub-layer block of the HRD parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HrdSubLayer {
    pub fixed_pic_rate_general_flag: bool,
    /// Inferred to be 1 when `fixed_pic_rate_general_flag` is set.
    pub fixed_pic_rate_within_cvs_flag: bool,
    pub elemental_duration_in_tc_minus1: u32,
    pub low_delay_hrd_flag: bool,
    pub cpb_cnt_minus1: u32,
    pub nal_hrd: SubLayerHrd,
    pub vcl_hrd: SubLayerHrd,
}

/// HRD parameters.
///
/// ITU-T H.265 - E.2.2
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hrd {
    pub nal_hrd_parameters_present_flag: bool,
    pub vcl_hrd_parameters_present_flag: bool,

    pub sub_pic_hrd_params_present_flag: bool,

    pub tick_divisor_minus2: u32,
    pub du_cpb_removal_delay_increment_length_minus1: u32,
    pub sub_pic_cpb_params_in_pic_timing_sei_flag: bool,
    pub dpb_output_delay_du_length_minus1: u32,

    pub bit_rate_scale: u32,
    pub cpb_size_scale: u32,

    pub cpb_size_du_scale: u32,

    /// Defaults to 23 when the common-info block is absent (E.3.2).
    pub initial_cpb_removal_delay_length_minus1: u32,
    /// Defaults to 23 when the common-info block is absent (E.3.2).
    pub au_cpb_removal_delay_length_minus1: u32,
    /// Defaults to 23 when the common-info block is absent (E.3.2).
    pub dpb_output_delay_length_minus1: u32,

    pub sub_layers: [HrdSubLayer; SUB_LAYERS_MAX],
}
