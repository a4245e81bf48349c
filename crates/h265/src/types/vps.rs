use super::hrd::Hrd;
use super::ptl::{ProfileTierLevel, SUB_LAYERS_MAX};
use crate::error::Error;

/// Maximum number of VPS slots (`vps_video_parameter_set_id` is 4 bits).
pub const VPS_MAX_COUNT: usize = 16;

/// One `hrd_parameters()` entry of the VPS timing block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VpsHrd {
    pub hrd_layer_set_idx: u32,
    /// Inferred to be 1 for the first entry (7.4.3.1).
    pub cprms_present_flag: bool,
    pub hrd: Hrd,
}

/// The video parameter set RBSP.
///
/// ITU-T H.265 - 7.3.2.1
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vps {
    pub vps_video_parameter_set_id: u32,
    pub vps_base_layer_internal_flag: bool,
    pub vps_base_layer_available_flag: bool,
    pub vps_max_layers_minus1: u32,

    /// Range is \[0, 6\].
    pub vps_max_sub_layers_minus1: u32,

    pub vps_temporal_id_nesting_flag: bool,
    pub vps_reserved_0xffff_16bits: u32,

    pub profile_tier_level: ProfileTierLevel,

    pub vps_sub_layer_ordering_info_present_flag: bool,

    pub vps_max_dec_pic_buffering_minus1: [u32; SUB_LAYERS_MAX],
    pub vps_max_num_reorder_pics: [u32; SUB_LAYERS_MAX],
    pub vps_max_latency_increase_plus1: [u32; SUB_LAYERS_MAX],

    /// Range is \[0, 63\], with 63 being a corner case.
    pub vps_max_layer_id: u32,

    /// Range is \[0, 1023\].
    pub vps_num_layer_sets_minus1: u32,

    /// `vps_num_layer_sets_minus1 + 1` rows of `vps_max_layer_id + 1` flags;
    /// row 0 is never coded.
    pub layer_id_included_flag: Vec<Vec<bool>>,

    pub vps_timing_info_present_flag: bool,
    pub vps_num_units_in_tick: u32,
    pub vps_time_scale: u32,
    pub vps_poc_proportional_to_timing_flag: bool,
    pub vps_num_ticks_poc_diff_one_minus1: u32,

    pub vps_num_hrd_parameters: u32,
    pub hrd_parameters: Vec<VpsHrd>,

    pub vps_extension_flag: bool,
}

impl Vps {
    /// Parses one complete VPS NAL unit (header included, start code
    /// excluded, emulation prevention intact).
    pub fn parse(buf: &[u8]) -> Result<Self, Error> {
        crate::reader::parse_vps(buf)
    }
}
