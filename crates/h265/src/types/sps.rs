use super::ptl::{ProfileTierLevel, SUB_LAYERS_MAX};
use super::vui::Vui;
use crate::error::Error;

/// Maximum number of SPS slots (`sps_seq_parameter_set_id` is in \[0, 15\]).
pub const SPS_MAX_COUNT: usize = 16;

/// Upper bound on `NumDeltaPocs` of a short-term reference picture set.
///
/// Follows from equation 7-71, the semantics of `num_negative_pics` and
/// `num_positive_pics` (7.4.8), `sps_max_dec_pic_buffering_minus1` (7.4.3.2.1)
/// and the derivation of `MaxDpbSize` in A.4.2.
pub const ST_REF_PIC_SET_PICS_MAX: usize = 16;

/// The scaling list syntax structure.
///
/// ITU-T H.265 - 7.3.4. Indexed `[size_id][matrix_id]`; the DC coefficients
/// only exist for `size_id > 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingListData {
    pub pred_mode_flag: [[bool; 6]; 4],
    pub pred_matrix_id_delta: [[u32; 6]; 4],
    pub dc_coef_minus8: [[i32; 6]; 4],
    pub delta_coef: [[[i32; 64]; 6]; 4],
}

impl Default for ScalingListData {
    fn default() -> Self {
        Self {
            pred_mode_flag: [[false; 6]; 4],
            pred_matrix_id_delta: [[0; 6]; 4],
            dc_coef_minus8: [[0; 6]; 4],
            delta_coef: [[[0; 64]; 6]; 4],
        }
    }
}

/// One short-term reference picture set.
///
/// ITU-T H.265 - 7.3.7. The `derived_*` fields are not syntax elements but
/// the 7.4.8 derivation results; later set entries cannot be parsed without
/// them. Note that `derived_delta_poc_s0[i]` is *not*
/// `delta_poc_s0_minus1[i] + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct StRefPicSet {
    pub inter_ref_pic_set_prediction_flag: bool,
    pub delta_idx_minus1: u32,
    pub delta_rps_sign: bool,
    pub abs_delta_rps_minus1: u32,

    /// Indexed by `j` in \[0, NumDeltaPocs\] (inclusive), hence one extra slot.
    pub used_by_curr_pic_flag: [bool; ST_REF_PIC_SET_PICS_MAX + 1],
    /// Defaults to 1 when not coded (7.4.8).
    pub use_delta_flag: [bool; ST_REF_PIC_SET_PICS_MAX + 1],

    pub num_negative_pics: u32,
    pub num_positive_pics: u32,
    pub delta_poc_s0_minus1: [u32; ST_REF_PIC_SET_PICS_MAX],
    pub used_by_curr_pic_s0_flag: [bool; ST_REF_PIC_SET_PICS_MAX],
    pub delta_poc_s1_minus1: [u32; ST_REF_PIC_SET_PICS_MAX],
    pub used_by_curr_pic_s1_flag: [bool; ST_REF_PIC_SET_PICS_MAX],

    pub derived_delta_poc_s0: [i32; ST_REF_PIC_SET_PICS_MAX],
    pub derived_delta_poc_s1: [i32; ST_REF_PIC_SET_PICS_MAX],
}

impl Default for StRefPicSet {
    fn default() -> Self {
        Self {
            inter_ref_pic_set_prediction_flag: false,
            delta_idx_minus1: 0,
            delta_rps_sign: false,
            abs_delta_rps_minus1: 0,
            used_by_curr_pic_flag: [false; ST_REF_PIC_SET_PICS_MAX + 1],
            use_delta_flag: [false; ST_REF_PIC_SET_PICS_MAX + 1],
            num_negative_pics: 0,
            num_positive_pics: 0,
            delta_poc_s0_minus1: [0; ST_REF_PIC_SET_PICS_MAX],
            used_by_curr_pic_s0_flag: [false; ST_REF_PIC_SET_PICS_MAX],
            delta_poc_s1_minus1: [0; ST_REF_PIC_SET_PICS_MAX],
            used_by_curr_pic_s1_flag: [false; ST_REF_PIC_SET_PICS_MAX],
            derived_delta_poc_s0: [0; ST_REF_PIC_SET_PICS_MAX],
            derived_delta_poc_s1: [0; ST_REF_PIC_SET_PICS_MAX],
        }
    }
}

/// Sequence parameter set range extension.
///
/// ITU-T H.265 - 7.3.2.2.2
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpsRangeExt {
    pub transform_skip_rotation_enabled_flag: bool,
    pub transform_skip_context_enabled_flag: bool,
    pub implicit_rdpcm_enabled_flag: bool,
    pub explicit_rdpcm_enabled_flag: bool,
    pub extended_precision_processing_flag: bool,
    pub intra_smoothing_disabled_flag: bool,
    pub high_precision_offsets_enabled_flag: bool,
    pub persistent_rice_adaptation_enabled_flag: bool,
    pub cabac_bypass_alignment_enabled_flag: bool,
}

/// Sequence parameter set multilayer extension.
///
/// ITU-T H.265 - F.7.3.2.2.4
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpsMultilayerExt {
    pub inter_view_mv_vert_constraint_flag: bool,
}

/// Sequence parameter set 3D extension. Fields are indexed by the depth
/// flag `d` in \[0, 1\].
///
/// ITU-T H.265 - I.7.3.2.2.5
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sps3dExt {
    pub iv_di_mc_enabled_flag: [bool; 2],
    pub iv_mv_scal_enabled_flag: [bool; 2],

    pub log2_ivmc_sub_pb_size_minus3: [u32; 2],
    pub iv_res_pred_enabled_flag: [bool; 2],
    pub depth_ref_enabled_flag: [bool; 2],
    pub vsp_mc_enabled_flag: [bool; 2],
    pub dbbp_enabled_flag: [bool; 2],

    pub tex_mc_enabled_flag: [bool; 2],
    pub log2_texmc_sub_pb_size_minus3: [u32; 2],
    pub intra_contour_enabled_flag: [bool; 2],
    pub intra_dc_only_wedge_enabled_flag: [bool; 2],
    pub cqt_cu_part_pred_enabled_flag: [bool; 2],
    pub inter_dc_only_enabled_flag: [bool; 2],
    pub skip_intra_enabled_flag: [bool; 2],
}

/// Sequence parameter set screen content coding extension.
///
/// ITU-T H.265 - 7.3.2.2.3. The palette predictor initializers span
/// `numComps` components (1 when `chroma_format_idc == 0`, else 3), each
/// coded with the component's bit depth. A.3.7 caps the predictor size
/// at 128.
#[derive(Debug, Clone, PartialEq)]
pub struct SpsSccExt {
    pub sps_curr_pic_ref_enabled_flag: bool,
    pub palette_mode_enabled_flag: bool,
    pub palette_max_size: u32,
    pub delta_palette_max_predictor_size: u32,
    pub sps_palette_predictor_initializer_present_flag: bool,
    pub sps_num_palette_predictor_initializer_minus1: u32,
    pub sps_palette_predictor_initializers: [[u32; 128]; 3],
    pub motion_vector_resolution_control_idc: u32,
    pub intra_boundary_filtering_disabled_flag: bool,
}

impl Default for SpsSccExt {
    fn default() -> Self {
        Self {
            sps_curr_pic_ref_enabled_flag: false,
            palette_mode_enabled_flag: false,
            palette_max_size: 0,
            delta_palette_max_predictor_size: 0,
            sps_palette_predictor_initializer_present_flag: false,
            sps_num_palette_predictor_initializer_minus1: 0,
            sps_palette_predictor_initializers: [[0; 128]; 3],
            motion_vector_resolution_control_idc: 0,
            intra_boundary_filtering_disabled_flag: false,
        }
    }
}

/// The sequence parameter set RBSP.
///
/// ITU-T H.265 - 7.3.2.2
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sps {
    pub sps_video_parameter_set_id: u32,

    /// Range is \[0, 6\].
    pub sps_max_sub_layers_minus1: u32,

    pub sps_temporal_id_nesting_flag: bool,

    pub profile_tier_level: ProfileTierLevel,

    pub sps_seq_parameter_set_id: u32,
    pub chroma_format_idc: u32,
    pub separate_colour_plane_flag: bool,
    pub pic_width_in_luma_samples: u32,
    pub pic_height_in_luma_samples: u32,
    pub conformance_window_flag: bool,
    pub conf_win_left_offset: u32,
    pub conf_win_right_offset: u32,
    pub conf_win_top_offset: u32,
    pub conf_win_bottom_offset: u32,
    pub bit_depth_luma_minus8: u32,
    pub bit_depth_chroma_minus8: u32,
    pub log2_max_pic_order_cnt_lsb_minus4: u32,
    pub sps_sub_layer_ordering_info_present_flag: bool,

    pub sps_max_dec_pic_buffering_minus1: [u32; SUB_LAYERS_MAX],
    pub sps_max_num_reorder_pics: [u32; SUB_LAYERS_MAX],
    pub sps_max_latency_increase_plus1: [u32; SUB_LAYERS_MAX],

    pub log2_min_luma_coding_block_size_minus3: u32,
    pub log2_diff_max_min_luma_coding_block_size: u32,
    pub log2_min_luma_transform_block_size_minus2: u32,
    pub log2_diff_max_min_luma_transform_block_size: u32,
    pub max_transform_hierarchy_depth_inter: u32,
    pub max_transform_hierarchy_depth_intra: u32,
    pub scaling_list_enabled_flag: bool,
    pub sps_scaling_list_data_present_flag: bool,

    pub scaling_list_data: ScalingListData,

    pub amp_enabled_flag: bool,
    pub sample_adaptive_offset_enabled_flag: bool,
    pub pcm_enabled_flag: bool,
    pub pcm_sample_bit_depth_luma_minus1: u32,
    pub pcm_sample_bit_depth_chroma_minus1: u32,
    pub log2_min_pcm_luma_coding_block_size_minus3: u32,
    pub log2_diff_max_min_pcm_luma_coding_block_size: u32,
    pub pcm_loop_filter_disabled_flag: bool,

    /// Range is \[0, 64\].
    pub num_short_term_ref_pic_sets: u32,
    pub st_ref_pic_sets: Vec<StRefPicSet>,

    pub long_term_ref_pics_present_flag: bool,

    /// Range is \[0, 32\].
    pub num_long_term_ref_pics_sps: u32,

    pub lt_ref_pic_poc_lsb_sps: [u32; 32],
    pub used_by_curr_pic_lt_sps_flag: [bool; 32],

    pub sps_temporal_mvp_enabled_flag: bool,
    pub strong_intra_smoothing_enabled_flag: bool,
    pub vui_parameters_present_flag: bool,

    pub vui: Vui,

    pub sps_extension_present_flag: bool,
    pub sps_range_extension_flag: bool,
    pub sps_multilayer_extension_flag: bool,
    pub sps_3d_extension_flag: bool,
    pub sps_scc_extension_flag: bool,
    pub sps_extension_4bits: u32,

    pub sps_range_ext: SpsRangeExt,
    pub sps_multilayer_ext: SpsMultilayerExt,
    pub sps_3d_ext: Sps3dExt,
    pub sps_scc_ext: SpsSccExt,
}

impl Sps {
    /// Parses one complete SPS NAL unit (header included, start code
    /// excluded, emulation prevention intact).
    pub fn parse(buf: &[u8]) -> Result<Self, Error> {
        crate::reader::parse_sps(buf)
    }

    /// `SubWidthC` per Table 6-1.
    pub fn sub_width_c(&self) -> u32 {
        if self.chroma_format_idc == 1 || self.chroma_format_idc == 2 {
            2
        } else {
            1
        }
    }

    /// `SubHeightC` per Table 6-1.
    pub fn sub_height_c(&self) -> u32 {
        if self.chroma_format_idc == 1 { 2 } else { 1 }
    }

    /// The displayed width: the luma width minus the conformance crop.
    pub fn width(&self) -> u32 {
        if !self.conformance_window_flag {
            return self.pic_width_in_luma_samples;
        }
        self.pic_width_in_luma_samples.saturating_sub(
            self.sub_width_c()
                .saturating_mul(self.conf_win_left_offset.saturating_add(self.conf_win_right_offset)),
        )
    }

    /// The displayed height: the luma height minus the conformance crop.
    pub fn height(&self) -> u32 {
        if !self.conformance_window_flag {
            return self.pic_height_in_luma_samples;
        }
        self.pic_height_in_luma_samples.saturating_sub(
            self.sub_height_c()
                .saturating_mul(self.conf_win_top_offset.saturating_add(self.conf_win_bottom_offset)),
        )
    }
}
