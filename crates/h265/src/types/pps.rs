use super::sps::ScalingListData;
use crate::error::Error;

/// Maximum number of PPS slots (`pps_pic_parameter_set_id` is in \[0, 63\]).
pub const PPS_MAX_COUNT: usize = 64;

/// Picture parameter set range extension.
///
/// ITU-T H.265 - 7.3.2.3.2
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PpsRangeExt {
    pub log2_max_transform_skip_block_size_minus2: u32,
    pub cross_component_prediction_enabled_flag: bool,
    pub chroma_qp_offset_list_enabled_flag: bool,
    pub diff_cu_chroma_qp_offset_depth: u32,

    /// Range is \[0, 5\].
    pub chroma_qp_offset_list_len_minus1: u32,

    pub cb_qp_offset_list: [i32; 6],
    pub cr_qp_offset_list: [i32; 6],

    pub log2_sao_offset_scale_luma: u32,
    pub log2_sao_offset_scale_chroma: u32,
}

/// The delta depth look-up table.
///
/// ITU-T H.265 - I.7.3.2.3.8. `delta_val_diff_minus_min` holds
/// `num_val_delta_dlt` entries of which index 0 is never coded; each entry
/// is `ceil(log2(max_diff - min_diff_minus1))` bits wide.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeltaDlt {
    pub num_val_delta_dlt: u32,
    pub max_diff: u32,
    pub min_diff_minus1: u32,
    pub delta_dlt_val0: u32,
    pub delta_val_diff_minus_min: Vec<u32>,
}

/// The value portion of one depth layer's DLT: either a presence flag per
/// depth value, or a delta table.
#[derive(Debug, Clone, PartialEq)]
pub enum DltValues {
    /// `dlt_value_flag[j]` for `j` in `[0, (1 << depth) - 1]`.
    Flags(Vec<bool>),
    /// `delta_dlt(i)`; also used when the DLT is predicted from the
    /// reference layer.
    Delta(DeltaDlt),
}

impl Default for DltValues {
    fn default() -> Self {
        DltValues::Delta(DeltaDlt::default())
    }
}

/// One depth layer of the PPS 3D extension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepthLayerDlt {
    pub dlt_flag: bool,
    pub dlt_pred_flag: bool,
    pub values: DltValues,
}

impl DepthLayerDlt {
    /// `dlt_val_flags_present_flag[i]`, implied by the value representation.
    pub fn dlt_val_flags_present_flag(&self) -> bool {
        matches!(self.values, DltValues::Flags(_))
    }
}

/// Picture parameter set 3D extension.
///
/// ITU-T H.265 - I.7.3.2.3.7
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pps3dExt {
    pub dlts_present_flag: bool,
    pub pps_depth_layers_minus1: u32,
    pub pps_bit_depth_for_depth_layers_minus8: u32,
    /// `pps_depth_layers_minus1 + 1` entries when DLTs are present.
    pub layers: Vec<DepthLayerDlt>,
}

/// Picture parameter set screen content coding extension.
///
/// ITU-T H.265 - 7.3.2.3.3. 7.4.3.3.3 requires
/// `pps_num_palette_predictor_initializers` to be at most
/// `PaletteMaxPredictorSize`, which A.3.7 caps at 128.
#[derive(Debug, Clone, PartialEq)]
pub struct PpsSccExt {
    pub pps_curr_pic_ref_enabled_flag: bool,
    pub residual_adaptive_colour_transform_enabled_flag: bool,
    pub pps_slice_act_qp_offsets_present_flag: bool,
    pub pps_act_y_qp_offset_plus5: i32,
    pub pps_act_cb_qp_offset_plus5: i32,
    pub pps_act_cr_qp_offset_plus3: i32,
    pub pps_palette_predictor_initializers_present_flag: bool,
    pub pps_num_palette_predictor_initializers: u32,
    pub monochrome_palette_flag: bool,
    pub luma_bit_depth_entry_minus8: u32,
    pub chroma_bit_depth_entry_minus8: u32,
    pub pps_palette_predictor_initializer: [[u32; 128]; 3],
}

impl Default for PpsSccExt {
    fn default() -> Self {
        Self {
            pps_curr_pic_ref_enabled_flag: false,
            residual_adaptive_colour_transform_enabled_flag: false,
            pps_slice_act_qp_offsets_present_flag: false,
            pps_act_y_qp_offset_plus5: 0,
            pps_act_cb_qp_offset_plus5: 0,
            pps_act_cr_qp_offset_plus3: 0,
            pps_palette_predictor_initializers_present_flag: false,
            pps_num_palette_predictor_initializers: 0,
            monochrome_palette_flag: false,
            luma_bit_depth_entry_minus8: 0,
            chroma_bit_depth_entry_minus8: 0,
            pps_palette_predictor_initializer: [[0; 128]; 3],
        }
    }
}

/// The picture parameter set RBSP.
///
/// ITU-T H.265 - 7.3.2.3.1. Equality compares every scalar field and both
/// variable-length tile arrays element-wise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pps {
    pub pps_pic_parameter_set_id: u32,
    pub pps_seq_parameter_set_id: u32,
    pub dependent_slice_segments_enabled_flag: bool,
    pub output_flag_present_flag: bool,
    pub num_extra_slice_header_bits: u32,
    pub sign_data_hiding_enabled_flag: bool,
    pub cabac_init_present_flag: bool,
    pub num_ref_idx_l0_default_active_minus1: u32,
    pub num_ref_idx_l1_default_active_minus1: u32,
    pub init_qp_minus26: i32,
    pub constrained_intra_pred_flag: bool,
    pub transform_skip_enabled_flag: bool,
    pub cu_qp_delta_enabled_flag: bool,
    pub diff_cu_qp_delta_depth: u32,
    pub pps_cb_qp_offset: i32,
    pub pps_cr_qp_offset: i32,
    pub pps_slice_chroma_qp_offsets_present_flag: bool,
    pub weighted_pred_flag: bool,
    pub weighted_bipred_flag: bool,
    pub transquant_bypass_enabled_flag: bool,
    pub tiles_enabled_flag: bool,
    pub entropy_coding_sync_enabled_flag: bool,
    pub num_tile_columns_minus1: u32,
    pub num_tile_rows_minus1: u32,
    /// Defaults to 1 when tiles are enabled but the flag is not coded.
    pub uniform_spacing_flag: bool,

    /// `num_tile_columns_minus1` entries; only coded when
    /// `uniform_spacing_flag` is 0.
    pub column_width_minus1: Vec<u32>,

    /// `num_tile_rows_minus1` entries; only coded when
    /// `uniform_spacing_flag` is 0.
    pub row_height_minus1: Vec<u32>,

    pub loop_filter_across_tiles_enabled_flag: bool,
    pub pps_loop_filter_across_slices_enabled_flag: bool,
    pub deblocking_filter_control_present_flag: bool,
    pub deblocking_filter_override_enabled_flag: bool,
    pub pps_deblocking_filter_disabled_flag: bool,
    pub pps_beta_offset_div2: i32,
    pub pps_tc_offset_div2: i32,
    pub pps_scaling_list_data_present_flag: bool,

    pub scaling_list_data: ScalingListData,

    pub lists_modification_present_flag: bool,
    pub log2_parallel_merge_level_minus2: u32,
    pub slice_segment_header_extension_present_flag: bool,
    pub pps_extension_present_flag: bool,
    pub pps_range_extension_flag: bool,
    pub pps_multilayer_extension_flag: bool,
    pub pps_3d_extension_flag: bool,
    pub pps_scc_extension_flag: bool,
    pub pps_extension_4bits: u32,

    pub pps_range_ext: PpsRangeExt,
    pub pps_3d_ext: Pps3dExt,
    pub pps_scc_ext: PpsSccExt,
}

impl Pps {
    /// Parses one complete PPS NAL unit (header included, start code
    /// excluded, emulation prevention intact).
    pub fn parse(buf: &[u8]) -> Result<Self, Error> {
        crate::reader::parse_pps(buf)
    }
}
