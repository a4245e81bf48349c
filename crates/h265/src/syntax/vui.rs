use super::{SyntaxOp, bits, bits_ue, flag, hrd};
use crate::AspectRatioIdc;
use crate::error::Error;
use crate::types::Vui;

/// E.2.1 VUI parameters syntax.
pub(crate) fn vui<O: SyntaxOp>(
    ops: &mut O,
    max_sub_layers_minus1: u32,
    vui: &mut Vui,
) -> Result<(), Error> {
    flag!(ops, vui.aspect_ratio_info_present_flag);
    if vui.aspect_ratio_info_present_flag {
        bits!(ops, vui.aspect_ratio_idc, 8);
        if vui.aspect_ratio_idc == AspectRatioIdc::ExtendedSar.0 as u32 {
            bits!(ops, vui.sar_width, 16);
            bits!(ops, vui.sar_height, 16);
        }
    }

    flag!(ops, vui.overscan_info_present_flag);
    if vui.overscan_info_present_flag {
        flag!(ops, vui.overscan_appropriate_flag);
    }

    flag!(ops, vui.video_signal_type_present_flag);
    if vui.video_signal_type_present_flag {
        bits!(ops, vui.video_format, 3);
        flag!(ops, vui.video_full_range_flag);

        flag!(ops, vui.colour_description_present_flag);
        if vui.colour_description_present_flag {
            bits!(ops, vui.colour_primaries, 8);
            bits!(ops, vui.transfer_characteristics, 8);
            bits!(ops, vui.matrix_coeffs, 8);
        }
    }

    flag!(ops, vui.chroma_loc_info_present_flag);
    if vui.chroma_loc_info_present_flag {
        bits_ue!(ops, vui.chroma_sample_loc_type_top_field);
        bits_ue!(ops, vui.chroma_sample_loc_type_bottom_field);
    }

    flag!(ops, vui.neutral_chroma_indication_flag);
    flag!(ops, vui.field_seq_flag);
    flag!(ops, vui.frame_field_info_present_flag);

    flag!(ops, vui.default_display_window_flag);
    if vui.default_display_window_flag {
        bits_ue!(ops, vui.def_disp_win_left_offset);
        bits_ue!(ops, vui.def_disp_win_right_offset);
        bits_ue!(ops, vui.def_disp_win_top_offset);
        bits_ue!(ops, vui.def_disp_win_bottom_offset);
    }

    flag!(ops, vui.vui_timing_info_present_flag);
    if vui.vui_timing_info_present_flag {
        bits!(ops, vui.vui_num_units_in_tick, 32);
        bits!(ops, vui.vui_time_scale, 32);

        flag!(ops, vui.vui_poc_proportional_to_timing_flag);
        if vui.vui_poc_proportional_to_timing_flag {
            bits_ue!(ops, vui.vui_num_ticks_poc_diff_one_minus1);
        }

        flag!(ops, vui.vui_hrd_parameters_present_flag);
        if vui.vui_hrd_parameters_present_flag {
            ops.begin_struct("hrd");
            hrd(ops, true, max_sub_layers_minus1, &mut vui.hrd)?;
            ops.end_struct("hrd");
        }
    }

    flag!(ops, vui.bitstream_restriction_flag);
    if vui.bitstream_restriction_flag {
        flag!(ops, vui.tiles_fixed_structure_flag);
        flag!(ops, vui.motion_vectors_over_pic_boundaries_flag);
        flag!(ops, vui.restricted_ref_pic_lists_flag);
        bits_ue!(ops, vui.min_spatial_segmentation_idc);
        bits_ue!(ops, vui.max_bytes_per_pic_denom);
        bits_ue!(ops, vui.max_bits_per_min_cu_denom);
        bits_ue!(ops, vui.log2_max_mv_length_horizontal);
        bits_ue!(ops, vui.log2_max_mv_length_vertical);
    }

    Ok(())
}
