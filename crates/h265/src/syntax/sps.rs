use super::{
    OpKind, SyntaxOp, bits, bits_ue, flag, profile_tier_level, scaling_list_data, st_ref_pic_set,
    vui,
};
use crate::error::Error;
use crate::range_check::range_check;
use crate::types::{
    Sps, Sps3dExt, SpsMultilayerExt, SpsRangeExt, SpsSccExt, StRefPicSet,
};

fn sps_range_ext<O: SyntaxOp>(ops: &mut O, ext: &mut SpsRangeExt) -> Result<(), Error> {
    flag!(ops, ext.transform_skip_rotation_enabled_flag);
    flag!(ops, ext.transform_skip_context_enabled_flag);
    flag!(ops, ext.implicit_rdpcm_enabled_flag);
    flag!(ops, ext.explicit_rdpcm_enabled_flag);
    flag!(ops, ext.extended_precision_processing_flag);
    flag!(ops, ext.intra_smoothing_disabled_flag);
    flag!(ops, ext.high_precision_offsets_enabled_flag);
    flag!(ops, ext.persistent_rice_adaptation_enabled_flag);
    flag!(ops, ext.cabac_bypass_alignment_enabled_flag);

    Ok(())
}

fn sps_multilayer_ext<O: SyntaxOp>(ops: &mut O, ext: &mut SpsMultilayerExt) -> Result<(), Error> {
    flag!(ops, ext.inter_view_mv_vert_constraint_flag);

    Ok(())
}

/// I.7.3.2.2.5: the two iterations cover the texture (`d == 0`) and depth
/// (`d == 1`) flavours of each flag.
fn sps_3d_ext<O: SyntaxOp>(ops: &mut O, ext: &mut Sps3dExt) -> Result<(), Error> {
    for d in 0..=1usize {
        flag!(ops, ext.iv_di_mc_enabled_flag[d]);
        flag!(ops, ext.iv_mv_scal_enabled_flag[d]);

        if d == 0 {
            bits_ue!(ops, ext.log2_ivmc_sub_pb_size_minus3[d]);
            flag!(ops, ext.iv_res_pred_enabled_flag[d]);
            flag!(ops, ext.depth_ref_enabled_flag[d]);
            flag!(ops, ext.vsp_mc_enabled_flag[d]);
            flag!(ops, ext.dbbp_enabled_flag[d]);
        } else {
            flag!(ops, ext.tex_mc_enabled_flag[d]);
            bits_ue!(ops, ext.log2_texmc_sub_pb_size_minus3[d]);
            flag!(ops, ext.intra_contour_enabled_flag[d]);
            flag!(ops, ext.intra_dc_only_wedge_enabled_flag[d]);
            flag!(ops, ext.cqt_cu_part_pred_enabled_flag[d]);
            flag!(ops, ext.inter_dc_only_enabled_flag[d]);
            flag!(ops, ext.skip_intra_enabled_flag[d]);
        }
    }

    Ok(())
}

fn scc_palette_predictors<O: SyntaxOp>(
    ops: &mut O,
    chroma_format_idc: u32,
    bit_depth_luma_minus8: u32,
    bit_depth_chroma_minus8: u32,
    ext: &mut SpsSccExt,
) -> Result<(), Error> {
    let num_comps = if chroma_format_idc == 0 { 1 } else { 3 };

    ops.begin_array("comps");
    for comp in 0..num_comps {
        ops.begin_array_item();

        ops.begin_array("palette_predictors");
        for i in 0..=ext.sps_num_palette_predictor_initializer_minus1 as usize {
            ops.begin_array_item();

            let bit_depth = if comp == 0 {
                bit_depth_luma_minus8
            } else {
                bit_depth_chroma_minus8
            } + 8;

            bits!(ops, ext.sps_palette_predictor_initializers[comp][i], bit_depth);

            ops.end_array_item();
        }
        ops.end_array("palette_predictors");

        ops.end_array_item();
    }
    ops.end_array("comps");

    Ok(())
}

fn sps_scc_ext<O: SyntaxOp>(
    ops: &mut O,
    chroma_format_idc: u32,
    bit_depth_luma_minus8: u32,
    bit_depth_chroma_minus8: u32,
    ext: &mut SpsSccExt,
) -> Result<(), Error> {
    flag!(ops, ext.sps_curr_pic_ref_enabled_flag);

    flag!(ops, ext.palette_mode_enabled_flag);
    if ext.palette_mode_enabled_flag {
        bits_ue!(ops, ext.palette_max_size);
        bits_ue!(ops, ext.delta_palette_max_predictor_size);

        flag!(ops, ext.sps_palette_predictor_initializer_present_flag);
        if ext.sps_palette_predictor_initializer_present_flag {
            bits_ue!(ops, ext.sps_num_palette_predictor_initializer_minus1);
            range_check!(ext.sps_num_palette_predictor_initializer_minus1, 0, 127)?;

            scc_palette_predictors(
                ops,
                chroma_format_idc,
                bit_depth_luma_minus8,
                bit_depth_chroma_minus8,
                ext,
            )?;
        }
    }

    bits!(ops, ext.motion_vector_resolution_control_idc, 2);
    flag!(ops, ext.intra_boundary_filtering_disabled_flag);

    Ok(())
}

/// 7.3.2.2 Sequence parameter set RBSP syntax.
pub(crate) fn sps<O: SyntaxOp>(ops: &mut O, sps: &mut Sps) -> Result<(), Error> {
    bits!(ops, sps.sps_video_parameter_set_id, 4);
    bits!(ops, sps.sps_max_sub_layers_minus1, 3);
    range_check!(sps.sps_max_sub_layers_minus1, 0, 6)?;
    flag!(ops, sps.sps_temporal_id_nesting_flag);

    ops.begin_struct("profile_tier_level");
    profile_tier_level(ops, true, sps.sps_max_sub_layers_minus1, &mut sps.profile_tier_level)?;
    ops.end_struct("profile_tier_level");

    bits_ue!(ops, sps.sps_seq_parameter_set_id);
    range_check!(sps.sps_seq_parameter_set_id, 0, 15)?;
    bits_ue!(ops, sps.chroma_format_idc);
    range_check!(sps.chroma_format_idc, 0, 3)?;

    if sps.chroma_format_idc == 3 {
        flag!(ops, sps.separate_colour_plane_flag);
    }

    bits_ue!(ops, sps.pic_width_in_luma_samples);
    bits_ue!(ops, sps.pic_height_in_luma_samples);

    flag!(ops, sps.conformance_window_flag);
    if sps.conformance_window_flag {
        bits_ue!(ops, sps.conf_win_left_offset);
        bits_ue!(ops, sps.conf_win_right_offset);
        bits_ue!(ops, sps.conf_win_top_offset);
        bits_ue!(ops, sps.conf_win_bottom_offset);
    }

    bits_ue!(ops, sps.bit_depth_luma_minus8);
    range_check!(sps.bit_depth_luma_minus8, 0, 8)?;
    bits_ue!(ops, sps.bit_depth_chroma_minus8);
    range_check!(sps.bit_depth_chroma_minus8, 0, 8)?;
    bits_ue!(ops, sps.log2_max_pic_order_cnt_lsb_minus4);
    range_check!(sps.log2_max_pic_order_cnt_lsb_minus4, 0, 12)?;
    flag!(ops, sps.sps_sub_layer_ordering_info_present_flag);

    let start = if sps.sps_sub_layer_ordering_info_present_flag {
        0
    } else {
        sps.sps_max_sub_layers_minus1 as usize
    };

    ops.begin_array("sub_layers");
    for i in start..=sps.sps_max_sub_layers_minus1 as usize {
        ops.begin_array_item();

        bits_ue!(ops, sps.sps_max_dec_pic_buffering_minus1[i]);
        bits_ue!(ops, sps.sps_max_num_reorder_pics[i]);
        bits_ue!(ops, sps.sps_max_latency_increase_plus1[i]);

        ops.end_array_item();
    }
    ops.end_array("sub_layers");

    bits_ue!(ops, sps.log2_min_luma_coding_block_size_minus3);
    bits_ue!(ops, sps.log2_diff_max_min_luma_coding_block_size);
    bits_ue!(ops, sps.log2_min_luma_transform_block_size_minus2);
    bits_ue!(ops, sps.log2_diff_max_min_luma_transform_block_size);
    bits_ue!(ops, sps.max_transform_hierarchy_depth_inter);
    bits_ue!(ops, sps.max_transform_hierarchy_depth_intra);

    flag!(ops, sps.scaling_list_enabled_flag);
    if sps.scaling_list_enabled_flag {
        flag!(ops, sps.sps_scaling_list_data_present_flag);
        if sps.sps_scaling_list_data_present_flag {
            ops.begin_struct("scaling_list_data");
            scaling_list_data(ops, &mut sps.scaling_list_data)?;
            ops.end_struct("scaling_list_data");
        }
    }

    flag!(ops, sps.amp_enabled_flag);
    flag!(ops, sps.sample_adaptive_offset_enabled_flag);

    flag!(ops, sps.pcm_enabled_flag);
    if sps.pcm_enabled_flag {
        bits!(ops, sps.pcm_sample_bit_depth_luma_minus1, 4);
        bits!(ops, sps.pcm_sample_bit_depth_chroma_minus1, 4);
        bits_ue!(ops, sps.log2_min_pcm_luma_coding_block_size_minus3);
        bits_ue!(ops, sps.log2_diff_max_min_pcm_luma_coding_block_size);
        flag!(ops, sps.pcm_loop_filter_disabled_flag);
    }

    bits_ue!(ops, sps.num_short_term_ref_pic_sets);
    range_check!(sps.num_short_term_ref_pic_sets, 0, 64)?;

    if O::KIND == OpKind::Read {
        sps.st_ref_pic_sets =
            vec![StRefPicSet::default(); sps.num_short_term_ref_pic_sets as usize];
    }
    if sps.st_ref_pic_sets.len() < sps.num_short_term_ref_pic_sets as usize {
        return Err(Error::Protocol(
            "st_ref_pic_sets holds fewer entries than num_short_term_ref_pic_sets".into(),
        ));
    }

    ops.begin_array("st_ref_pic_sets");
    for i in 0..sps.num_short_term_ref_pic_sets as usize {
        ops.begin_array_item();

        ops.begin_struct("st_ref_pic_set");
        st_ref_pic_set(
            ops,
            i,
            sps.num_short_term_ref_pic_sets,
            &mut sps.st_ref_pic_sets[..=i],
        )?;
        ops.end_struct("st_ref_pic_set");

        ops.end_array_item();
    }
    ops.end_array("st_ref_pic_sets");

    flag!(ops, sps.long_term_ref_pics_present_flag);
    if sps.long_term_ref_pics_present_flag {
        bits_ue!(ops, sps.num_long_term_ref_pics_sps);
        range_check!(sps.num_long_term_ref_pics_sps, 0, 32)?;

        ops.begin_array("long_term_ref_pics_sps");
        for i in 0..sps.num_long_term_ref_pics_sps as usize {
            ops.begin_array_item();

            let num_bits = sps.log2_max_pic_order_cnt_lsb_minus4 + 4;
            bits!(ops, sps.lt_ref_pic_poc_lsb_sps[i], num_bits);
            flag!(ops, sps.used_by_curr_pic_lt_sps_flag[i]);

            ops.end_array_item();
        }
        ops.end_array("long_term_ref_pics_sps");
    }

    flag!(ops, sps.sps_temporal_mvp_enabled_flag);
    flag!(ops, sps.strong_intra_smoothing_enabled_flag);

    flag!(ops, sps.vui_parameters_present_flag);
    if sps.vui_parameters_present_flag {
        ops.begin_struct("vui");
        vui(ops, sps.sps_max_sub_layers_minus1, &mut sps.vui)?;
        ops.end_struct("vui");
    }

    flag!(ops, sps.sps_extension_present_flag);
    if sps.sps_extension_present_flag {
        flag!(ops, sps.sps_range_extension_flag);
        flag!(ops, sps.sps_multilayer_extension_flag);
        flag!(ops, sps.sps_3d_extension_flag);
        flag!(ops, sps.sps_scc_extension_flag);
        bits!(ops, sps.sps_extension_4bits, 4);
    }

    if sps.sps_range_extension_flag {
        ops.begin_struct("sps_range_ext");
        sps_range_ext(ops, &mut sps.sps_range_ext)?;
        ops.end_struct("sps_range_ext");
    }

    if sps.sps_multilayer_extension_flag {
        ops.begin_struct("sps_multilayer_ext");
        sps_multilayer_ext(ops, &mut sps.sps_multilayer_ext)?;
        ops.end_struct("sps_multilayer_ext");
    }

    if sps.sps_3d_extension_flag {
        ops.begin_struct("sps_3d_ext");
        sps_3d_ext(ops, &mut sps.sps_3d_ext)?;
        ops.end_struct("sps_3d_ext");
    }

    if sps.sps_scc_extension_flag {
        let chroma_format_idc = sps.chroma_format_idc;
        let bit_depth_luma_minus8 = sps.bit_depth_luma_minus8;
        let bit_depth_chroma_minus8 = sps.bit_depth_chroma_minus8;
        ops.begin_struct("sps_scc_ext");
        sps_scc_ext(
            ops,
            chroma_format_idc,
            bit_depth_luma_minus8,
            bit_depth_chroma_minus8,
            &mut sps.sps_scc_ext,
        )?;
        ops.end_struct("sps_scc_ext");
    }

    // sps_extension_data_flag is reserved for a later revision.

    ops.rbsp_trailing()?;

    Ok(())
}
