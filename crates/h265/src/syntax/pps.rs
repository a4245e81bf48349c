use super::{OpKind, SyntaxOp, bits, bits_se, bits_ue, ceil_log2, flag, scaling_list_data};
use crate::error::Error;
use crate::range_check::range_check;
use crate::types::{DeltaDlt, DepthLayerDlt, DltValues, Pps, Pps3dExt, PpsRangeExt, PpsSccExt};

fn pps_range_ext<O: SyntaxOp>(
    ops: &mut O,
    transform_skip_enabled_flag: bool,
    ext: &mut PpsRangeExt,
) -> Result<(), Error> {
    if transform_skip_enabled_flag {
        bits_ue!(ops, ext.log2_max_transform_skip_block_size_minus2);
    }

    flag!(ops, ext.cross_component_prediction_enabled_flag);

    flag!(ops, ext.chroma_qp_offset_list_enabled_flag);
    if ext.chroma_qp_offset_list_enabled_flag {
        bits_ue!(ops, ext.diff_cu_chroma_qp_offset_depth);

        bits_ue!(ops, ext.chroma_qp_offset_list_len_minus1);
        range_check!(ext.chroma_qp_offset_list_len_minus1, 0, 5)?;
        for i in 0..ext.chroma_qp_offset_list_len_minus1 as usize {
            bits_se!(ops, ext.cb_qp_offset_list[i]);
            bits_se!(ops, ext.cr_qp_offset_list[i]);
        }
    }

    bits_ue!(ops, ext.log2_sao_offset_scale_luma);
    bits_ue!(ops, ext.log2_sao_offset_scale_chroma);

    Ok(())
}

/// I.7.3.2.3.8 Delta depth look-up table syntax.
fn delta_dlt<O: SyntaxOp>(ops: &mut O, bit_depth: u32, dlt: &mut DeltaDlt) -> Result<(), Error> {
    bits!(ops, dlt.num_val_delta_dlt, bit_depth);

    if dlt.num_val_delta_dlt > 0 {
        if dlt.num_val_delta_dlt > 1 {
            bits!(ops, dlt.max_diff, bit_depth);
        }

        if dlt.num_val_delta_dlt > 2 && dlt.max_diff > 0 {
            bits!(ops, dlt.min_diff_minus1, bit_depth);
        }

        bits!(ops, dlt.delta_dlt_val0, bit_depth);

        if dlt.max_diff > dlt.min_diff_minus1 + 1 {
            if O::KIND == OpKind::Read {
                dlt.delta_val_diff_minus_min = vec![0; dlt.num_val_delta_dlt as usize];
            }
            if dlt.delta_val_diff_minus_min.len() < dlt.num_val_delta_dlt as usize {
                return Err(Error::InvalidArgument(
                    "delta_val_diff_minus_min is shorter than num_val_delta_dlt",
                ));
            }

            let val_bit_length = ceil_log2(dlt.max_diff - dlt.min_diff_minus1);

            ops.begin_array("val_delta_dlt");
            for k in 1..dlt.num_val_delta_dlt as usize {
                ops.begin_array_item();

                bits!(ops, dlt.delta_val_diff_minus_min[k], val_bit_length);

                ops.end_array_item();
            }
            ops.end_array("val_delta_dlt");
        }
    }

    Ok(())
}

/// I.7.3.2.3.7: one depth layer's look-up table.
fn dlt<O: SyntaxOp>(ops: &mut O, bit_depth: u32, layer: &mut DepthLayerDlt) -> Result<(), Error> {
    flag!(ops, layer.dlt_flag);
    if !layer.dlt_flag {
        return Ok(());
    }

    flag!(ops, layer.dlt_pred_flag);

    let mut dlt_val_flags_present_flag = layer.dlt_val_flags_present_flag();
    if !layer.dlt_pred_flag {
        ops.flag(&mut dlt_val_flags_present_flag, "dlt_val_flags_present_flag")?;
    } else {
        dlt_val_flags_present_flag = false;
    }

    if dlt_val_flags_present_flag {
        let depth_max_value = (1u32 << bit_depth) - 1;

        if O::KIND == OpKind::Read {
            layer.values = DltValues::Flags(vec![false; depth_max_value as usize + 1]);
        }
        let DltValues::Flags(dlt_value_flag) = &mut layer.values else {
            return Err(Error::InvalidArgument("DLT value flags are not populated"));
        };
        if dlt_value_flag.len() <= depth_max_value as usize {
            return Err(Error::InvalidArgument(
                "DLT value flags do not cover the depth range",
            ));
        }

        for j in 0..=depth_max_value as usize {
            flag!(ops, dlt_value_flag[j]);
        }
    } else {
        if O::KIND == OpKind::Read {
            layer.values = DltValues::Delta(DeltaDlt::default());
        }
        let DltValues::Delta(delta) = &mut layer.values else {
            return Err(Error::InvalidArgument("delta DLT is not populated"));
        };

        delta_dlt(ops, bit_depth, delta)?;
    }

    Ok(())
}

fn pps_3d_ext<O: SyntaxOp>(ops: &mut O, ext: &mut Pps3dExt) -> Result<(), Error> {
    flag!(ops, ext.dlts_present_flag);
    if ext.dlts_present_flag {
        bits!(ops, ext.pps_depth_layers_minus1, 6);
        bits!(ops, ext.pps_bit_depth_for_depth_layers_minus8, 4);

        let bit_depth = ext.pps_bit_depth_for_depth_layers_minus8 + 8;

        if O::KIND == OpKind::Read {
            ext.layers = vec![DepthLayerDlt::default(); ext.pps_depth_layers_minus1 as usize + 1];
        }
        if ext.layers.len() <= ext.pps_depth_layers_minus1 as usize {
            return Err(Error::Protocol(
                "DLT layers hold fewer entries than pps_depth_layers_minus1 + 1".into(),
            ));
        }

        for i in 0..=ext.pps_depth_layers_minus1 as usize {
            dlt(ops, bit_depth, &mut ext.layers[i])?;
        }
    }

    Ok(())
}

fn pps_palette<O: SyntaxOp>(ops: &mut O, ext: &mut PpsSccExt) -> Result<(), Error> {
    flag!(ops, ext.monochrome_palette_flag);
    bits_ue!(ops, ext.luma_bit_depth_entry_minus8);

    if !ext.monochrome_palette_flag {
        bits_ue!(ops, ext.chroma_bit_depth_entry_minus8);
    }

    let num_comps = if ext.monochrome_palette_flag { 1 } else { 3 };

    ops.begin_array("comps");
    for comp in 0..num_comps {
        ops.begin_array_item();

        ops.begin_array("initializers");
        for i in 0..ext.pps_num_palette_predictor_initializers as usize {
            let bit_length = if comp == 0 {
                ext.luma_bit_depth_entry_minus8
            } else {
                ext.chroma_bit_depth_entry_minus8
            } + 8;

            bits!(ops, ext.pps_palette_predictor_initializer[comp][i], bit_length);
        }
        ops.end_array("initializers");

        ops.end_array_item();
    }
    ops.end_array("comps");

    Ok(())
}

fn pps_scc_ext<O: SyntaxOp>(ops: &mut O, ext: &mut PpsSccExt) -> Result<(), Error> {
    flag!(ops, ext.pps_curr_pic_ref_enabled_flag);

    flag!(ops, ext.residual_adaptive_colour_transform_enabled_flag);
    if ext.residual_adaptive_colour_transform_enabled_flag {
        flag!(ops, ext.pps_slice_act_qp_offsets_present_flag);
        bits_se!(ops, ext.pps_act_y_qp_offset_plus5);
        bits_se!(ops, ext.pps_act_cb_qp_offset_plus5);
        bits_se!(ops, ext.pps_act_cr_qp_offset_plus3);
    }

    flag!(ops, ext.pps_palette_predictor_initializers_present_flag);
    if ext.pps_palette_predictor_initializers_present_flag {
        bits_ue!(ops, ext.pps_num_palette_predictor_initializers);
        range_check!(ext.pps_num_palette_predictor_initializers, 0, 128)?;
        if ext.pps_num_palette_predictor_initializers > 0 {
            pps_palette(ops, ext)?;
        }
    }

    Ok(())
}

/// 7.3.2.3.1 General picture parameter set RBSP syntax.
pub(crate) fn pps<O: SyntaxOp>(ops: &mut O, pps: &mut Pps) -> Result<(), Error> {
    if O::KIND == OpKind::Read {
        // Inferred to be 1 when not coded (7.4.3.3.1).
        pps.uniform_spacing_flag = true;
    }

    bits_ue!(ops, pps.pps_pic_parameter_set_id);
    range_check!(pps.pps_pic_parameter_set_id, 0, 63)?;
    bits_ue!(ops, pps.pps_seq_parameter_set_id);
    range_check!(pps.pps_seq_parameter_set_id, 0, 15)?;

    flag!(ops, pps.dependent_slice_segments_enabled_flag);
    flag!(ops, pps.output_flag_present_flag);
    bits!(ops, pps.num_extra_slice_header_bits, 3);
    flag!(ops, pps.sign_data_hiding_enabled_flag);
    flag!(ops, pps.cabac_init_present_flag);
    bits_ue!(ops, pps.num_ref_idx_l0_default_active_minus1);
    bits_ue!(ops, pps.num_ref_idx_l1_default_active_minus1);
    bits_se!(ops, pps.init_qp_minus26);
    flag!(ops, pps.constrained_intra_pred_flag);
    flag!(ops, pps.transform_skip_enabled_flag);

    flag!(ops, pps.cu_qp_delta_enabled_flag);
    if pps.cu_qp_delta_enabled_flag {
        bits_ue!(ops, pps.diff_cu_qp_delta_depth);
    }

    bits_se!(ops, pps.pps_cb_qp_offset);
    bits_se!(ops, pps.pps_cr_qp_offset);
    flag!(ops, pps.pps_slice_chroma_qp_offsets_present_flag);
    flag!(ops, pps.weighted_pred_flag);
    flag!(ops, pps.weighted_bipred_flag);
    flag!(ops, pps.transquant_bypass_enabled_flag);
    flag!(ops, pps.tiles_enabled_flag);
    flag!(ops, pps.entropy_coding_sync_enabled_flag);

    if pps.tiles_enabled_flag {
        bits_ue!(ops, pps.num_tile_columns_minus1);
        bits_ue!(ops, pps.num_tile_rows_minus1);

        if O::KIND == OpKind::Read {
            pps.column_width_minus1 = vec![0; pps.num_tile_columns_minus1 as usize];
            pps.row_height_minus1 = vec![0; pps.num_tile_rows_minus1 as usize];
        }
        if pps.column_width_minus1.len() < pps.num_tile_columns_minus1 as usize
            || pps.row_height_minus1.len() < pps.num_tile_rows_minus1 as usize
        {
            return Err(Error::Protocol(
                "tile arrays are shorter than the tile grid".into(),
            ));
        }

        flag!(ops, pps.uniform_spacing_flag);
        if !pps.uniform_spacing_flag {
            ops.begin_array("tile_columns");
            for i in 0..pps.num_tile_columns_minus1 as usize {
                ops.begin_array_item();

                bits_ue!(ops, pps.column_width_minus1[i]);

                ops.end_array_item();
            }
            ops.end_array("tile_columns");

            ops.begin_array("tile_rows");
            for i in 0..pps.num_tile_rows_minus1 as usize {
                ops.begin_array_item();

                bits_ue!(ops, pps.row_height_minus1[i]);

                ops.end_array_item();
            }
            ops.end_array("tile_rows");
        }
        flag!(ops, pps.loop_filter_across_tiles_enabled_flag);
    }

    flag!(ops, pps.pps_loop_filter_across_slices_enabled_flag);

    flag!(ops, pps.deblocking_filter_control_present_flag);
    if pps.deblocking_filter_control_present_flag {
        flag!(ops, pps.deblocking_filter_override_enabled_flag);

        flag!(ops, pps.pps_deblocking_filter_disabled_flag);
        if !pps.pps_deblocking_filter_disabled_flag {
            bits_se!(ops, pps.pps_beta_offset_div2);
            bits_se!(ops, pps.pps_tc_offset_div2);
        }
    }

    flag!(ops, pps.pps_scaling_list_data_present_flag);
    if pps.pps_scaling_list_data_present_flag {
        ops.begin_struct("scaling_list_data");
        scaling_list_data(ops, &mut pps.scaling_list_data)?;
        ops.end_struct("scaling_list_data");
    }

    flag!(ops, pps.lists_modification_present_flag);
    bits_ue!(ops, pps.log2_parallel_merge_level_minus2);
    flag!(ops, pps.slice_segment_header_extension_present_flag);

    flag!(ops, pps.pps_extension_present_flag);
    if pps.pps_extension_present_flag {
        flag!(ops, pps.pps_range_extension_flag);
        flag!(ops, pps.pps_multilayer_extension_flag);
        flag!(ops, pps.pps_3d_extension_flag);
        flag!(ops, pps.pps_scc_extension_flag);
        bits!(ops, pps.pps_extension_4bits, 4);
    }

    if pps.pps_range_extension_flag {
        let transform_skip_enabled_flag = pps.transform_skip_enabled_flag;
        ops.begin_struct("pps_range_ext");
        pps_range_ext(ops, transform_skip_enabled_flag, &mut pps.pps_range_ext)?;
        ops.end_struct("pps_range_ext");
    }

    if pps.pps_multilayer_extension_flag {
        return Err(Error::Protocol(
            "the PPS multilayer extension is not supported".into(),
        ));
    }

    if pps.pps_3d_extension_flag {
        ops.begin_struct("pps_3d_ext");
        pps_3d_ext(ops, &mut pps.pps_3d_ext)?;
        ops.end_struct("pps_3d_ext");
    }

    if pps.pps_scc_extension_flag {
        ops.begin_struct("pps_scc_ext");
        pps_scc_ext(ops, &mut pps.pps_scc_ext)?;
        ops.end_struct("pps_scc_ext");
    }

    // pps_extension_data_flag is reserved for a later revision.

    ops.rbsp_trailing()?;

    Ok(())
}
