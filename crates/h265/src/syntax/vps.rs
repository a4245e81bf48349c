use super::{OpKind, SyntaxOp, bits, bits_ue, flag, hrd, profile_tier_level};
use crate::error::Error;
use crate::range_check::range_check;
use crate::types::{Vps, VpsHrd};

fn layer_set<O: SyntaxOp>(
    ops: &mut O,
    layer_set: &mut [bool],
    vps_max_layer_id: u32,
) -> Result<(), Error> {
    ops.begin_array("layer_set");
    for j in 0..=vps_max_layer_id as usize {
        ops.begin_array_item();
        flag!(ops, layer_set[j]);
        ops.end_array_item();
    }
    ops.end_array("layer_set");

    Ok(())
}

/// 7.3.2.1 Video parameter set RBSP syntax.
pub(crate) fn vps<O: SyntaxOp>(ops: &mut O, vps: &mut Vps) -> Result<(), Error> {
    bits!(ops, vps.vps_video_parameter_set_id, 4);
    flag!(ops, vps.vps_base_layer_internal_flag);
    flag!(ops, vps.vps_base_layer_available_flag);
    bits!(ops, vps.vps_max_layers_minus1, 6);
    bits!(ops, vps.vps_max_sub_layers_minus1, 3);
    range_check!(vps.vps_max_sub_layers_minus1, 0, 6)?;
    flag!(ops, vps.vps_temporal_id_nesting_flag);
    bits!(ops, vps.vps_reserved_0xffff_16bits, 16);

    ops.begin_struct("profile_tier_level");
    profile_tier_level(ops, true, vps.vps_max_sub_layers_minus1, &mut vps.profile_tier_level)?;
    ops.end_struct("profile_tier_level");

    flag!(ops, vps.vps_sub_layer_ordering_info_present_flag);
    let start = if vps.vps_sub_layer_ordering_info_present_flag {
        0
    } else {
        vps.vps_max_sub_layers_minus1 as usize
    };

    ops.begin_array("vps_sub_layer_ordering_infos");
    for i in start..=vps.vps_max_sub_layers_minus1 as usize {
        ops.begin_array_item();

        bits_ue!(ops, vps.vps_max_dec_pic_buffering_minus1[i]);
        bits_ue!(ops, vps.vps_max_num_reorder_pics[i]);
        bits_ue!(ops, vps.vps_max_latency_increase_plus1[i]);

        ops.end_array_item();
    }
    ops.end_array("vps_sub_layer_ordering_infos");

    bits!(ops, vps.vps_max_layer_id, 6);
    bits_ue!(ops, vps.vps_num_layer_sets_minus1);
    range_check!(vps.vps_num_layer_sets_minus1, 0, 1023)?;

    if O::KIND == OpKind::Read {
        vps.layer_id_included_flag = vec![
            vec![false; vps.vps_max_layer_id as usize + 1];
            vps.vps_num_layer_sets_minus1 as usize + 1
        ];
    }
    if vps.vps_num_layer_sets_minus1 > 0 {
        let num_layer_sets = vps.vps_num_layer_sets_minus1 as usize;
        if vps.layer_id_included_flag.len() <= num_layer_sets
            || vps.layer_id_included_flag[1..=num_layer_sets]
                .iter()
                .any(|row| row.len() <= vps.vps_max_layer_id as usize)
        {
            return Err(Error::Protocol(
                "layer_id_included_flag does not cover every layer set".into(),
            ));
        }
    }

    ops.begin_array("layer_id_included_flag");
    for i in 1..=vps.vps_num_layer_sets_minus1 as usize {
        ops.begin_array_item();
        layer_set(ops, &mut vps.layer_id_included_flag[i], vps.vps_max_layer_id)?;
        ops.end_array_item();
    }
    ops.end_array("layer_id_included_flag");

    flag!(ops, vps.vps_timing_info_present_flag);
    if vps.vps_timing_info_present_flag {
        bits!(ops, vps.vps_num_units_in_tick, 32);
        bits!(ops, vps.vps_time_scale, 32);

        flag!(ops, vps.vps_poc_proportional_to_timing_flag);
        if vps.vps_poc_proportional_to_timing_flag {
            bits_ue!(ops, vps.vps_num_ticks_poc_diff_one_minus1);
        }

        bits_ue!(ops, vps.vps_num_hrd_parameters);
        range_check!(vps.vps_num_hrd_parameters, 0, 1024)?;

        if O::KIND == OpKind::Read {
            vps.hrd_parameters = vec![VpsHrd::default(); vps.vps_num_hrd_parameters as usize];
        }
        if vps.hrd_parameters.len() < vps.vps_num_hrd_parameters as usize {
            return Err(Error::Protocol(
                "hrd_parameters holds fewer entries than vps_num_hrd_parameters".into(),
            ));
        }

        ops.begin_array("hrd_layer_set_idx");
        for i in 0..vps.vps_num_hrd_parameters as usize {
            ops.begin_array_item();

            bits_ue!(ops, vps.hrd_parameters[i].hrd_layer_set_idx);

            if i > 0 {
                flag!(ops, vps.hrd_parameters[i].cprms_present_flag);
            } else if O::KIND == OpKind::Read {
                // cprms_present_flag[0] is inferred to be 1 (7.4.3.1).
                vps.hrd_parameters[i].cprms_present_flag = true;
            }

            let cprms = vps.hrd_parameters[i].cprms_present_flag;

            ops.begin_struct("hrd");
            hrd(ops, cprms, vps.vps_max_sub_layers_minus1, &mut vps.hrd_parameters[i].hrd)?;
            ops.end_struct("hrd");

            ops.end_array_item();
        }
        ops.end_array("hrd_layer_set_idx");
    }

    flag!(ops, vps.vps_extension_flag);

    // vps_extension_data_flag is reserved for a later revision.

    ops.rbsp_trailing()?;

    Ok(())
}
