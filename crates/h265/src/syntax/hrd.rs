use super::{OpKind, SyntaxOp, bits, bits_ue, flag};
use crate::error::Error;
use crate::range_check::range_check;
use crate::types::{Hrd, SubLayerHrd};

/// E.2.3 Sub-layer HRD parameters syntax.
fn sub_layer_hrd<O: SyntaxOp>(
    ops: &mut O,
    cpb_cnt: u32,
    sub_pic_hrd_params_present_flag: bool,
    hrd: &mut SubLayerHrd,
) -> Result<(), Error> {
    ops.begin_array("cpbs");
    for i in 0..cpb_cnt as usize {
        ops.begin_array_item();

        bits_ue!(ops, hrd.cpbs[i].bit_rate_value_minus1);
        bits_ue!(ops, hrd.cpbs[i].cpb_size_value_minus1);
        if sub_pic_hrd_params_present_flag {
            bits_ue!(ops, hrd.cpbs[i].cpb_size_du_value_minus1);
            bits_ue!(ops, hrd.cpbs[i].bit_rate_du_value_minus1);
        }
        flag!(ops, hrd.cpbs[i].cbr_flag);

        ops.end_array_item();
    }
    ops.end_array("cpbs");

    Ok(())
}

fn hrd_common<O: SyntaxOp>(ops: &mut O, hrd: &mut Hrd) -> Result<(), Error> {
    flag!(ops, hrd.nal_hrd_parameters_present_flag);
    flag!(ops, hrd.vcl_hrd_parameters_present_flag);

    if hrd.nal_hrd_parameters_present_flag || hrd.vcl_hrd_parameters_present_flag {
        flag!(ops, hrd.sub_pic_hrd_params_present_flag);

        if hrd.sub_pic_hrd_params_present_flag {
            bits!(ops, hrd.tick_divisor_minus2, 8);
            bits!(ops, hrd.du_cpb_removal_delay_increment_length_minus1, 5);
            flag!(ops, hrd.sub_pic_cpb_params_in_pic_timing_sei_flag);
            bits!(ops, hrd.dpb_output_delay_du_length_minus1, 5);
        }

        bits!(ops, hrd.bit_rate_scale, 4);
        bits!(ops, hrd.cpb_size_scale, 4);

        if hrd.sub_pic_hrd_params_present_flag {
            bits!(ops, hrd.cpb_size_du_scale, 4);
        }

        bits!(ops, hrd.initial_cpb_removal_delay_length_minus1, 5);
        bits!(ops, hrd.au_cpb_removal_delay_length_minus1, 5);
        bits!(ops, hrd.dpb_output_delay_length_minus1, 5);
    }

    Ok(())
}

/// E.2.2 HRD parameters syntax.
pub(crate) fn hrd<O: SyntaxOp>(
    ops: &mut O,
    common_inf_present_flag: bool,
    max_num_sub_layers_minus1: u32,
    hrd: &mut Hrd,
) -> Result<(), Error> {
    if O::KIND == OpKind::Read {
        // Non-zero defaults when the common-info block is absent (E.3.2).
        hrd.initial_cpb_removal_delay_length_minus1 = 23;
        hrd.au_cpb_removal_delay_length_minus1 = 23;
        hrd.dpb_output_delay_length_minus1 = 23;
    }

    if common_inf_present_flag {
        hrd_common(ops, hrd)?;
    }

    ops.begin_array("sub_layers");
    for i in 0..=max_num_sub_layers_minus1 as usize {
        ops.begin_array_item();

        flag!(ops, hrd.sub_layers[i].fixed_pic_rate_general_flag);
        if !hrd.sub_layers[i].fixed_pic_rate_general_flag {
            flag!(ops, hrd.sub_layers[i].fixed_pic_rate_within_cvs_flag);
        } else if O::KIND == OpKind::Read {
            // Inferred to be 1 (E.3.2).
            hrd.sub_layers[i].fixed_pic_rate_within_cvs_flag = true;
        }

        if hrd.sub_layers[i].fixed_pic_rate_within_cvs_flag {
            bits_ue!(ops, hrd.sub_layers[i].elemental_duration_in_tc_minus1);
        } else {
            flag!(ops, hrd.sub_layers[i].low_delay_hrd_flag);
        }

        if !hrd.sub_layers[i].low_delay_hrd_flag {
            bits_ue!(ops, hrd.sub_layers[i].cpb_cnt_minus1);
        }
        range_check!(hrd.sub_layers[i].cpb_cnt_minus1, 0, 31)?;

        let cpb_cnt = hrd.sub_layers[i].cpb_cnt_minus1 + 1;
        let sub_pic = hrd.sub_pic_hrd_params_present_flag;

        if hrd.nal_hrd_parameters_present_flag {
            sub_layer_hrd(ops, cpb_cnt, sub_pic, &mut hrd.sub_layers[i].nal_hrd)?;
        }

        if hrd.vcl_hrd_parameters_present_flag {
            sub_layer_hrd(ops, cpb_cnt, sub_pic, &mut hrd.sub_layers[i].vcl_hrd)?;
        }

        ops.end_array_item();
    }
    ops.end_array("sub_layers");

    Ok(())
}
