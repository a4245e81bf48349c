use super::{SyntaxOp, bits, flag};
use crate::error::Error;
use crate::types::{ProfileTierLevel, PtlCore};

/// The common core of the general and sub-layer profile/tier/level blocks.
///
/// Not a structure of its own in 7.3.3; the factorization is backed by the
/// paragraph following the definition of `reserved_zero_2bits` in 7.4.4.
fn ptl_core<O: SyntaxOp>(
    ops: &mut O,
    profile_present_flag: bool,
    level_present_flag: bool,
    ptl: &mut PtlCore,
) -> Result<(), Error> {
    if profile_present_flag {
        bits!(ops, ptl.profile_space, 2);
        flag!(ops, ptl.tier_flag);
        bits!(ops, ptl.profile_idc, 5);

        ops.begin_array("profile_compatibility_flag");
        for i in 0..32 {
            ops.begin_array_item();
            flag!(ops, ptl.profile_compatibility_flag[i]);
            ops.end_array_item();
        }
        ops.end_array("profile_compatibility_flag");

        flag!(ops, ptl.progressive_source_flag);
        flag!(ops, ptl.interlaced_source_flag);
        flag!(ops, ptl.non_packed_constraint_flag);
        flag!(ops, ptl.frame_only_constraint_flag);

        let compat = ptl.profile_compatibility_flag;
        if (4..=10).contains(&ptl.profile_idc) || compat[4..=10].iter().any(|&f| f) {
            flag!(ops, ptl.max_12bit_constraint_flag);
            flag!(ops, ptl.max_10bit_constraint_flag);
            flag!(ops, ptl.max_8bit_constraint_flag);
            flag!(ops, ptl.max_422chroma_constraint_flag);
            flag!(ops, ptl.max_420chroma_constraint_flag);
            flag!(ops, ptl.max_monochrome_constraint_flag);
            flag!(ops, ptl.intra_constraint_flag);
            flag!(ops, ptl.one_picture_only_constraint_flag);
            flag!(ops, ptl.lower_bit_rate_constraint_flag);

            if ptl.profile_idc == 5
                || compat[5]
                || ptl.profile_idc == 9
                || compat[9]
                || ptl.profile_idc == 10
                || compat[10]
            {
                flag!(ops, ptl.max_14bit_constraint_flag);
                ops.reserved_zero_bits(33)?;
            } else {
                ops.reserved_zero_bits(34)?;
            }
        } else if ptl.profile_idc == 2 || compat[2] {
            ops.reserved_zero_bits(7)?;
            flag!(ops, ptl.one_picture_only_constraint_flag);
            ops.reserved_zero_bits(35)?;
        } else {
            ops.reserved_zero_bits(43)?;
        }

        if (1..=5).contains(&ptl.profile_idc)
            || ptl.profile_idc == 9
            || compat[1..=5].iter().any(|&f| f)
            || compat[9]
        {
            flag!(ops, ptl.inbld_flag);
        } else {
            ops.reserved_zero_bits(1)?;
        }
    }

    if level_present_flag {
        bits!(ops, ptl.level_idc, 8);
    }

    Ok(())
}

/// 7.3.3 Profile, tier and level syntax.
pub(crate) fn profile_tier_level<O: SyntaxOp>(
    ops: &mut O,
    profile_present_flag: bool,
    max_sub_layers_minus1: u32,
    ptl: &mut ProfileTierLevel,
) -> Result<(), Error> {
    ptl_core(ops, profile_present_flag, true, &mut ptl.general)?;

    ops.begin_array("sub_layer_present_flags");
    for i in 0..max_sub_layers_minus1 as usize {
        ops.begin_array_item();
        flag!(ops, ptl.sub_layer_present_flags[i].profile);
        flag!(ops, ptl.sub_layer_present_flags[i].level);
        ops.end_array_item();
    }
    ops.end_array("sub_layer_present_flags");

    if max_sub_layers_minus1 > 0 {
        for _ in max_sub_layers_minus1..8 {
            ops.reserved_zero_bits(2)?;
        }
    }

    ops.begin_array("sub_layers");
    for i in 0..max_sub_layers_minus1 as usize {
        ops.begin_array_item();
        ptl_core(
            ops,
            ptl.sub_layer_present_flags[i].profile,
            ptl.sub_layer_present_flags[i].level,
            &mut ptl.sub_layers[i],
        )?;
        ops.end_array_item();
    }
    ops.end_array("sub_layers");

    Ok(())
}
