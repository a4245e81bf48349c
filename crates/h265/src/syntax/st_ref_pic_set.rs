use super::{OpKind, SyntaxOp, bits_ue, flag};
use crate::error::Error;
use crate::range_check::range_check;
use crate::types::{ST_REF_PIC_SET_PICS_MAX, StRefPicSet};

/// 7.3.7 Short-term reference picture set syntax.
///
/// `sets` holds entries `0..=st_rps_idx`; the preceding entries must already
/// carry their derived fields, which is how inter-RPS prediction reaches
/// back without re-reading earlier sets.
pub(crate) fn st_ref_pic_set<O: SyntaxOp>(
    ops: &mut O,
    st_rps_idx: usize,
    num_short_term_ref_pic_sets: u32,
    sets: &mut [StRefPicSet],
) -> Result<(), Error> {
    let (prior, current) = sets.split_at_mut(st_rps_idx);
    let st_rps = &mut current[0];

    if O::KIND == OpKind::Read {
        // use_delta_flag defaults to 1 when not coded (7.4.8).
        st_rps.use_delta_flag = [true; ST_REF_PIC_SET_PICS_MAX + 1];
    }

    if st_rps_idx != 0 {
        flag!(ops, st_rps.inter_ref_pic_set_prediction_flag);
    }

    if st_rps.inter_ref_pic_set_prediction_flag {
        if st_rps_idx == num_short_term_ref_pic_sets as usize {
            bits_ue!(ops, st_rps.delta_idx_minus1);
        }

        flag!(ops, st_rps.delta_rps_sign);
        bits_ue!(ops, st_rps.abs_delta_rps_minus1);

        if st_rps.delta_idx_minus1 as usize + 1 > st_rps_idx {
            return Err(Error::Protocol("delta_idx_minus1 is out of range".into()));
        }
        let ref_rps_idx = st_rps_idx - (st_rps.delta_idx_minus1 as usize + 1);
        let ref_rps = &prior[ref_rps_idx];

        let delta_rps = (1 - 2 * st_rps.delta_rps_sign as i32) * (st_rps.abs_delta_rps_minus1 as i32 + 1);

        let num_delta_pocs = (ref_rps.num_negative_pics + ref_rps.num_positive_pics) as usize;
        range_check!(num_delta_pocs, 0, ST_REF_PIC_SET_PICS_MAX - 1)?;

        ops.begin_array("delta_pocs");
        for j in 0..=num_delta_pocs {
            ops.begin_array_item();

            flag!(ops, st_rps.used_by_curr_pic_flag[j]);
            if !st_rps.used_by_curr_pic_flag[j] {
                flag!(ops, st_rps.use_delta_flag[j]);
            }

            ops.end_array_item();
        }
        ops.end_array("delta_pocs");

        // The 7.4.8 derivation, run after the use_delta_flag semantics.
        // DeltaPocS0 and delta_poc_s0_minus1 have surprisingly different
        // meanings: DeltaPocS0[i] == delta_poc_s0_minus1[i] + 1 does not
        // hold here, and later sets depend on the derived values.
        let num_negative = ref_rps.num_negative_pics as usize;
        let num_positive = ref_rps.num_positive_pics as usize;

        let mut i = 0;
        for j in (0..num_positive).rev() {
            let d_poc = ref_rps.derived_delta_poc_s1[j] + delta_rps;
            let idx = num_negative + j;
            if d_poc < 0 && st_rps.use_delta_flag[idx] {
                st_rps.derived_delta_poc_s0[i] = d_poc;
                st_rps.used_by_curr_pic_s0_flag[i] = st_rps.used_by_curr_pic_flag[idx];
                i += 1;
            }
        }
        if delta_rps < 0 && st_rps.use_delta_flag[num_delta_pocs] {
            st_rps.derived_delta_poc_s0[i] = delta_rps;
            st_rps.used_by_curr_pic_s0_flag[i] = st_rps.used_by_curr_pic_flag[num_delta_pocs];
            i += 1;
        }
        for j in 0..num_negative {
            let d_poc = ref_rps.derived_delta_poc_s0[j] + delta_rps;
            if d_poc < 0 && st_rps.use_delta_flag[j] {
                st_rps.derived_delta_poc_s0[i] = d_poc;
                st_rps.used_by_curr_pic_s0_flag[i] = st_rps.used_by_curr_pic_flag[j];
                i += 1;
            }
        }
        st_rps.num_negative_pics = i as u32;

        i = 0;
        for j in (0..num_negative).rev() {
            let d_poc = ref_rps.derived_delta_poc_s0[j] + delta_rps;
            if d_poc > 0 && st_rps.use_delta_flag[j] {
                st_rps.derived_delta_poc_s1[i] = d_poc;
                st_rps.used_by_curr_pic_s1_flag[i] = st_rps.used_by_curr_pic_flag[j];
                i += 1;
            }
        }
        if delta_rps > 0 && st_rps.use_delta_flag[num_delta_pocs] {
            st_rps.derived_delta_poc_s1[i] = delta_rps;
            st_rps.used_by_curr_pic_s1_flag[i] = st_rps.used_by_curr_pic_flag[num_delta_pocs];
            i += 1;
        }
        for j in 0..num_positive {
            let d_poc = ref_rps.derived_delta_poc_s1[j] + delta_rps;
            let idx = num_negative + j;
            if d_poc > 0 && st_rps.use_delta_flag[idx] {
                st_rps.derived_delta_poc_s1[i] = d_poc;
                st_rps.used_by_curr_pic_s1_flag[i] = st_rps.used_by_curr_pic_flag[idx];
                i += 1;
            }
        }
        st_rps.num_positive_pics = i as u32;
    } else {
        bits_ue!(ops, st_rps.num_negative_pics);
        bits_ue!(ops, st_rps.num_positive_pics);
        range_check!(st_rps.num_negative_pics, 0, ST_REF_PIC_SET_PICS_MAX as u32)?;
        range_check!(st_rps.num_positive_pics, 0, ST_REF_PIC_SET_PICS_MAX as u32)?;
        range_check!(
            st_rps.num_negative_pics + st_rps.num_positive_pics,
            0,
            ST_REF_PIC_SET_PICS_MAX as u32
        )?;

        ops.begin_array("negative_pics");
        for i in 0..st_rps.num_negative_pics as usize {
            ops.begin_array_item();

            bits_ue!(ops, st_rps.delta_poc_s0_minus1[i]);
            flag!(ops, st_rps.used_by_curr_pic_s0_flag[i]);

            ops.end_array_item();
        }
        ops.end_array("negative_pics");

        ops.begin_array("positive_pics");
        for i in 0..st_rps.num_positive_pics as usize {
            ops.begin_array_item();

            bits_ue!(ops, st_rps.delta_poc_s1_minus1[i]);
            flag!(ops, st_rps.used_by_curr_pic_s1_flag[i]);

            ops.end_array_item();
        }
        ops.end_array("positive_pics");

        // Deriving these is mandatory: the next set may predict from them.
        if st_rps.num_negative_pics > 0 {
            st_rps.derived_delta_poc_s0[0] = -(st_rps.delta_poc_s0_minus1[0] as i32 + 1);
            for i in 1..st_rps.num_negative_pics as usize {
                st_rps.derived_delta_poc_s0[i] =
                    st_rps.derived_delta_poc_s0[i - 1] - (st_rps.delta_poc_s0_minus1[i] as i32 + 1);
            }
        }

        if st_rps.num_positive_pics > 0 {
            st_rps.derived_delta_poc_s1[0] = st_rps.delta_poc_s1_minus1[0] as i32 + 1;
            for i in 1..st_rps.num_positive_pics as usize {
                st_rps.derived_delta_poc_s1[i] =
                    st_rps.derived_delta_poc_s1[i - 1] + st_rps.delta_poc_s1_minus1[i] as i32 + 1;
            }
        }
    }

    Ok(())
}
