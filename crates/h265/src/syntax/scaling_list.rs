use super::{SyntaxOp, bits_se, bits_ue, flag};
use crate::error::Error;
use crate::types::ScalingListData;

fn scaling_list_inner<O: SyntaxOp>(
    ops: &mut O,
    size_id: usize,
    matrix_id: usize,
    sl: &mut ScalingListData,
) -> Result<(), Error> {
    flag!(ops, sl.pred_mode_flag[size_id][matrix_id]);
    if !sl.pred_mode_flag[size_id][matrix_id] {
        bits_ue!(ops, sl.pred_matrix_id_delta[size_id][matrix_id]);
    } else {
        if size_id > 1 {
            bits_se!(ops, sl.dc_coef_minus8[size_id][matrix_id]);
        }

        let coef_num = 64usize.min(1 << (4 + (size_id << 1)));
        for i in 0..coef_num {
            bits_se!(ops, sl.delta_coef[size_id][matrix_id][i]);
        }
    }

    Ok(())
}

/// 7.3.4 Scaling list data syntax.
pub(crate) fn scaling_list_data<O: SyntaxOp>(
    ops: &mut O,
    sl: &mut ScalingListData,
) -> Result<(), Error> {
    for size_id in 0..4 {
        for matrix_id in 0..6 {
            scaling_list_inner(ops, size_id, matrix_id, sl)?;
        }
    }

    Ok(())
}
