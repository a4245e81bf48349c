use super::{SyntaxOp, bits, flag};
use crate::NaluType;
use crate::error::Error;
use crate::types::NaluHeader;

/// 7.3.1.2 NAL unit header syntax.
pub(crate) fn nalu_header<O: SyntaxOp>(ops: &mut O, nh: &mut NaluHeader) -> Result<(), Error> {
    flag!(ops, nh.forbidden_zero_bit);
    if nh.forbidden_zero_bit {
        return Err(Error::Protocol("forbidden_zero_bit is not zero".into()));
    }

    let mut nal_unit_type = u8::from(nh.nal_unit_type) as u32;
    ops.bits(&mut nal_unit_type, 6, "nal_unit_type")?;
    nh.nal_unit_type = NaluType::from(nal_unit_type as u8);

    bits!(ops, nh.nuh_layer_id, 6);
    bits!(ops, nh.nuh_temporal_id_plus1, 3);

    Ok(())
}
