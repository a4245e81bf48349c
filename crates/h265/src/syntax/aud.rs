use super::{SyntaxOp, bits};
use crate::error::Error;
use crate::types::Aud;

/// 7.3.2.5 Access unit delimiter RBSP syntax.
pub(crate) fn aud<O: SyntaxOp>(ops: &mut O, aud: &mut Aud) -> Result<(), Error> {
    bits!(ops, aud.pic_type, 3);
    ops.rbsp_trailing()?;
    Ok(())
}
