//! The write facade: emits NAL units from a populated [`Ctx`] through the
//! syntax engine's write instantiation.

use bytes::Bytes;
use vela_bitio::BitWriter;

use crate::ctx::Ctx;
use crate::enums::NaluType;
use crate::error::Error;
use crate::syntax::{self, WriteOp};
use crate::types::Sei;

/// Writes one NAL unit into `bs`.
///
/// The NAL unit type comes from the context's NAL header; the payload from
/// the matching active record (parameter set, AUD, or the SEI queue), which
/// must have been installed beforehand.
pub fn write_nalu(bs: &mut BitWriter, ctx: &Ctx) -> Result<(), Error> {
    let mut header = ctx.nalu_header().clone();
    syntax::nalu_header(&mut WriteOp::new(bs), &mut header)?;

    let ty = header.nal_unit_type;
    if ty == NaluType::VpsNut {
        let mut vps = ctx
            .vps()
            .ok_or(Error::InvalidArgument("no active VPS to write"))?
            .clone();
        syntax::vps(&mut WriteOp::new(bs), &mut vps)?;
    } else if ty == NaluType::SpsNut {
        let mut sps = ctx
            .sps()
            .ok_or(Error::InvalidArgument("no active SPS to write"))?
            .clone();
        syntax::sps(&mut WriteOp::new(bs), &mut sps)?;
    } else if ty == NaluType::PpsNut {
        let mut pps = ctx
            .pps()
            .ok_or(Error::InvalidArgument("no active PPS to write"))?
            .clone();
        syntax::pps(&mut WriteOp::new(bs), &mut pps)?;
    } else if ty == NaluType::AudNut {
        let mut aud = ctx.aud().clone();
        syntax::aud(&mut WriteOp::new(bs), &mut aud)?;
    } else if ty == NaluType::PrefixSeiNut {
        write_sei(bs, ctx)?;
    } else {
        return Err(Error::InvalidArgument(
            "unsupported nal_unit_type for writing",
        ));
    }

    Ok(())
}

/// Writes one NAL unit into a fresh emulation-prevented buffer, without the
/// start code.
pub fn nalu_to_bytes(ctx: &Ctx) -> Result<Bytes, Error> {
    let mut bs = BitWriter::new(true);
    write_nalu(&mut bs, ctx)?;
    Ok(bs.finish()?)
}

/// 7.3.2.4: emits every queued SEI message as its ff-coded type and size
/// followed by the canonical raw payload built at
/// [`Ctx::add_sei`](crate::Ctx::add_sei) time.
fn write_sei(bs: &mut BitWriter, ctx: &Ctx) -> Result<(), Error> {
    if ctx.sei_count() == 0 {
        return Err(Error::InvalidArgument("no SEI messages to write"));
    }

    for sei in ctx.seis() {
        if sei.raw.is_empty() {
            return Err(Error::InvalidArgument("SEI message has no raw payload"));
        }

        bs.write_ff_coded(u32::from(sei.payload_type()));
        bs.write_ff_coded(sei.raw.len() as u32);
        bs.write_raw_bytes(&sei.raw);
    }

    bs.write_rbsp_trailing_bits();

    Ok(())
}

/// Writes the payload body of one SEI message (no type/size prefix),
/// producing its canonical serialization.
pub(crate) fn write_one_sei(bs: &mut BitWriter, sei: &mut Sei) -> Result<(), Error> {
    syntax::one_sei(&mut WriteOp::new(bs), sei)
}
