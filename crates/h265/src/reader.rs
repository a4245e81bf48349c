use bytes::Bytes;
use vela_bitio::BitReader;

use crate::ctx::Ctx;
use crate::enums::{NaluType, SeiPayloadType};
use crate::error::Error;
use crate::framing;
use crate::syntax::{self, ReadOp, SyntaxOp};
use crate::types::{
    Aud, NaluHeader, Pps, Sei, SeiContentLightLevel, SeiMasteringDisplayColourVolume, SeiPayload,
    SeiRecoveryPoint, SeiTimeCode, SeiUserDataUnregistered, Sps, Vps,
};

bitflags::bitflags! {
    /// Options accepted by the read path.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct ReaderFlags: u32 {
        /// Accept non-canonical RBSP trailing bits: the stop bit and the
        /// alignment zeros are consumed without being validated.
        const LENIENT_RBSP_TRAILING = 1 << 0;
    }
}

/// Callbacks fired while reading a bitstream. All methods have empty
/// defaults; implement the ones you care about.
///
/// Handlers receive the context immutably and must not try to smuggle
/// mutations into it; install parameter sets through setters between
/// `parse` calls instead.
pub trait NaluHandler {
    /// Fired after the NAL unit header parses, before its payload.
    fn nalu_begin(&mut self, _ctx: &Ctx, _ty: NaluType, _buf: &[u8]) {}

    /// Fired once the whole NAL unit was processed.
    fn nalu_end(&mut self, _ctx: &Ctx, _ty: NaluType, _buf: &[u8]) {}

    /// Fired between two access units, never at end of stream.
    fn au_end(&mut self, _ctx: &Ctx) {}

    /// Fired after a VPS was successfully installed in the context.
    fn vps(&mut self, _ctx: &Ctx, _buf: &[u8], _vps: &Vps) {}

    /// Fired after an SPS was successfully installed in the context.
    fn sps(&mut self, _ctx: &Ctx, _buf: &[u8], _sps: &Sps) {}

    /// Fired after a PPS was successfully installed in the context.
    fn pps(&mut self, _ctx: &Ctx, _buf: &[u8], _pps: &Pps) {}

    /// Fired after an access unit delimiter was parsed.
    fn aud(&mut self, _ctx: &Ctx, _buf: &[u8], _aud: &Aud) {}

    /// Fired for every SEI message with its raw payload bytes, before the
    /// typed callback.
    fn sei(&mut self, _ctx: &Ctx, _ty: SeiPayloadType, _payload: &[u8]) {}

    fn sei_user_data_unregistered(
        &mut self,
        _ctx: &Ctx,
        _buf: &[u8],
        _sei: &SeiUserDataUnregistered,
    ) {
    }

    fn sei_recovery_point(&mut self, _ctx: &Ctx, _buf: &[u8], _sei: &SeiRecoveryPoint) {}

    fn sei_time_code(&mut self, _ctx: &Ctx, _buf: &[u8], _sei: &SeiTimeCode) {}

    fn sei_mastering_display_colour_volume(
        &mut self,
        _ctx: &Ctx,
        _buf: &[u8],
        _sei: &SeiMasteringDisplayColourVolume,
    ) {
    }

    fn sei_content_light_level(&mut self, _ctx: &Ctx, _buf: &[u8], _sei: &SeiContentLightLevel) {}

    /// Polled by [`Reader::parse`] after each NAL unit; return `true` to
    /// break out of the loop. The in-progress NAL unit always completes.
    fn should_stop(&mut self) -> bool {
        false
    }
}

/// Feeds Annex-B framed NAL units through the syntax engine's read
/// instantiation and fires the handler callbacks in source order.
pub struct Reader<H> {
    handler: H,
    ctx: Ctx,
}

impl<H: NaluHandler> Reader<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            ctx: Ctx::new(),
        }
    }

    pub fn ctx(&self) -> &Ctx {
        &self.ctx
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Parses every NAL unit found in `buf` starting at `*off`, advancing
    /// `*off` past each one.
    ///
    /// A syntax failure aborts only the NAL unit it occurred in; the loop
    /// continues with the next start code. The loop ends at end of buffer
    /// or when the handler asks to stop.
    pub fn parse(&mut self, flags: ReaderFlags, buf: &[u8], off: &mut usize) -> Result<(), Error> {
        while *off < buf.len() {
            let Some((start, end)) = framing::find_nalu(&buf[*off..]) else {
                break;
            };

            let _ = self.parse_nalu(flags, &buf[*off + start..*off + end]);

            *off += end;

            if self.handler.should_stop() {
                break;
            }
        }

        Ok(())
    }

    /// Parses a single NAL unit (start code excluded, emulation prevention
    /// intact).
    pub fn parse_nalu(&mut self, flags: ReaderFlags, buf: &[u8]) -> Result<(), Error> {
        read_nalu(&mut self.ctx, &mut self.handler, buf, flags)
    }
}

/// 7.4.2.4.5: a VCL NAL unit that starts a new picture carries
/// `first_slice_segment_in_pic_flag` as the first bit of its slice header,
/// i.e. the top bit of RBSP byte 2.
fn is_first_vcl(header: &NaluHeader, buf: &[u8]) -> bool {
    if !header.nal_unit_type.is_vcl() || buf.len() < 3 {
        return false;
    }

    buf[2] >> 7 != 0
}

/// 7.4.2.4.4: whether this NAL unit may start an access unit.
fn can_start_au(header: &NaluHeader, buf: &[u8]) -> bool {
    if is_first_vcl(header, buf) {
        return true;
    }

    if header.nuh_layer_id != 0 {
        return false;
    }

    let ty = u8::from(header.nal_unit_type);

    header.nal_unit_type == NaluType::AudNut
        || header.nal_unit_type == NaluType::VpsNut
        || header.nal_unit_type == NaluType::SpsNut
        || header.nal_unit_type == NaluType::PpsNut
        || header.nal_unit_type == NaluType::PrefixSeiNut
        || (41..=44).contains(&ty)
        || (48..=55).contains(&ty)
}

pub(crate) fn read_nalu<H: NaluHandler>(
    ctx: &mut Ctx,
    handler: &mut H,
    buf: &[u8],
    flags: ReaderFlags,
) -> Result<(), Error> {
    let mut bs = BitReader::new(buf, true);

    ctx.nalu_unknown = false;
    ctx.clear_nalu();

    let mut header = NaluHeader::default();
    syntax::nalu_header(&mut ReadOp::new(&mut bs, flags), &mut header)?;
    ctx.nalu_header = header.clone();

    handler.nalu_begin(ctx, header.nal_unit_type, buf);

    let ty = header.nal_unit_type;
    if ty == NaluType::VpsNut {
        let mut vps = Vps::default();
        syntax::vps(&mut ReadOp::new(&mut bs, flags), &mut vps)?;
        ctx.set_vps(&vps)?;
        if let Some(active) = ctx.vps() {
            handler.vps(ctx, buf, active);
        }
    } else if ty == NaluType::SpsNut {
        let mut sps = Sps::default();
        syntax::sps(&mut ReadOp::new(&mut bs, flags), &mut sps)?;
        ctx.set_sps(&sps)?;
        if let Some(active) = ctx.sps() {
            handler.sps(ctx, buf, active);
        }
    } else if ty == NaluType::PpsNut {
        let mut pps = Pps::default();
        syntax::pps(&mut ReadOp::new(&mut bs, flags), &mut pps)?;
        ctx.set_pps(&pps)?;
        if let Some(active) = ctx.pps() {
            handler.pps(ctx, buf, active);
        }
    } else if ty == NaluType::AudNut {
        let mut aud = Aud::default();
        syntax::aud(&mut ReadOp::new(&mut bs, flags), &mut aud)?;
        ctx.aud = aud.clone();
        handler.aud(ctx, buf, &aud);
    } else if ty == NaluType::PrefixSeiNut {
        read_sei(ctx, handler, &mut bs, flags, buf)?;
    } else {
        ctx.nalu_unknown = true;
    }

    // Access unit change detection.
    if ctx.first_vcl_of_current_frame_found && can_start_au(&header, buf) {
        handler.au_end(ctx);
        ctx.first_vcl_of_current_frame_found = false;
    }
    if is_first_vcl(&header, buf) {
        ctx.first_vcl_of_current_frame_found = true;
    }

    handler.nalu_end(ctx, header.nal_unit_type, buf);

    Ok(())
}

/// Decodes the typed view of one SEI payload from its raw bytes.
///
/// The outer bitstream already consumed emulation-prevention bytes while
/// capturing `raw`, so this second pass must not strip them again.
fn parse_sei_payload(payload_type: u32, raw: &Bytes) -> Result<SeiPayload, Error> {
    let ty = SeiPayloadType::from(payload_type);
    let mut bs = BitReader::new(raw, false);
    let mut ops = ReadOp::new(&mut bs, ReaderFlags::empty());

    if ty == SeiPayloadType::UserDataUnregistered {
        let mut sei = SeiUserDataUnregistered::default();
        syntax::sei_user_data_unregistered(&mut ops, &mut sei)?;
        sei.data = raw.slice(16..);
        Ok(SeiPayload::UserDataUnregistered(sei))
    } else if ty == SeiPayloadType::RecoveryPoint {
        let mut sei = SeiRecoveryPoint::default();
        syntax::sei_recovery_point(&mut ops, &mut sei)?;
        Ok(SeiPayload::RecoveryPoint(sei))
    } else if ty == SeiPayloadType::TimeCode {
        let mut sei = SeiTimeCode::default();
        syntax::sei_time_code(&mut ops, &mut sei)?;
        Ok(SeiPayload::TimeCode(sei))
    } else if ty == SeiPayloadType::MasteringDisplayColourVolume {
        let mut sei = SeiMasteringDisplayColourVolume::default();
        syntax::sei_mastering_display_colour_volume(&mut ops, &mut sei)?;
        Ok(SeiPayload::MasteringDisplayColourVolume(sei))
    } else if ty == SeiPayloadType::ContentLightLevel {
        let mut sei = SeiContentLightLevel::default();
        syntax::sei_content_light_level(&mut ops, &mut sei)?;
        Ok(SeiPayload::ContentLightLevel(sei))
    } else {
        Ok(SeiPayload::Raw(payload_type))
    }
}

/// 7.3.2.4: the SEI RBSP is a sequence of ff-coded (type, size) headers
/// each followed by exactly `size` raw payload bytes.
fn read_sei<H: NaluHandler>(
    ctx: &mut Ctx,
    handler: &mut H,
    bs: &mut BitReader,
    flags: ReaderFlags,
    buf: &[u8],
) -> Result<(), Error> {
    loop {
        let payload_type = bs.read_ff_coded()?;
        let payload_size = bs.read_ff_coded()?;

        let mut raw = vec![0u8; payload_size as usize];
        bs.read_raw_bytes(&mut raw)?;
        let raw = Bytes::from(raw);

        let index = ctx.seis.len();
        ctx.seis.push(Sei {
            payload: SeiPayload::Raw(payload_type),
            raw: raw.clone(),
        });

        handler.sei(ctx, SeiPayloadType::from(payload_type), &raw);

        ctx.seis[index].payload = parse_sei_payload(payload_type, &raw)?;

        match &ctx.seis[index].payload {
            SeiPayload::UserDataUnregistered(sei) => {
                handler.sei_user_data_unregistered(ctx, buf, sei)
            }
            SeiPayload::RecoveryPoint(sei) => handler.sei_recovery_point(ctx, buf, sei),
            SeiPayload::TimeCode(sei) => handler.sei_time_code(ctx, buf, sei),
            SeiPayload::MasteringDisplayColourVolume(sei) => {
                handler.sei_mastering_display_colour_volume(ctx, buf, sei)
            }
            SeiPayload::ContentLightLevel(sei) => handler.sei_content_light_level(ctx, buf, sei),
            SeiPayload::Raw(_) => {}
        }

        if !bs.more_rbsp_data() {
            break;
        }
    }

    ReadOp::new(bs, flags).rbsp_trailing()?;

    Ok(())
}

/// Parses just the two-byte NAL unit header of `buf`.
pub fn parse_nalu_header(buf: &[u8]) -> Result<NaluHeader, Error> {
    let mut bs = BitReader::new(buf, true);
    let mut header = NaluHeader::default();
    syntax::nalu_header(
        &mut ReadOp::new(&mut bs, ReaderFlags::empty()),
        &mut header,
    )?;
    Ok(header)
}

fn check_nalu_type(buf: &[u8], expected: NaluType) -> Result<BitReader<'_>, Error> {
    let mut bs = BitReader::new(buf, true);
    let mut header = NaluHeader::default();
    syntax::nalu_header(
        &mut ReadOp::new(&mut bs, ReaderFlags::empty()),
        &mut header,
    )?;
    if header.nal_unit_type != expected {
        return Err(Error::InvalidArgument("unexpected nal_unit_type"));
    }
    Ok(bs)
}

pub(crate) fn parse_vps(buf: &[u8]) -> Result<Vps, Error> {
    let mut bs = check_nalu_type(buf, NaluType::VpsNut)?;
    let mut vps = Vps::default();
    syntax::vps(&mut ReadOp::new(&mut bs, ReaderFlags::empty()), &mut vps)?;
    Ok(vps)
}

pub(crate) fn parse_sps(buf: &[u8]) -> Result<Sps, Error> {
    let mut bs = check_nalu_type(buf, NaluType::SpsNut)?;
    let mut sps = Sps::default();
    syntax::sps(&mut ReadOp::new(&mut bs, ReaderFlags::empty()), &mut sps)?;
    Ok(sps)
}

pub(crate) fn parse_pps(buf: &[u8]) -> Result<Pps, Error> {
    let mut bs = check_nalu_type(buf, NaluType::PpsNut)?;
    let mut pps = Pps::default();
    syntax::pps(&mut ReadOp::new(&mut bs, ReaderFlags::empty()), &mut pps)?;
    Ok(pps)
}
