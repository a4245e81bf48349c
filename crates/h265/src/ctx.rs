use vela_bitio::BitWriter;

use crate::error::Error;
use crate::types::{
    Aud, Info, NaluHeader, PPS_MAX_COUNT, Pps, SPS_MAX_COUNT, Sei, SeiPayload, SeiTimeCode,
    Sps, VPS_MAX_COUNT, Vps,
};

/// Owner of the parsed bitstream state: the indexed parameter-set slots,
/// the most recent NAL unit header and AUD, and the SEI messages of the
/// current access unit.
///
/// A context is filled either by a [`Reader`](crate::Reader) or by the
/// setters below, and consumed by the writer and dump paths. It is not
/// synchronized; share it across threads behind external locking only.
pub struct Ctx {
    pub(crate) nalu_header: NaluHeader,

    pub(crate) first_vcl_of_current_frame_found: bool,

    pub(crate) nalu_unknown: bool,

    pub(crate) aud: Aud,

    vps_table: [Option<Box<Vps>>; VPS_MAX_COUNT],
    active_vps: Option<usize>,

    sps_table: [Option<Box<Sps>>; SPS_MAX_COUNT],
    active_sps: Option<usize>,

    pps_table: [Option<Box<Pps>>; PPS_MAX_COUNT],
    active_pps: Option<usize>,

    pub(crate) seis: Vec<Sei>,
}

impl Default for Ctx {
    fn default() -> Self {
        Self::new()
    }
}

impl Ctx {
    pub fn new() -> Self {
        Self {
            nalu_header: NaluHeader::default(),
            first_vcl_of_current_frame_found: false,
            nalu_unknown: false,
            aud: Aud::default(),
            vps_table: std::array::from_fn(|_| None),
            active_vps: None,
            sps_table: std::array::from_fn(|_| None),
            active_sps: None,
            pps_table: std::array::from_fn(|_| None),
            active_pps: None,
            seis: Vec::new(),
        }
    }

    /// Releases the per-NAL state (the SEI queue) while keeping all
    /// parameter-set slots.
    pub fn clear_nalu(&mut self) {
        self.seis.clear();
    }

    /// Whether the most recently read NAL unit had an unrecognized type.
    pub fn is_nalu_unknown(&self) -> bool {
        self.nalu_unknown
    }

    pub fn nalu_header(&self) -> &NaluHeader {
        &self.nalu_header
    }

    /// Sets the header the writer will emit next.
    pub fn set_nalu_header(&mut self, nh: &NaluHeader) {
        self.nalu_header = nh.clone();
    }

    pub fn aud(&self) -> &Aud {
        &self.aud
    }

    pub fn set_aud(&mut self, aud: &Aud) {
        self.aud = aud.clone();
    }

    /// The active VPS, if any.
    pub fn vps(&self) -> Option<&Vps> {
        self.active_vps.and_then(|id| self.vps_table[id].as_deref())
    }

    /// Installs a deep copy of `vps` in its ID slot, replacing any previous
    /// set with that ID, and makes it the active VPS.
    pub fn set_vps(&mut self, vps: &Vps) -> Result<(), Error> {
        let id = vps.vps_video_parameter_set_id as usize;
        if id >= VPS_MAX_COUNT {
            return Err(Error::InvalidArgument("vps_video_parameter_set_id is out of range"));
        }

        self.vps_table[id] = Some(Box::new(vps.clone()));
        self.active_vps = Some(id);
        Ok(())
    }

    /// The active SPS, if any.
    pub fn sps(&self) -> Option<&Sps> {
        self.active_sps.and_then(|id| self.sps_table[id].as_deref())
    }

    /// Installs a deep copy of `sps` in its ID slot, replacing any previous
    /// set with that ID, and makes it the active SPS.
    pub fn set_sps(&mut self, sps: &Sps) -> Result<(), Error> {
        let id = sps.sps_seq_parameter_set_id as usize;
        if id >= SPS_MAX_COUNT {
            return Err(Error::InvalidArgument("sps_seq_parameter_set_id is out of range"));
        }

        self.sps_table[id] = Some(Box::new(sps.clone()));
        self.active_sps = Some(id);
        Ok(())
    }

    /// The active PPS, if any.
    pub fn pps(&self) -> Option<&Pps> {
        self.active_pps.and_then(|id| self.pps_table[id].as_deref())
    }

    /// Installs a deep copy of `pps` in its ID slot, replacing any previous
    /// set with that ID, and makes it the active PPS. The tile arrays and
    /// per-layer DLT tables are duplicated along with the scalars.
    pub fn set_pps(&mut self, pps: &Pps) -> Result<(), Error> {
        let id = pps.pps_pic_parameter_set_id as usize;
        if id >= PPS_MAX_COUNT {
            return Err(Error::InvalidArgument("pps_pic_parameter_set_id is out of range"));
        }

        self.pps_table[id] = Some(Box::new(pps.clone()));
        self.active_pps = Some(id);
        Ok(())
    }

    /// The SEI messages accumulated for the current access unit, in stream
    /// order.
    pub fn seis(&self) -> &[Sei] {
        &self.seis
    }

    pub fn sei_count(&self) -> usize {
        self.seis.len()
    }

    /// Appends an SEI message and builds its canonical raw payload by
    /// running the write instantiation once.
    ///
    /// For [`SeiPayload::Raw`] messages the caller-supplied bytes are the
    /// payload and must not be empty.
    pub fn add_sei(&mut self, sei: &Sei) -> Result<(), Error> {
        let mut sei = sei.clone();

        match &sei.payload {
            SeiPayload::Raw(_) => {
                if sei.raw.is_empty() {
                    return Err(Error::InvalidArgument("raw SEI payload is empty"));
                }
            }
            _ => {
                // Encode the payload without emulation prevention; escapes
                // are applied when the whole SEI NAL unit is written.
                let mut bs = BitWriter::new(false);
                crate::writer::write_one_sei(&mut bs, &mut sei)?;
                sei.raw = bs.finish()?;

                if let SeiPayload::UserDataUnregistered(user_data) = &mut sei.payload {
                    user_data.data = sei.raw.slice(16..);
                }
            }
        }

        self.seis.push(sei);
        Ok(())
    }

    /// Converts a time code SEI into a timestamp in units of the active
    /// SPS's VUI time scale:
    /// `((H*60 + M)*60 + S)*time_scale + n_frames*num_units_in_tick*(1 + units_field_based_flag) + time_offset`,
    /// clamped at zero when the offset underflows.
    pub fn sei_time_code_to_ts(&self, tc: &SeiTimeCode) -> Result<u64, Error> {
        let sps = self.sps().ok_or(Error::MissingParameterSets)?;
        if sps.vui.vui_time_scale == 0 || sps.vui.vui_num_units_in_tick == 0 {
            return Err(Error::Protocol("VUI timing info is absent or zero".into()));
        }

        let ts = &tc.clock_ts[0];
        let clock_timestamp = ((ts.hours_value as u64 * 60 + ts.minutes_value as u64) * 60
            + ts.seconds_value as u64)
            * sps.vui.vui_time_scale as u64
            + ts.n_frames as u64
                * (sps.vui.vui_num_units_in_tick as u64 * (1 + ts.units_field_based_flag as u64));

        Ok(clock_timestamp
            .checked_add_signed(ts.time_offset_value as i64)
            .unwrap_or(0))
    }

    /// As [`Ctx::sei_time_code_to_ts`], scaled to microseconds with
    /// round-to-nearest.
    pub fn sei_time_code_to_us(&self, tc: &SeiTimeCode) -> Result<u64, Error> {
        let sps = self.sps().ok_or(Error::MissingParameterSets)?;
        let time_scale = sps.vui.vui_time_scale as u64;
        if time_scale == 0 {
            return Err(Error::Protocol("VUI timing info is absent or zero".into()));
        }

        let clock_timestamp = self.sei_time_code_to_ts(tc)?;
        Ok((clock_timestamp * 1_000_000 + time_scale / 2) / time_scale)
    }

    /// Derives picture attributes from the active VPS + SPS + PPS.
    pub fn info(&self) -> Result<Info, Error> {
        match (self.vps(), self.sps(), self.pps()) {
            (Some(vps), Some(sps), Some(pps)) => {
                Ok(crate::info::info_from_parameter_sets(vps, sps, pps))
            }
            _ => Err(Error::MissingParameterSets),
        }
    }
}
