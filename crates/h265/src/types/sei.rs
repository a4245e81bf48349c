use bytes::Bytes;

use crate::SeiPayloadType;

/// User data unregistered SEI message.
///
/// ITU-T H.265 - D.2.7. `data` is a view into the canonical raw payload,
/// starting right after the 16-byte UUID.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeiUserDataUnregistered {
    pub uuid: [u8; 16],
    pub data: Bytes,
}

/// Recovery point SEI message.
///
/// ITU-T H.265 - D.2.8
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeiRecoveryPoint {
    pub recovery_poc_cnt: i32,
    pub exact_match_flag: bool,
    pub broken_link_flag: bool,
}

/// One clock timestamp of a time code SEI message.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClockTimestamp {
    pub clock_timestamp_flag: bool,
    pub units_field_based_flag: bool,
    pub counting_type: u32,
    pub full_timestamp_flag: bool,
    pub discontinuity_flag: bool,
    pub cnt_dropped_flag: bool,
    pub n_frames: u32,
    pub seconds_flag: bool,
    pub seconds_value: u32,
    pub minutes_flag: bool,
    pub minutes_value: u32,
    pub hours_flag: bool,
    pub hours_value: u32,
    pub time_offset_length: u32,
    pub time_offset_value: i32,
}

/// Time code SEI message.
///
/// ITU-T H.265 - D.2.27
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeiTimeCode {
    /// 2 bits; number of meaningful entries in `clock_ts`.
    pub num_clock_ts: u32,
    pub clock_ts: [ClockTimestamp; 4],
}

/// Mastering display colour volume SEI message.
///
/// ITU-T H.265 - D.2.28
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeiMasteringDisplayColourVolume {
    pub display_primaries_x: [u32; 3],
    pub display_primaries_y: [u32; 3],
    pub white_point_x: u32,
    pub white_point_y: u32,
    pub max_display_mastering_luminance: u32,
    pub min_display_mastering_luminance: u32,
}

/// Content light level information SEI message.
///
/// ITU-T H.265 - D.2.35
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeiContentLightLevel {
    pub max_content_light_level: u32,
    pub max_pic_average_light_level: u32,
}

/// The decoded form of one SEI message.
#[derive(Debug, Clone, PartialEq)]
pub enum SeiPayload {
    UserDataUnregistered(SeiUserDataUnregistered),
    RecoveryPoint(SeiRecoveryPoint),
    TimeCode(SeiTimeCode),
    MasteringDisplayColourVolume(SeiMasteringDisplayColourVolume),
    ContentLightLevel(SeiContentLightLevel),
    /// Any other payload type; the bytes live in [`Sei::raw`] only.
    Raw(u32),
}

/// One SEI message: a typed view plus the canonical raw payload bytes.
///
/// `raw` is authoritative for writing: the reader fills it from the stream,
/// and [`Ctx::add_sei`](crate::Ctx::add_sei) builds it from the typed view.
#[derive(Debug, Clone, PartialEq)]
pub struct Sei {
    pub payload: SeiPayload,
    pub raw: Bytes,
}

impl Sei {
    /// Creates a message whose raw payload is built on
    /// [`Ctx::add_sei`](crate::Ctx::add_sei).
    pub fn new(payload: SeiPayload) -> Self {
        Self {
            payload,
            raw: Bytes::new(),
        }
    }

    pub fn payload_type(&self) -> SeiPayloadType {
        match &self.payload {
            SeiPayload::UserDataUnregistered(_) => SeiPayloadType::UserDataUnregistered,
            SeiPayload::RecoveryPoint(_) => SeiPayloadType::RecoveryPoint,
            SeiPayload::TimeCode(_) => SeiPayloadType::TimeCode,
            SeiPayload::MasteringDisplayColourVolume(_) => {
                SeiPayloadType::MasteringDisplayColourVolume
            }
            SeiPayload::ContentLightLevel(_) => SeiPayloadType::ContentLightLevel,
            SeiPayload::Raw(ty) => SeiPayloadType::from(*ty),
        }
    }
}
