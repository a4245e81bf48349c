//! Parsing, writing and describing the non-picture metadata of an HEVC
//! (ITU-T H.265) bitstream: NAL unit framing, the video / sequence /
//! picture parameter sets, the access unit delimiter, and a handful of SEI
//! messages.
//!
//! The grammar of every supported syntax structure is written once and
//! instantiated three ways (read, write, dump) over a shared bit-level I/O
//! layer, so the three paths cannot drift apart. Slice data is never
//! decoded; VCL NAL units are only recognized to drive access-unit boundary
//! detection.
//!
//! Syntax element names and section references follow ITU-T H.265, edition
//! 5.0 (02/2018).
// TODO: #![deny(missing_docs)]
#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(unsafe_code)]

mod ctx;
mod dump;
mod enums;
mod error;
mod framing;
mod info;
mod range_check;
mod reader;
mod syntax;
mod types;
mod writer;

pub use vela_bitio::{BitReader, BitWriter};

pub use self::ctx::Ctx;
pub use self::dump::Dump;
pub use self::enums::{AspectRatioIdc, NaluType, SeiPayloadType, sar_to_aspect_ratio_idc};
pub use self::error::Error;
pub use self::framing::{byte_stream_to_hvcc, find_nalu, hvcc_to_byte_stream};
pub use self::info::get_info;
pub use self::reader::{NaluHandler, Reader, ReaderFlags, parse_nalu_header};
pub use self::types::{
    Aud, CPBS_MAX, ClockTimestamp, Cpb, DeltaDlt, DepthLayerDlt, DltValues, Hrd, HrdSubLayer,
    Info, NaluHeader, PPS_MAX_COUNT, Pps, Pps3dExt, PpsRangeExt, PpsSccExt, ProfileTierLevel,
    PtlCore, SPS_MAX_COUNT, ST_REF_PIC_SET_PICS_MAX, SUB_LAYERS_MAX, ScalingListData, Sei,
    SeiContentLightLevel, SeiMasteringDisplayColourVolume, SeiPayload, SeiRecoveryPoint,
    SeiTimeCode, SeiUserDataUnregistered, Sps, Sps3dExt, SpsMultilayerExt, SpsRangeExt, SpsSccExt,
    StRefPicSet, SubLayerHrd, SubLayerPresentFlags, VPS_MAX_COUNT, Vps, VpsHrd, Vui,
};
pub use self::writer::{nalu_to_bytes, write_nalu};

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests;
