//! Value records mirroring the syntax structures of ITU-T H.265, edition
//! 5.0 (02/2018).

mod header;
mod hrd;
mod info;
mod pps;
mod ptl;
mod sei;
mod sps;
mod vps;
mod vui;

pub use header::{Aud, NaluHeader};
pub use hrd::{CPBS_MAX, Cpb, Hrd, HrdSubLayer, SubLayerHrd};
pub use info::Info;
pub use pps::{
    DeltaDlt, DepthLayerDlt, DltValues, PPS_MAX_COUNT, Pps, Pps3dExt, PpsRangeExt, PpsSccExt,
};
pub use ptl::{ProfileTierLevel, PtlCore, SUB_LAYERS_MAX, SubLayerPresentFlags};
pub use sei::{
    ClockTimestamp, Sei, SeiContentLightLevel, SeiMasteringDisplayColourVolume, SeiPayload,
    SeiRecoveryPoint, SeiTimeCode, SeiUserDataUnregistered,
};
pub use sps::{
    SPS_MAX_COUNT, ST_REF_PIC_SET_PICS_MAX, ScalingListData, Sps, Sps3dExt, SpsMultilayerExt,
    SpsRangeExt, SpsSccExt, StRefPicSet,
};
pub use vps::{VPS_MAX_COUNT, Vps, VpsHrd};
pub use vui::Vui;
