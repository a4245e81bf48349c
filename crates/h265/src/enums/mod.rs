mod aspect_ratio_idc;
mod nalu_type;
mod sei_payload_type;

pub use aspect_ratio_idc::{AspectRatioIdc, sar_to_aspect_ratio_idc};
pub(crate) use aspect_ratio_idc::SAR_TABLE;
pub use nalu_type::NaluType;
pub use sei_payload_type::SeiPayloadType;
