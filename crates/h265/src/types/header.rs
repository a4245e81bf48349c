use crate::NaluType;

/// The two-byte NAL unit header.
///
/// ITU-T H.265 - 7.3.1.2
#[derive(Debug, Clone, PartialEq)]
pub struct NaluHeader {
    /// Must be 0 in a conforming bitstream.
    pub forbidden_zero_bit: bool,
    pub nal_unit_type: NaluType,
    /// Identifier of the layer this NAL unit belongs (VCL) or applies
    /// (non-VCL) to. 0 for single-layer streams.
    pub nuh_layer_id: u32,
    /// The temporal identifier plus 1; never 0 in a conforming bitstream.
    pub nuh_temporal_id_plus1: u32,
}

impl Default for NaluHeader {
    fn default() -> Self {
        Self {
            forbidden_zero_bit: false,
            nal_unit_type: NaluType::TrailN,
            nuh_layer_id: 0,
            nuh_temporal_id_plus1: 0,
        }
    }
}

impl NaluHeader {
    /// `TemporalId` as derived by equation 7-1.
    pub fn temporal_id(&self) -> u32 {
        self.nuh_temporal_id_plus1.saturating_sub(1)
    }
}

/// The access unit delimiter RBSP.
///
/// ITU-T H.265 - 7.3.2.5
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aud {
    /// 3 bits; indicates which slice types may appear in the access unit.
    pub pic_type: u32,
}
