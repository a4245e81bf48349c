use nutype_enum::nutype_enum;

nutype_enum! {
    /// NAL (Network Abstraction Layer) unit types as defined by ITU-T H.265 Table 7-1.
    pub enum NaluType(u8) {
        /// Coded slice segment of a non-TSA, non-STSA trailing picture
        TrailN = 0,
        /// Coded slice segment of a non-TSA, non-STSA trailing picture
        TrailR = 1,
        /// Coded slice segment of a TSA picture
        TsaN = 2,
        /// Coded slice segment of a TSA picture
        TsaR = 3,
        /// Coded slice segment of an STSA picture
        StsaN = 4,
        /// Coded slice segment of an STSA picture
        StsaR = 5,
        /// Coded slice segment of a RADL picture
        RadlN = 6,
        /// Coded slice segment of a RADL picture
        RadlR = 7,
        /// Coded slice segment of a RASL picture
        RaslN = 8,
        /// Coded slice segment of a RASL picture
        RaslR = 9,
        /// Reserved non-IRAP SLNR VCL NAL unit type
        RsvVclN10 = 10,
        /// Reserved non-IRAP sub-layer reference VCL NAL unit type
        RsvVclR11 = 11,
        /// Reserved non-IRAP SLNR VCL NAL unit type
        RsvVclN12 = 12,
        /// Reserved non-IRAP sub-layer reference VCL NAL unit type
        RsvVclR13 = 13,
        /// Reserved non-IRAP SLNR VCL NAL unit type
        RsvVclN14 = 14,
        /// Reserved non-IRAP sub-layer reference VCL NAL unit type
        RsvVclR15 = 15,
        /// Coded slice segment of a BLA picture
        BlaWLp = 16,
        /// Coded slice segment of a BLA picture
        BlaWRadl = 17,
        /// Coded slice segment of a BLA picture
        BlaNLp = 18,
        /// Coded slice segment of an IDR picture
        IdrWRadl = 19,
        /// Coded slice segment of an IDR picture
        IdrNLp = 20,
        /// Coded slice segment of a CRA picture
        CraNut = 21,
        /// Reserved IRAP VCL NAL unit type
        RsvIrapVcl22 = 22,
        /// Reserved IRAP VCL NAL unit type
        RsvIrapVcl23 = 23,
        /// Reserved non-IRAP VCL NAL unit type
        RsvVcl24 = 24,
        /// Reserved non-IRAP VCL NAL unit type
        RsvVcl25 = 25,
        /// Reserved non-IRAP VCL NAL unit type
        RsvVcl26 = 26,
        /// Reserved non-IRAP VCL NAL unit type
        RsvVcl27 = 27,
        /// Reserved non-IRAP VCL NAL unit type
        RsvVcl28 = 28,
        /// Reserved non-IRAP VCL NAL unit type
        RsvVcl29 = 29,
        /// Reserved non-IRAP VCL NAL unit type
        RsvVcl30 = 30,
        /// Reserved non-IRAP VCL NAL unit type
        RsvVcl31 = 31,
        /// Video parameter set
        VpsNut = 32,
        /// Sequence parameter set
        SpsNut = 33,
        /// Picture parameter set
        PpsNut = 34,
        /// Access unit delimiter
        AudNut = 35,
        /// End of sequence
        EosNut = 36,
        /// End of bitstream
        EobNut = 37,
        /// Filler data
        FdNut = 38,
        /// Supplemental enhancement information (prefix)
        PrefixSeiNut = 39,
        /// Supplemental enhancement information (suffix)
        SuffixSeiNut = 40,
        /// Reserved non-VCL NAL unit type
        RsvNvcl41 = 41,
        /// Reserved non-VCL NAL unit type
        RsvNvcl42 = 42,
        /// Reserved non-VCL NAL unit type
        RsvNvcl43 = 43,
        /// Reserved non-VCL NAL unit type
        RsvNvcl44 = 44,
        /// Reserved non-VCL NAL unit type
        RsvNvcl45 = 45,
        /// Reserved non-VCL NAL unit type
        RsvNvcl46 = 46,
        /// Reserved non-VCL NAL unit type
        RsvNvcl47 = 47,
        /// Unspecified non-VCL NAL unit type
        Unspec48 = 48,
        /// Unspecified non-VCL NAL unit type
        Unspec49 = 49,
        /// Unspecified non-VCL NAL unit type
        Unspec50 = 50,
        /// Unspecified non-VCL NAL unit type
        Unspec51 = 51,
        /// Unspecified non-VCL NAL unit type
        Unspec52 = 52,
        /// Unspecified non-VCL NAL unit type
        Unspec53 = 53,
        /// Unspecified non-VCL NAL unit type
        Unspec54 = 54,
        /// Unspecified non-VCL NAL unit type
        Unspec55 = 55,
        /// Unspecified non-VCL NAL unit type
        Unspec56 = 56,
        /// Unspecified non-VCL NAL unit type
        Unspec57 = 57,
        /// Unspecified non-VCL NAL unit type
        Unspec58 = 58,
        /// Unspecified non-VCL NAL unit type
        Unspec59 = 59,
        /// Unspecified non-VCL NAL unit type
        Unspec60 = 60,
        /// Unspecified non-VCL NAL unit type
        Unspec61 = 61,
        /// Unspecified non-VCL NAL unit type
        Unspec62 = 62,
        /// Unspecified non-VCL NAL unit type
        Unspec63 = 63,
    }
}

impl NaluType {
    /// Whether this type carries coded picture data.
    ///
    /// ITU-T H.265 Table 7-1, NAL unit type class column.
    pub fn is_vcl(&self) -> bool {
        self.0 < 32
    }
}

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn vcl_boundary() {
        assert!(NaluType::TrailN.is_vcl());
        assert!(NaluType::RsvVcl31.is_vcl());
        assert!(!NaluType::VpsNut.is_vcl());
        assert!(!NaluType::Unspec63.is_vcl());
    }
}
