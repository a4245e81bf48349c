use nutype_enum::nutype_enum;

nutype_enum! {
    /// SEI payload types decoded by this crate.
    ///
    /// ITU-T H.265 - D.2. Any other payload type is carried through as raw
    /// bytes without interpretation.
    pub enum SeiPayloadType(u32) {
        /// D.2.7 User data unregistered
        UserDataUnregistered = 5,
        /// D.2.8 Recovery point
        RecoveryPoint = 6,
        /// D.2.27 Time code
        TimeCode = 136,
        /// D.2.28 Mastering display colour volume
        MasteringDisplayColourVolume = 137,
        /// D.2.35 Content light level information
        ContentLightLevel = 144,
    }
}
