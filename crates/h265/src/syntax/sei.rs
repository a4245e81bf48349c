use super::{OpKind, SyntaxOp, bits, bits_i, bits_se, flag};
use crate::error::Error;
use crate::types::{
    Sei, SeiContentLightLevel, SeiMasteringDisplayColourVolume, SeiPayload, SeiRecoveryPoint,
    SeiTimeCode, SeiUserDataUnregistered,
};

/// D.2.7 User data unregistered SEI message syntax.
///
/// On read, `data` is a view into the raw payload fixed up by the caller;
/// only the UUID is consumed from the bitstream here.
pub(crate) fn sei_user_data_unregistered<O: SyntaxOp>(
    ops: &mut O,
    sei: &mut SeiUserDataUnregistered,
) -> Result<(), Error> {
    ops.begin_array("uuid");
    for i in 0..16 {
        let mut byte = sei.uuid[i] as u32;
        ops.bits(&mut byte, 8, "uuid")?;
        sei.uuid[i] = byte as u8;
    }
    ops.end_array("uuid");

    if O::KIND != OpKind::Read {
        ops.begin_array("data");
        for i in 0..sei.data.len() {
            let mut byte = sei.data[i] as u32;
            ops.bits(&mut byte, 8, "data")?;
        }
        ops.end_array("data");
    }

    Ok(())
}

/// D.2.8 Recovery point SEI message syntax.
pub(crate) fn sei_recovery_point<O: SyntaxOp>(
    ops: &mut O,
    sei: &mut SeiRecoveryPoint,
) -> Result<(), Error> {
    bits_se!(ops, sei.recovery_poc_cnt);
    flag!(ops, sei.exact_match_flag);
    flag!(ops, sei.broken_link_flag);
    Ok(())
}

/// D.2.27 Time code SEI message syntax.
pub(crate) fn sei_time_code<O: SyntaxOp>(ops: &mut O, sei: &mut SeiTimeCode) -> Result<(), Error> {
    bits!(ops, sei.num_clock_ts, 2);

    ops.begin_array("clock_ts");
    for i in 0..sei.num_clock_ts as usize {
        ops.begin_array_item();

        flag!(ops, sei.clock_ts[i].clock_timestamp_flag);
        if sei.clock_ts[i].clock_timestamp_flag {
            flag!(ops, sei.clock_ts[i].units_field_based_flag);
            bits!(ops, sei.clock_ts[i].counting_type, 5);
            flag!(ops, sei.clock_ts[i].full_timestamp_flag);
            flag!(ops, sei.clock_ts[i].discontinuity_flag);
            flag!(ops, sei.clock_ts[i].cnt_dropped_flag);
            bits!(ops, sei.clock_ts[i].n_frames, 9);

            if sei.clock_ts[i].full_timestamp_flag {
                bits!(ops, sei.clock_ts[i].seconds_value, 6);
                bits!(ops, sei.clock_ts[i].minutes_value, 6);
                bits!(ops, sei.clock_ts[i].hours_value, 5);
            } else {
                flag!(ops, sei.clock_ts[i].seconds_flag);
                if sei.clock_ts[i].seconds_flag {
                    bits!(ops, sei.clock_ts[i].seconds_value, 6);
                    flag!(ops, sei.clock_ts[i].minutes_flag);
                    if sei.clock_ts[i].minutes_flag {
                        bits!(ops, sei.clock_ts[i].minutes_value, 6);
                        flag!(ops, sei.clock_ts[i].hours_flag);
                        if sei.clock_ts[i].hours_flag {
                            bits!(ops, sei.clock_ts[i].hours_value, 5);
                        }
                    }
                }
            }

            bits!(ops, sei.clock_ts[i].time_offset_length, 5);
            if sei.clock_ts[i].time_offset_length > 0 {
                let time_offset_length = sei.clock_ts[i].time_offset_length;
                bits_i!(ops, sei.clock_ts[i].time_offset_value, time_offset_length);
            }
        }

        ops.end_array_item();
    }
    ops.end_array("clock_ts");

    Ok(())
}

/// D.2.28 Mastering display colour volume SEI message syntax.
pub(crate) fn sei_mastering_display_colour_volume<O: SyntaxOp>(
    ops: &mut O,
    sei: &mut SeiMasteringDisplayColourVolume,
) -> Result<(), Error> {
    for i in 0..3 {
        bits!(ops, sei.display_primaries_x[i], 16);
        bits!(ops, sei.display_primaries_y[i], 16);
    }
    bits!(ops, sei.white_point_x, 16);
    bits!(ops, sei.white_point_y, 16);
    bits!(ops, sei.max_display_mastering_luminance, 32);
    bits!(ops, sei.min_display_mastering_luminance, 32);
    Ok(())
}

/// D.2.35 Content light level information SEI message syntax.
pub(crate) fn sei_content_light_level<O: SyntaxOp>(
    ops: &mut O,
    sei: &mut SeiContentLightLevel,
) -> Result<(), Error> {
    bits!(ops, sei.max_content_light_level, 16);
    bits!(ops, sei.max_pic_average_light_level, 16);
    Ok(())
}

/// One SEI payload body, excluding the ff-coded type/size prefix.
pub(crate) fn one_sei<O: SyntaxOp>(ops: &mut O, sei: &mut Sei) -> Result<(), Error> {
    match &mut sei.payload {
        SeiPayload::UserDataUnregistered(s) => sei_user_data_unregistered(ops, s)?,
        SeiPayload::RecoveryPoint(s) => sei_recovery_point(ops, s)?,
        SeiPayload::TimeCode(s) => sei_time_code(ops, s)?,
        SeiPayload::MasteringDisplayColourVolume(s) => {
            sei_mastering_display_colour_volume(ops, s)?
        }
        SeiPayload::ContentLightLevel(s) => sei_content_light_level(ops, s)?,
        SeiPayload::Raw(_) => return Ok(()),
    }

    // Payload bit alignment.
    match O::KIND {
        OpKind::Read => {
            // Should be a 1 followed by 0s, but tolerate erroneous streams.
            while !ops.byte_aligned() {
                let mut bit = 0u32;
                ops.bits(&mut bit, 1, "payload_bit_equal_to_zero")?;
            }
        }
        OpKind::Write => {
            if !ops.byte_aligned() {
                ops.rbsp_trailing()?;
            }
        }
        OpKind::Dump => {}
    }

    Ok(())
}
