use tracing::warn;

use crate::enums::SAR_TABLE;
use crate::error::Error;
use crate::AspectRatioIdc;
use crate::types::{Info, Pps, Sps, Vps};

/// Derives the user-visible picture attributes from a parsed parameter-set
/// triplet.
pub(crate) fn info_from_parameter_sets(vps: &Vps, sps: &Sps, _pps: &Pps) -> Info {
    let mut info = Info::default();

    info.width = sps.pic_width_in_luma_samples;
    info.height = sps.pic_height_in_luma_samples;

    info.bit_depth_luma = sps.bit_depth_luma_minus8 as u8 + 8;

    if sps.conformance_window_flag {
        // Table 6-1
        let sub_width_c = if sps.chroma_format_idc == 1 || sps.chroma_format_idc == 2 {
            2
        } else {
            1
        };
        let sub_height_c = if sps.chroma_format_idc == 1 { 2 } else { 1 };

        info.crop_left = sps.conf_win_left_offset.saturating_mul(sub_width_c);
        info.crop_top = sps.conf_win_top_offset.saturating_mul(sub_height_c);
        info.crop_width = info.width.saturating_sub(
            sub_width_c
                .saturating_mul(sps.conf_win_left_offset.saturating_add(sps.conf_win_right_offset)),
        );
        info.crop_height = info.height.saturating_sub(
            sub_height_c
                .saturating_mul(sps.conf_win_top_offset.saturating_add(sps.conf_win_bottom_offset)),
        );
    } else {
        info.crop_left = 0;
        info.crop_top = 0;
        info.crop_width = info.width;
        info.crop_height = info.height;
    }

    if vps.vps_timing_info_present_flag {
        info.num_units_in_tick = vps.vps_num_units_in_tick;
        info.time_scale = vps.vps_time_scale;
    }

    info.sar_width = 1;
    info.sar_height = 1;
    if sps.vui_parameters_present_flag {
        if sps.vui.aspect_ratio_info_present_flag {
            if sps.vui.aspect_ratio_idc == AspectRatioIdc::ExtendedSar.0 as u32 {
                info.sar_width = sps.vui.sar_width;
                info.sar_height = sps.vui.sar_height;
            } else if sps.vui.aspect_ratio_idc <= 16 {
                let (w, h) = SAR_TABLE[sps.vui.aspect_ratio_idc as usize];
                info.sar_width = w;
                info.sar_height = h;
            }
        }

        info.full_range = sps.vui.video_full_range_flag;

        if sps.vui.colour_description_present_flag {
            info.colour_description_present = true;
            info.colour_primaries = sps.vui.colour_primaries;
            info.transfer_characteristics = sps.vui.transfer_characteristics;
            info.matrix_coefficients = sps.vui.matrix_coeffs;
        } else {
            // 2 means unspecified.
            info.colour_primaries = 2;
            info.transfer_characteristics = 2;
            info.matrix_coefficients = 2;
        }

        if sps.vui.vui_timing_info_present_flag {
            if info.num_units_in_tick != 0 && info.num_units_in_tick != sps.vui.vui_num_units_in_tick
            {
                warn!(
                    vps = info.num_units_in_tick,
                    vui = sps.vui.vui_num_units_in_tick,
                    "num_units_in_tick mismatch"
                );
                info.num_units_in_tick = sps.vui.vui_num_units_in_tick;
            } else {
                info.num_units_in_tick = sps.vui.vui_num_units_in_tick;
            }
            if info.time_scale != 0 && info.time_scale != sps.vui.vui_time_scale {
                warn!(
                    vps = info.time_scale,
                    vui = sps.vui.vui_time_scale,
                    "time_scale mismatch"
                );
                info.time_scale = sps.vui.vui_time_scale;
            } else {
                info.time_scale = sps.vui.vui_time_scale;
            }
        }

        if sps.vui.vui_hrd_parameters_present_flag && sps.vui.hrd.nal_hrd_parameters_present_flag {
            let cpb = &sps.vui.hrd.sub_layers[0].nal_hrd.cpbs[0];
            info.nal_hrd_bitrate =
                (cpb.bit_rate_du_value_minus1 + 1) << (6 + sps.vui.hrd.bit_rate_scale);
            info.nal_hrd_cpb_size =
                (cpb.cpb_size_value_minus1 + 1) << (4 + sps.vui.hrd.cpb_size_scale);
        }

        if sps.vui.vui_hrd_parameters_present_flag && sps.vui.hrd.vcl_hrd_parameters_present_flag {
            let cpb = &sps.vui.hrd.sub_layers[0].vcl_hrd.cpbs[0];
            info.vcl_hrd_bitrate =
                (cpb.bit_rate_du_value_minus1 + 1) << (6 + sps.vui.hrd.bit_rate_scale);
            info.vcl_hrd_cpb_size =
                (cpb.cpb_size_value_minus1 + 1) << (4 + sps.vui.hrd.cpb_size_scale);
        }
    }

    info.framerate = if info.num_units_in_tick != 0 {
        info.time_scale as f32 / info.num_units_in_tick as f32
    } else {
        0.0
    };
    info.framerate_num = info.time_scale;
    info.framerate_den = info.num_units_in_tick;

    info
}

/// Parses one VPS, SPS and PPS NAL unit each and derives the picture
/// attributes, without going through a [`Ctx`](crate::Ctx).
pub fn get_info(vps: &[u8], sps: &[u8], pps: &[u8]) -> Result<Info, Error> {
    let vps = Vps::parse(vps)?;
    let sps = Sps::parse(sps)?;
    let pps = Pps::parse(pps)?;
    Ok(info_from_parameter_sets(&vps, &sps, &pps))
}
