use bytes::Bytes;

use crate::*;

/// VPS, SPS and PPS of a 2560x1440 @ 144 fps stream recorded with OBS,
/// extracted from its `hvcC` configuration record.
const VPS_2560: &[u8] =
    b"\x40\x01\x0c\x01\xff\xff\x01\x40\x00\x00\x03\x00\x90\x00\x00\x03\x00\x00\x03\x00\x99\x95\x40\x90";
const SPS_2560: &[u8] = b"\x42\x01\x01\x01\x40\x00\x00\x03\x00\x90\x00\x00\x03\x00\x00\x03\x00\x99\xa0\x01\x40\x20\x05\xa1\x65\x95\x52\x90\x84\x64\x5f\xf8\xc0\x5a\x80\x80\x80\x82\x00\x00\x03\x00\x02\x00\x00\x03\x01\x20\xc0\x0b\xbc\xa2\x00\x02\x62\x58\x00\x01\x31\x2d\x08";
const PPS_2560: &[u8] = b"\x44\x01\xc0\x93\x7c\x0c\xc9";

/// A 1920x1080 SPS from an mp4 video file recorded with OBS.
const SPS_1080: &[u8] = b"\x42\x01\x01\x01\x40\x00\x00\x03\x00\x90\x00\x00\x03\x00\x00\x03\x00\x78\xa0\x03\xc0\x80\x11\x07\xcb\x96\xb4\xa4\x25\x92\xe3\x01\x6a\x02\x02\x02\x08\x00\x00\x03\x00\x08\x00\x00\x03\x00\xf3\x00\x2e\xf2\x88\x00\x02\x62\x5a\x00\x00\x13\x12\xd0\x20";

/// A 7680x4320 SPS (https://kodi.wiki/view/Samples); the buffer carries a
/// few container bytes after the RBSP stop bit.
const SPS_8K: &[u8] = b"\x42\x01\x01\x01\x60\x00\x00\x03\x00\x90\x00\x00\x03\x00\x00\x03\x00\xb4\xa0\x00\xf0\x08\x00\x43\x85\x96\x56\x69\x24\xc2\xb0\x16\x80\x80\x00\x00\x03\x00\x80\x00\x00\x05\x04\x22\x00\x01";

fn annex_b(nalus: &[&[u8]]) -> Vec<u8> {
    let mut out = Vec::new();
    for nalu in nalus {
        out.extend_from_slice(&[0x00, 0x00, 0x00, 0x01]);
        out.extend_from_slice(nalu);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Event {
    NaluBegin(NaluType),
    NaluEnd(NaluType),
    AuEnd,
    Vps,
    Sps,
    Pps,
    Aud(u32),
    Sei(SeiPayloadType),
}

#[derive(Default)]
struct Recorder {
    events: Vec<Event>,
    typed_seis: Vec<SeiPayload>,
}

impl NaluHandler for Recorder {
    fn nalu_begin(&mut self, _ctx: &Ctx, ty: NaluType, _buf: &[u8]) {
        self.events.push(Event::NaluBegin(ty));
    }

    fn nalu_end(&mut self, _ctx: &Ctx, ty: NaluType, _buf: &[u8]) {
        self.events.push(Event::NaluEnd(ty));
    }

    fn au_end(&mut self, _ctx: &Ctx) {
        self.events.push(Event::AuEnd);
    }

    fn vps(&mut self, _ctx: &Ctx, _buf: &[u8], _vps: &Vps) {
        self.events.push(Event::Vps);
    }

    fn sps(&mut self, _ctx: &Ctx, _buf: &[u8], _sps: &Sps) {
        self.events.push(Event::Sps);
    }

    fn pps(&mut self, _ctx: &Ctx, _buf: &[u8], _pps: &Pps) {
        self.events.push(Event::Pps);
    }

    fn aud(&mut self, _ctx: &Ctx, _buf: &[u8], aud: &Aud) {
        self.events.push(Event::Aud(aud.pic_type));
    }

    fn sei(&mut self, _ctx: &Ctx, ty: SeiPayloadType, _payload: &[u8]) {
        self.events.push(Event::Sei(ty));
    }

    fn sei_recovery_point(&mut self, _ctx: &Ctx, _buf: &[u8], sei: &SeiRecoveryPoint) {
        self.typed_seis.push(SeiPayload::RecoveryPoint(sei.clone()));
    }

    fn sei_time_code(&mut self, _ctx: &Ctx, _buf: &[u8], sei: &SeiTimeCode) {
        self.typed_seis.push(SeiPayload::TimeCode(sei.clone()));
    }

    fn sei_user_data_unregistered(
        &mut self,
        _ctx: &Ctx,
        _buf: &[u8],
        sei: &SeiUserDataUnregistered,
    ) {
        self.typed_seis
            .push(SeiPayload::UserDataUnregistered(sei.clone()));
    }

    fn sei_content_light_level(&mut self, _ctx: &Ctx, _buf: &[u8], sei: &SeiContentLightLevel) {
        self.typed_seis
            .push(SeiPayload::ContentLightLevel(sei.clone()));
    }

    fn sei_mastering_display_colour_volume(
        &mut self,
        _ctx: &Ctx,
        _buf: &[u8],
        sei: &SeiMasteringDisplayColourVolume,
    ) {
        self.typed_seis
            .push(SeiPayload::MasteringDisplayColourVolume(sei.clone()));
    }
}

#[test]
fn parse_vps() {
    let vps = Vps::parse(VPS_2560).unwrap();

    assert_eq!(vps.vps_video_parameter_set_id, 0);
    assert_eq!(vps.vps_max_layers_minus1, 0);
    assert_eq!(vps.vps_max_sub_layers_minus1, 0);
    assert!(vps.vps_temporal_id_nesting_flag);
    assert_eq!(vps.vps_reserved_0xffff_16bits, 0xffff);
    assert_eq!(vps.profile_tier_level.general.profile_idc, 1);
    assert_eq!(vps.profile_tier_level.general.level_idc, 153);
    assert_eq!(vps.vps_max_dec_pic_buffering_minus1[0], 4);
    assert!(!vps.vps_timing_info_present_flag);
}

#[test]
fn parse_sps() {
    let sps = Sps::parse(SPS_2560).unwrap();

    assert_eq!(sps.sps_video_parameter_set_id, 0);
    assert_eq!(sps.sps_seq_parameter_set_id, 0);
    assert_eq!(sps.chroma_format_idc, 1);
    assert_eq!(sps.width(), 2560);
    assert_eq!(sps.height(), 1440);
    assert_eq!(sps.bit_depth_luma_minus8, 0);
    assert_eq!(sps.profile_tier_level.general.profile_idc, 1);
    assert!(sps.vui_parameters_present_flag);
    assert!(sps.vui.vui_timing_info_present_flag);
    assert_eq!(sps.vui.vui_num_units_in_tick, 1);
    assert_eq!(sps.vui.vui_time_scale, 144);
}

#[test]
fn parse_sps_1080() {
    let sps = Sps::parse(SPS_1080).unwrap();

    assert_eq!(sps.width(), 1920);
    assert_eq!(sps.height(), 1080);
}

#[test]
fn parse_sps_8k() {
    let sps = Sps::parse(SPS_8K).unwrap();

    assert_eq!(sps.width(), 7680);
    assert_eq!(sps.height(), 4320);
}

#[test]
fn parse_pps() {
    let pps = Pps::parse(PPS_2560).unwrap();

    assert_eq!(pps.pps_pic_parameter_set_id, 0);
    assert_eq!(pps.pps_seq_parameter_set_id, 0);
    assert!(!pps.tiles_enabled_flag);
    assert!(pps.uniform_spacing_flag);
}

#[test]
fn standalone_parsers_check_the_nalu_type() {
    assert!(matches!(
        Vps::parse(SPS_2560),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        Sps::parse(PPS_2560),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        Pps::parse(VPS_2560),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn forbidden_zero_bit_is_rejected() {
    assert!(matches!(Sps::parse(&[0x80]), Err(Error::Protocol(_))));
}

#[test]
fn truncated_nalu_is_end_of_stream() {
    assert!(matches!(
        Sps::parse(&SPS_2560[..10]),
        Err(Error::EndOfStream)
    ));
}

fn write_back(nalu: &[u8]) -> Bytes {
    let header = parse_nalu_header(nalu).unwrap();
    let mut ctx = Ctx::new();
    ctx.set_nalu_header(&header);

    let ty = header.nal_unit_type;
    if ty == NaluType::VpsNut {
        ctx.set_vps(&Vps::parse(nalu).unwrap()).unwrap();
    } else if ty == NaluType::SpsNut {
        ctx.set_sps(&Sps::parse(nalu).unwrap()).unwrap();
    } else if ty == NaluType::PpsNut {
        ctx.set_pps(&Pps::parse(nalu).unwrap()).unwrap();
    }

    nalu_to_bytes(&ctx).unwrap()
}

#[test]
fn vps_write_back_is_byte_identical() {
    assert_eq!(write_back(VPS_2560).as_ref(), VPS_2560);
}

#[test]
fn sps_write_back_is_byte_identical() {
    assert_eq!(write_back(SPS_2560).as_ref(), SPS_2560);
}

#[test]
fn pps_write_back_is_byte_identical() {
    assert_eq!(write_back(PPS_2560).as_ref(), PPS_2560);
}

#[test]
fn reparse_of_written_sps_is_identical() {
    let first = Sps::parse(SPS_2560).unwrap();
    let written = write_back(SPS_2560);
    let second = Sps::parse(&written).unwrap();
    assert_eq!(first, second);
}

#[test]
fn minimal_vps_parse_through_reader() {
    let stream = annex_b(&[VPS_2560]);

    let mut reader = Reader::new(Recorder::default());
    let mut off = 0;
    reader
        .parse(ReaderFlags::empty(), &stream, &mut off)
        .unwrap();

    assert_eq!(off, stream.len());
    assert!(!reader.ctx().is_nalu_unknown());
    let vps = reader.ctx().vps().expect("VPS should be installed");
    assert_eq!(vps.vps_video_parameter_set_id, 0);
    assert_eq!(
        reader.handler().events,
        [
            Event::NaluBegin(NaluType::VpsNut),
            Event::Vps,
            Event::NaluEnd(NaluType::VpsNut),
        ]
    );
}

#[test]
fn au_boundary_detection() {
    // [AUD][VPS][SPS][PPS][VCL first=1][VCL first=0][AUD]: au_end must fire
    // exactly once, while the second AUD is being processed.
    let aud: &[u8] = &[0x46, 0x01, 0x50];
    let vcl_first: &[u8] = &[0x02, 0x01, 0x80];
    let vcl_rest: &[u8] = &[0x02, 0x01, 0x40];
    let stream = annex_b(&[aud, VPS_2560, SPS_2560, PPS_2560, vcl_first, vcl_rest, aud]);

    let mut reader = Reader::new(Recorder::default());
    let mut off = 0;
    reader
        .parse(ReaderFlags::empty(), &stream, &mut off)
        .unwrap();

    let events = &reader.handler().events;
    let au_ends: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, e)| **e == Event::AuEnd)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(au_ends.len(), 1, "events: {events:?}");

    // The au_end lands inside the final AUD, after the last VCL completed.
    let last_vcl_end = events
        .iter()
        .rposition(|e| *e == Event::NaluEnd(NaluType::TrailR))
        .unwrap();
    let final_aud_end = events
        .iter()
        .rposition(|e| *e == Event::NaluEnd(NaluType::AudNut))
        .unwrap();
    assert!(last_vcl_end < au_ends[0]);
    assert!(au_ends[0] < final_aud_end);
}

#[test]
fn unknown_nalu_is_flagged_but_processed() {
    // nal_unit_type 24 (RSV_VCL24).
    let nalu = [0x30, 0x01, 0x80];

    let mut reader = Reader::new(Recorder::default());
    reader.parse_nalu(ReaderFlags::empty(), &nalu).unwrap();

    assert!(reader.ctx().is_nalu_unknown());
    assert!(reader.ctx().vps().is_none());
    assert!(reader.ctx().sps().is_none());
    assert!(reader.ctx().pps().is_none());
    assert_eq!(
        reader.handler().events,
        [
            Event::NaluBegin(NaluType::RsvVcl24),
            Event::NaluEnd(NaluType::RsvVcl24),
        ]
    );
}

#[test]
fn parse_survives_a_corrupt_nalu() {
    // A truncated SPS aborts its own parse; the PPS after it still lands.
    let stream = annex_b(&[&SPS_2560[..12], PPS_2560]);

    let mut reader = Reader::new(Recorder::default());
    let mut off = 0;
    reader
        .parse(ReaderFlags::empty(), &stream, &mut off)
        .unwrap();

    assert!(reader.ctx().sps().is_none());
    assert!(reader.ctx().pps().is_some());
}

#[test]
fn sei_round_trip() {
    let user_data = SeiUserDataUnregistered {
        uuid: [0xA5; 16],
        data: Bytes::from_static(&[0x01, 0x02, 0x00, 0x00, 0x01, 0xFF]),
    };
    let recovery = SeiRecoveryPoint {
        recovery_poc_cnt: -3,
        exact_match_flag: true,
        broken_link_flag: false,
    };
    let mut time_code = SeiTimeCode {
        num_clock_ts: 1,
        ..Default::default()
    };
    time_code.clock_ts[0] = ClockTimestamp {
        clock_timestamp_flag: true,
        full_timestamp_flag: true,
        n_frames: 12,
        seconds_value: 30,
        minutes_value: 59,
        hours_value: 23,
        ..Default::default()
    };
    let mastering = SeiMasteringDisplayColourVolume {
        display_primaries_x: [35400, 8500, 6550],
        display_primaries_y: [14600, 39850, 2300],
        white_point_x: 15635,
        white_point_y: 16450,
        max_display_mastering_luminance: 10_000_000,
        min_display_mastering_luminance: 50,
    };
    let light_level = SeiContentLightLevel {
        max_content_light_level: 1000,
        max_pic_average_light_level: 400,
    };

    let mut ctx = Ctx::new();
    ctx.set_nalu_header(&NaluHeader {
        forbidden_zero_bit: false,
        nal_unit_type: NaluType::PrefixSeiNut,
        nuh_layer_id: 0,
        nuh_temporal_id_plus1: 1,
    });
    ctx.add_sei(&Sei::new(SeiPayload::UserDataUnregistered(user_data.clone())))
        .unwrap();
    ctx.add_sei(&Sei::new(SeiPayload::RecoveryPoint(recovery.clone())))
        .unwrap();
    ctx.add_sei(&Sei::new(SeiPayload::TimeCode(time_code.clone())))
        .unwrap();
    ctx.add_sei(&Sei::new(SeiPayload::MasteringDisplayColourVolume(
        mastering.clone(),
    )))
    .unwrap();
    ctx.add_sei(&Sei::new(SeiPayload::ContentLightLevel(light_level.clone())))
        .unwrap();

    let nalu = nalu_to_bytes(&ctx).unwrap();

    let mut reader = Reader::new(Recorder::default());
    reader.parse_nalu(ReaderFlags::empty(), &nalu).unwrap();

    let seis = reader.ctx().seis();
    assert_eq!(seis.len(), 5);
    assert_eq!(
        seis[0].payload,
        SeiPayload::UserDataUnregistered(user_data.clone())
    );
    assert_eq!(seis[1].payload, SeiPayload::RecoveryPoint(recovery.clone()));
    assert_eq!(seis[2].payload, SeiPayload::TimeCode(time_code.clone()));
    assert_eq!(
        seis[3].payload,
        SeiPayload::MasteringDisplayColourVolume(mastering.clone())
    );
    assert_eq!(seis[4].payload, SeiPayload::ContentLightLevel(light_level));

    // One generic callback per message, then the typed one.
    let generic = reader
        .handler()
        .events
        .iter()
        .filter(|e| matches!(e, Event::Sei(_)))
        .count();
    assert_eq!(generic, 5);
    assert_eq!(reader.handler().typed_seis.len(), 5);
    assert_eq!(
        reader.handler().typed_seis[1],
        SeiPayload::RecoveryPoint(recovery)
    );
}

#[test]
fn unknown_sei_payload_is_preserved_raw() {
    let payload = Bytes::from_static(&[0xDE, 0xAD, 0xBE, 0xEF]);
    let mut ctx = Ctx::new();
    ctx.set_nalu_header(&NaluHeader {
        forbidden_zero_bit: false,
        nal_unit_type: NaluType::PrefixSeiNut,
        nuh_layer_id: 0,
        nuh_temporal_id_plus1: 1,
    });
    ctx.add_sei(&Sei {
        payload: SeiPayload::Raw(1),
        raw: payload.clone(),
    })
    .unwrap();

    let nalu = nalu_to_bytes(&ctx).unwrap();

    let mut reader = Reader::new(Recorder::default());
    reader.parse_nalu(ReaderFlags::empty(), &nalu).unwrap();

    let seis = reader.ctx().seis();
    assert_eq!(seis.len(), 1);
    assert_eq!(seis[0].payload, SeiPayload::Raw(1));
    assert_eq!(seis[0].raw, payload);
}

#[test]
fn empty_raw_sei_is_rejected() {
    let mut ctx = Ctx::new();
    assert!(matches!(
        ctx.add_sei(&Sei {
            payload: SeiPayload::Raw(42),
            raw: Bytes::new(),
        }),
        Err(Error::InvalidArgument(_))
    ));
    assert_eq!(ctx.sei_count(), 0);
}

fn ctx_with_timing(num_units_in_tick: u32, time_scale: u32) -> Ctx {
    let mut sps = Sps::default();
    sps.vui_parameters_present_flag = true;
    sps.vui.vui_timing_info_present_flag = true;
    sps.vui.vui_num_units_in_tick = num_units_in_tick;
    sps.vui.vui_time_scale = time_scale;

    let mut ctx = Ctx::new();
    ctx.set_sps(&sps).unwrap();
    ctx
}

#[test]
fn time_code_conversion() {
    let ctx = ctx_with_timing(1001, 60000);

    let mut tc = SeiTimeCode {
        num_clock_ts: 1,
        ..Default::default()
    };
    tc.clock_ts[0].hours_value = 1;

    assert_eq!(ctx.sei_time_code_to_ts(&tc).unwrap(), 216_000_000);
    assert_eq!(ctx.sei_time_code_to_us(&tc).unwrap(), 3_600_000_000);
}

#[test]
fn time_code_offset_clamps_at_zero() {
    let ctx = ctx_with_timing(1001, 60000);

    let mut tc = SeiTimeCode {
        num_clock_ts: 1,
        ..Default::default()
    };
    tc.clock_ts[0].seconds_value = 1;
    tc.clock_ts[0].time_offset_value = -1_000_000;

    assert_eq!(ctx.sei_time_code_to_ts(&tc).unwrap(), 0);
}

#[test]
fn time_code_requires_timing_info() {
    let mut ctx = Ctx::new();
    let tc = SeiTimeCode::default();
    assert!(matches!(
        ctx.sei_time_code_to_ts(&tc),
        Err(Error::MissingParameterSets)
    ));

    ctx.set_sps(&Sps::default()).unwrap();
    assert!(matches!(
        ctx.sei_time_code_to_ts(&tc),
        Err(Error::Protocol(_))
    ));
}

#[test]
fn info_from_context() {
    let mut reader = Reader::new(Recorder::default());
    let stream = annex_b(&[VPS_2560, SPS_2560, PPS_2560]);
    let mut off = 0;
    reader
        .parse(ReaderFlags::empty(), &stream, &mut off)
        .unwrap();

    let info = reader.ctx().info().unwrap();
    assert_eq!(info.width, 2560);
    assert_eq!(info.height, 1440);
    assert_eq!(info.crop_width, 2560);
    assert_eq!(info.crop_height, 1440);
    assert_eq!(info.bit_depth_luma, 8);
    assert_eq!(info.sar_width, 1);
    assert_eq!(info.sar_height, 1);
    assert_eq!(info.num_units_in_tick, 1);
    assert_eq!(info.time_scale, 144);
    assert_eq!(info.framerate, 144.0);
    assert_eq!(info.framerate_num, 144);
    assert_eq!(info.framerate_den, 1);
    assert!(info.colour_description_present);
    assert_eq!(info.colour_primaries, 1);
    assert_eq!(info.transfer_characteristics, 1);
    assert_eq!(info.matrix_coefficients, 1);
}

#[test]
fn info_requires_all_three_parameter_sets() {
    let mut ctx = Ctx::new();
    assert!(matches!(ctx.info(), Err(Error::MissingParameterSets)));

    ctx.set_vps(&Vps::parse(VPS_2560).unwrap()).unwrap();
    ctx.set_sps(&Sps::parse(SPS_2560).unwrap()).unwrap();
    assert!(matches!(ctx.info(), Err(Error::MissingParameterSets)));

    ctx.set_pps(&Pps::parse(PPS_2560).unwrap()).unwrap();
    assert!(ctx.info().is_ok());
}

#[test]
fn get_info_from_buffers() {
    let info = get_info(VPS_2560, SPS_2560, PPS_2560).unwrap();
    assert_eq!(info.width, 2560);
    assert_eq!(info.height, 1440);
    assert_eq!(info.framerate, 144.0);
}

#[test]
fn pps_comparison() {
    let a = Pps::parse(PPS_2560).unwrap();
    let b = Pps::parse(PPS_2560).unwrap();
    assert_eq!(a, b);

    let mut c = b.clone();
    c.init_qp_minus26 += 1;
    assert_ne!(a, c);

    let mut d = b.clone();
    d.column_width_minus1 = vec![1];
    assert_ne!(a, d);
}

#[test]
fn parameter_set_id_slots() {
    let mut ctx = Ctx::new();

    let mut vps = Vps::parse(VPS_2560).unwrap();
    vps.vps_video_parameter_set_id = 16;
    assert!(matches!(
        ctx.set_vps(&vps),
        Err(Error::InvalidArgument(_))
    ));

    vps.vps_video_parameter_set_id = 3;
    ctx.set_vps(&vps).unwrap();
    assert_eq!(ctx.vps().unwrap().vps_video_parameter_set_id, 3);

    // Installing a second set at the same slot replaces the first.
    let mut replacement = vps.clone();
    replacement.vps_max_layers_minus1 = 1;
    ctx.set_vps(&replacement).unwrap();
    assert_eq!(ctx.vps().unwrap().vps_max_layers_minus1, 1);
}

#[test]
fn clear_nalu_keeps_parameter_sets() {
    let mut ctx = Ctx::new();
    ctx.set_sps(&Sps::parse(SPS_2560).unwrap()).unwrap();
    ctx.add_sei(&Sei::new(SeiPayload::ContentLightLevel(
        SeiContentLightLevel::default(),
    )))
    .unwrap();

    ctx.clear_nalu();
    assert_eq!(ctx.sei_count(), 0);
    assert!(ctx.sps().is_some());
}

#[test]
fn dump_sps() {
    let mut reader = Reader::new(Recorder::default());
    reader.parse_nalu(ReaderFlags::empty(), SPS_2560).unwrap();

    let mut dump = Dump::new();
    dump.dump_nalu(reader.ctx()).unwrap();

    let json = dump.json();
    assert_eq!(json["nalu_header"]["nal_unit_type"], 33);
    assert_eq!(json["sps"]["pic_width_in_luma_samples"], 2560);
    assert_eq!(json["sps"]["pic_height_in_luma_samples"], 1440);
    assert_eq!(json["sps"]["vui"]["vui_time_scale"], 144);
    assert_eq!(json["sps"]["profile_tier_level"]["level_idc"], 153);
}

#[test]
fn dump_aud() {
    let mut reader = Reader::new(Recorder::default());
    reader
        .parse_nalu(ReaderFlags::empty(), &[0x46, 0x01, 0x50])
        .unwrap();

    let mut dump = Dump::new();
    dump.dump_nalu(reader.ctx()).unwrap();

    assert_eq!(dump.json()["aud"]["pic_type"], 2);
    assert!(dump.to_json_string().contains("\"pic_type\":2"));
}

#[test]
fn dump_is_a_function_of_the_input_alone() {
    let mut reader = Reader::new(Recorder::default());
    reader.parse_nalu(ReaderFlags::empty(), SPS_2560).unwrap();

    let mut dump = Dump::new();
    dump.dump_nalu(reader.ctx()).unwrap();
    let first = dump.to_json_string();

    dump.dump_nalu(reader.ctx()).unwrap();
    assert_eq!(dump.to_json_string(), first);
}

#[test]
fn lenient_trailing_bits_flag() {
    // An AUD whose stop bit is 0: strict parsing fails, lenient parsing
    // accepts it.
    let corrupted = [0x46, 0x01, 0x40];

    let mut reader = Reader::new(Recorder::default());
    assert!(matches!(
        reader.parse_nalu(ReaderFlags::empty(), &corrupted),
        Err(Error::Protocol(_))
    ));

    reader
        .parse_nalu(ReaderFlags::LENIENT_RBSP_TRAILING, &corrupted)
        .unwrap();
    assert_eq!(reader.ctx().aud().pic_type, 2);
}

#[test]
fn stop_breaks_the_parse_loop() {
    #[derive(Default)]
    struct StopAfterFirst {
        nalus: usize,
    }

    impl NaluHandler for StopAfterFirst {
        fn nalu_end(&mut self, _ctx: &Ctx, _ty: NaluType, _buf: &[u8]) {
            self.nalus += 1;
        }

        fn should_stop(&mut self) -> bool {
            self.nalus > 0
        }
    }

    let stream = annex_b(&[VPS_2560, SPS_2560, PPS_2560]);
    let mut reader = Reader::new(StopAfterFirst::default());
    let mut off = 0;
    reader
        .parse(ReaderFlags::empty(), &stream, &mut off)
        .unwrap();

    assert_eq!(reader.handler().nalus, 1);
    assert!(off < stream.len());
    assert!(reader.ctx().sps().is_none());
}

#[test]
fn sar_round_trip() {
    assert_eq!(sar_to_aspect_ratio_idc(16, 11), AspectRatioIdc::Aspect16_11);
    assert_eq!(sar_to_aspect_ratio_idc(5, 4), AspectRatioIdc::ExtendedSar);
}
