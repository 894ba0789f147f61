use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::Path;
use svt_av1_hdr_planner::{
    decide, details, EncoderCommand, HostResponse, MediaDescriptor, MediumKind, RawOptions,
};

fn hdr10_file_record() -> serde_json::Value {
    json!({
        "fileMedium": "video",
        "ffProbeData": {
            "streams": [
                {
                    "index": 0,
                    "codec_type": "video",
                    "codec_name": "hevc",
                    "color_transfer": "smpte2084",
                    "color_primaries": "bt2020",
                    "side_data_list": [
                        { "side_data_type": "Mastering display metadata" }
                    ]
                },
                { "index": 1, "codec_type": "audio", "codec_name": "truehd" },
                { "index": 2, "codec_type": "subtitle", "codec_name": "hdmv_pgs_subtitle" }
            ]
        }
    })
}

#[test]
fn host_record_to_response() {
    let media = MediaDescriptor::from_host_file(&hdr10_file_record()).unwrap();
    let options = RawOptions::from_value(&json!({
        "tune": "4",
        "crf": "28",
        "preset": "2",
        "enable_hdr_curve": "false",
        "container": "mkv",
        "audio_codec": "copy"
    }))
    .unwrap();

    let decision = decide(&media, &options);
    let response = serde_json::to_value(HostResponse::from(&decision)).unwrap();

    assert_eq!(response["processFile"], json!(true));
    assert_eq!(response["container"], json!(".mkv"));
    assert_eq!(response["FFmpegMode"], json!(true));
    assert_eq!(
        response["preset"],
        json!(
            "<io> -c:v libsvtav1 -crf 28 -preset 2 -pix_fmt yuv420p10le \
             -svtav1-params \"tune=4:variance-boost-curve=3\" -color_primaries bt2020 \
             -color_trc smpte2084 -colorspace bt2020nc -c:a copy -c:s copy -map 0"
        )
    );
    assert_eq!(
        response["FFmpegPath"],
        json!("/opt/ffmpeg-svt-av1-hdr/bin/ffmpeg")
    );

    let info_log = response["infoLog"].as_str().unwrap();
    assert!(info_log.contains("Tune=Film Grain, CRF=28, Preset=2"));
    assert!(info_log.ends_with('\n'));
}

#[test]
fn sdr_mp4_renders_full_command() {
    let probe = json!({
        "streams": [
            { "codec_type": "video", "codec_name": "h264", "color_transfer": "bt709" },
            { "codec_type": "audio", "codec_name": "ac3" },
            { "codec_type": "subtitle", "codec_name": "mov_text" }
        ]
    });
    let media = MediaDescriptor::from_probe_json(MediumKind::Video, &probe).unwrap();
    let options = RawOptions::new()
        .with("container", "mp4")
        .with("audio_codec", "opus")
        .with("ffmpeg_path", "/usr/local/bin/ffmpeg");

    let decision = decide(&media, &options);
    assert!(decision.should_process);
    assert!(!decision.is_hdr);

    let command = EncoderCommand::from_decision(
        &decision,
        Path::new("/media/in.mkv"),
        Path::new("/media/out.mp4"),
    )
    .unwrap();

    assert_eq!(command.program(), "/usr/local/bin/ffmpeg");
    assert_eq!(&command.args()[..2], &["-i".to_string(), "/media/in.mkv".to_string()]);
    assert_eq!(command.args().last().map(String::as_str), Some("/media/out.mp4"));
    assert!(!command.args().iter().any(|arg| arg == "-c:s"));
    assert!(command.args().iter().any(|arg| arg == "tune=0"));
    assert!(!command.shell_line().unwrap().contains("variance-boost-curve"));
}

#[test]
fn av1_and_audio_inputs_pass_through() {
    let av1 = MediaDescriptor::from_probe_json(
        MediumKind::Video,
        &json!({ "streams": [{ "codec_type": "video", "codec_name": "av1" }] }),
    )
    .unwrap();
    let audio = MediaDescriptor::from_host_file(&json!({ "fileMedium": "audio" })).unwrap();

    for media in [av1, audio] {
        let decision = decide(&media, &RawOptions::new());
        let response = HostResponse::from(&decision);
        assert!(!response.process_file);
        assert_eq!(response.preset, "");
        assert_eq!(response.ffmpeg_path, None);
        assert!(EncoderCommand::from_decision(&decision, "in", "out").is_err());
    }
}

#[test]
fn schema_lists_every_option() {
    let names: Vec<_> = details().inputs.iter().map(|spec| spec.name).collect();
    assert_eq!(
        names,
        vec![
            "tune",
            "crf",
            "preset",
            "enable_hdr_curve",
            "container",
            "audio_codec",
            "ffmpeg_path"
        ]
    );
}
