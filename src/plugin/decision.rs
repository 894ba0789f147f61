use super::options::{resolve_options, OptionSet, RawOptions};
use crate::encoding::{assemble_arguments, join_arguments, EncoderArg, TARGET_CODEC};
use crate::hdr::detect_hdr_signal;
use crate::media::{MediaDescriptor, MediumKind};
use serde::Serialize;
use tracing::{debug, info};

/// Outcome of one planning call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionResult {
    pub should_process: bool,
    /// `.` followed by the resolved container.
    pub output_extension: String,
    pub encoder_arguments: Vec<EncoderArg>,
    /// Encoder binary to run instead of the host's default. Set only when processing.
    pub encoder_path_override: Option<String>,
    pub is_hdr: bool,
    pub log: Vec<String>,
}

impl DecisionResult {
    fn skip(output_extension: String, log: Vec<String>) -> Self {
        Self {
            should_process: false,
            output_extension,
            encoder_arguments: Vec::new(),
            encoder_path_override: None,
            is_hdr: false,
            log,
        }
    }

    /// Arguments joined with single spaces.
    pub fn arguments(&self) -> String {
        join_arguments(&self.encoder_arguments)
    }

    pub fn argument_tokens(&self) -> Vec<String> {
        self.encoder_arguments.iter().map(ToString::to_string).collect()
    }

    pub fn summary(&self) -> DecisionSummary<'_> {
        DecisionSummary {
            should_process: self.should_process,
            is_hdr: self.is_hdr,
            output_extension: &self.output_extension,
            arguments: self.arguments(),
            encoder_path: self.encoder_path_override.as_deref(),
            log: &self.log,
        }
    }
}

/// Serializable view of a [`DecisionResult`] for the CLI's JSON output.
#[derive(Debug, Serialize)]
pub struct DecisionSummary<'a> {
    pub should_process: bool,
    pub is_hdr: bool,
    pub output_extension: &'a str,
    pub arguments: String,
    pub encoder_path: Option<&'a str>,
    pub log: &'a [String],
}

/// Decides whether `media` should be re-encoded to AV1 and how.
///
/// Never fails: anything that rules the file out is reported through
/// `should_process = false` and a log line. Options that cannot be used are
/// replaced by their defaults and noted in the log.
pub fn decide(media: &MediaDescriptor, raw_options: &RawOptions) -> DecisionResult {
    let resolved = resolve_options(raw_options);
    let mut log: Vec<String> = resolved
        .warnings
        .iter()
        .map(|warning| format!("☐ {}", warning))
        .collect();

    plan(media, &resolved.options, &mut log)
}

/// Same as [`decide`] for callers that already hold resolved options.
pub fn decide_resolved(media: &MediaDescriptor, options: &OptionSet) -> DecisionResult {
    let mut log = Vec::new();
    plan(media, options, &mut log)
}

fn plan(media: &MediaDescriptor, options: &OptionSet, log: &mut Vec<String>) -> DecisionResult {
    let output_extension = options.container.extension();

    if media.medium_kind != MediumKind::Video {
        info!("Skipping: file is not a video ({})", media.medium_kind.as_str());
        log.push("☒ File is not a video. Skipping.".to_string());
        return DecisionResult::skip(output_extension, std::mem::take(log));
    }

    let Some(video_stream) = media.primary_video_stream() else {
        info!("Skipping: no video stream among {} stream(s)", media.streams.len());
        log.push("☒ File has no video stream. Skipping.".to_string());
        return DecisionResult::skip(output_extension, std::mem::take(log));
    };

    if video_stream.codec_name == TARGET_CODEC {
        info!("Skipping: video stream is already {}", TARGET_CODEC);
        log.push("☑ Video is already AV1. Skipping.".to_string());
        return DecisionResult::skip(output_extension, std::mem::take(log));
    }

    log.push(format!(
        "☒ Video codec is {}, will encode to AV1 with SVT-AV1-HDR.",
        display_codec(&video_stream.codec_name)
    ));

    let hdr_signal = detect_hdr_signal(video_stream);
    let is_hdr = hdr_signal.is_some();
    match &hdr_signal {
        Some(signal) => {
            info!("HDR content detected via {}", signal);
            log.push(format!(
                "☑ HDR content detected ({}). Will use HDR-optimized settings.",
                signal
            ));
        }
        None => {
            debug!("No HDR indicators on {} stream", video_stream.codec_name);
            log.push("☐ SDR content detected.".to_string());
        }
    }

    log.push(format!(
        "☑ Settings: Tune={}, CRF={}, Preset={}",
        options.tune.label(),
        options.crf,
        options.preset
    ));

    if is_hdr || options.enable_hdr_curve {
        let reason = if is_hdr { "HDR source" } else { "forced by option" };
        log.push(format!("☑ PQ variance boost curve enabled ({}).", reason));
    }

    let encoder_arguments = assemble_arguments(options, is_hdr);

    log.push("☑ Will process with SVT-AV1-HDR encoder.".to_string());
    log.push(format!("☑ FFmpeg: {}", options.encoder_path));

    info!(
        "Decision: transcode {} to AV1 ({}, {})",
        video_stream.codec_name,
        if is_hdr { "HDR" } else { "SDR" },
        output_extension
    );

    DecisionResult {
        should_process: true,
        output_extension,
        encoder_arguments,
        encoder_path_override: Some(options.encoder_path.clone()),
        is_hdr,
        log: std::mem::take(log),
    }
}

fn display_codec(codec_name: &str) -> &str {
    if codec_name.is_empty() {
        "unknown"
    } else {
        codec_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{SideDataEntry, StreamInfo};
    use crate::plugin::Container;
    use pretty_assertions::assert_eq;

    fn h264_hdr10() -> MediaDescriptor {
        MediaDescriptor::video(vec![
            StreamInfo::video("h264").with_color_transfer("smpte2084"),
            StreamInfo::audio("eac3"),
            StreamInfo::subtitle("subrip"),
        ])
    }

    fn sdr(codec: &str) -> MediaDescriptor {
        MediaDescriptor::video(vec![StreamInfo::video(codec)
            .with_color_transfer("bt709")
            .with_color_primaries("bt709")])
    }

    fn log_mentions(result: &DecisionResult, needle: &str) -> bool {
        result
            .log
            .iter()
            .any(|line| line.to_lowercase().contains(needle))
    }

    #[test]
    fn test_non_video_medium_is_skipped() {
        for medium in [MediumKind::Audio, MediumKind::Other] {
            let media = MediaDescriptor::new(medium, vec![StreamInfo::video("h264")]);
            let result = decide(&media, &RawOptions::new());

            assert!(!result.should_process);
            assert!(log_mentions(&result, "not a video"));
            assert!(result.encoder_arguments.is_empty());
            assert_eq!(result.encoder_path_override, None);
        }
    }

    #[test]
    fn test_video_without_video_stream_is_skipped() {
        let media = MediaDescriptor::video(vec![
            StreamInfo::audio("aac"),
            StreamInfo::subtitle("mov_text"),
        ]);
        let result = decide(&media, &RawOptions::new());

        assert!(!result.should_process);
        assert!(log_mentions(&result, "no video stream"));
    }

    #[test]
    fn test_av1_source_is_skipped_regardless_of_hdr() {
        let media = MediaDescriptor::video(vec![StreamInfo::video("av1")
            .with_color_transfer("smpte2084")
            .with_side_data(SideDataEntry::labelled("Mastering display metadata"))]);
        let result = decide(&media, &RawOptions::new().with("enable_hdr_curve", true));

        assert!(!result.should_process);
        assert!(log_mentions(&result, "already av1"));
        assert!(!result.is_hdr);
    }

    #[test]
    fn test_only_first_video_stream_is_considered() {
        let media = MediaDescriptor::video(vec![
            StreamInfo::audio("aac"),
            StreamInfo::video("av1"),
            StreamInfo::video("h264").with_color_transfer("smpte2084"),
        ]);
        assert!(!decide(&media, &RawOptions::new()).should_process);
    }

    #[test]
    fn test_hdr10_example() {
        let options = RawOptions::new()
            .with("tune", "0")
            .with("crf", 35)
            .with("preset", "4")
            .with("container", "mkv")
            .with("audio_codec", "copy");
        let result = decide(&h264_hdr10(), &options);

        assert!(result.should_process);
        assert!(result.is_hdr);
        assert_eq!(result.output_extension, ".mkv");
        assert_eq!(
            result.encoder_path_override.as_deref(),
            Some("/opt/ffmpeg-svt-av1-hdr/bin/ffmpeg")
        );

        let args = result.arguments();
        assert!(args.contains("-svtav1-params \"tune=0:variance-boost-curve=3\""));
        assert!(args.contains("-color_primaries bt2020"));
        assert!(args.contains("-c:s copy"));
        assert!(args.ends_with("-map 0"));
        assert_eq!(
            args,
            "<io> -c:v libsvtav1 -crf 35 -preset 4 -pix_fmt yuv420p10le \
             -svtav1-params \"tune=0:variance-boost-curve=3\" -color_primaries bt2020 \
             -color_trc smpte2084 -colorspace bt2020nc -c:a copy -c:s copy -map 0"
        );
    }

    #[test]
    fn test_sdr_source_has_no_curve_or_color_tags() {
        let result = decide(&sdr("mpeg4"), &RawOptions::new());
        let tokens = result.argument_tokens();

        assert!(result.should_process);
        assert!(!result.is_hdr);
        assert!(tokens.contains(&"-svtav1-params \"tune=0\"".to_string()));
        assert!(!tokens.iter().any(|t| t.starts_with("-color")));
        assert!(log_mentions(&result, "sdr content detected"));
    }

    #[test]
    fn test_forced_curve_on_sdr_keeps_color_tags_off() {
        let result = decide(&sdr("h264"), &RawOptions::new().with("enable_hdr_curve", "true"));
        let tokens = result.argument_tokens();

        assert!(tokens.contains(&"-svtav1-params \"tune=0:variance-boost-curve=3\"".to_string()));
        assert!(!tokens.iter().any(|t| t.starts_with("-color_primaries")));
        assert!(!tokens.iter().any(|t| t.starts_with("-color_trc")));
        assert!(!tokens.iter().any(|t| t.starts_with("-colorspace")));
        assert!(log_mentions(&result, "forced by option"));
    }

    #[test]
    fn test_subtitle_copy_only_for_mkv() {
        for (container, expected) in [("mkv", true), ("mp4", false), ("webm", false)] {
            let result = decide(&sdr("h264"), &RawOptions::new().with("container", container));
            let has_subs = result.argument_tokens().contains(&"-c:s copy".to_string());

            assert_eq!(has_subs, expected, "container {}", container);
            assert_eq!(result.output_extension, format!(".{}", container));
        }
    }

    #[test]
    fn test_decide_is_idempotent() {
        let options = RawOptions::new().with("tune", "4").with("crf", "22");
        let first = decide(&h264_hdr10(), &options);
        let second = decide(&h264_hdr10(), &options);

        assert_eq!(first.arguments(), second.arguments());
        assert_eq!(first.output_extension, second.output_extension);
        assert_eq!(first.log, second.log);
    }

    #[test]
    fn test_settings_line_and_tail() {
        let result = decide(
            &sdr("hevc"),
            &RawOptions::new()
                .with("tune", "4")
                .with("crf", 20)
                .with("preset", "2")
                .with("ffmpeg_path", "/usr/bin/ffmpeg"),
        );

        assert!(result
            .log
            .contains(&"☑ Settings: Tune=Film Grain, CRF=20, Preset=2".to_string()));
        assert_eq!(result.log.last().unwrap(), "☑ FFmpeg: /usr/bin/ffmpeg");
        assert_eq!(result.encoder_path_override.as_deref(), Some("/usr/bin/ffmpeg"));
    }

    #[test]
    fn test_invalid_options_are_logged_first() {
        let result = decide(&sdr("h264"), &RawOptions::new().with("crf", "high"));
        assert!(result.should_process);
        assert!(result.log[0].starts_with("☐ Option 'crf'"));
        assert!(result.arguments().contains("-crf 35"));
    }

    #[test]
    fn test_skip_still_reports_container_extension() {
        let media = MediaDescriptor::new(MediumKind::Audio, Vec::new());
        let result = decide(&media, &RawOptions::new().with("container", "webm"));
        assert_eq!(result.output_extension, ".webm");
    }

    #[test]
    fn test_decide_resolved_matches_decide() {
        let options = OptionSet {
            container: Container::Mp4,
            ..OptionSet::default()
        };
        let typed = decide_resolved(&h264_hdr10(), &options);
        let raw = decide(&h264_hdr10(), &RawOptions::new().with("container", "mp4"));
        assert_eq!(typed, raw);
    }
}
