use crate::plugin::OptionSet;
use std::fmt;

/// Codec name ffprobe reports for streams that need no work.
pub const TARGET_CODEC: &str = "av1";
pub const VIDEO_ENCODER: &str = "libsvtav1";
pub const PIXEL_FORMAT: &str = "yuv420p10le";
/// Host placeholder that separates input options from output options.
pub const IO_PLACEHOLDER: &str = "<io>";
/// SVT-AV1-HDR's PQ-optimized variance boost curve.
pub const HDR_VARIANCE_BOOST_CURVE: u8 = 3;

pub const HDR_COLOR_PRIMARIES: &str = "bt2020";
pub const HDR_COLOR_TRANSFER: &str = "smpte2084";
pub const HDR_COLORSPACE: &str = "bt2020nc";

/// One element of the encoder argument list, e.g. `-crf 35`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncoderArg {
    IoPlaceholder,
    Flag { flag: &'static str, value: String },
    /// Rendered with the value in double quotes.
    Quoted { flag: &'static str, value: String },
}

impl EncoderArg {
    pub fn flag<V: Into<String>>(flag: &'static str, value: V) -> Self {
        Self::Flag {
            flag,
            value: value.into(),
        }
    }

    pub fn quoted<V: Into<String>>(flag: &'static str, value: V) -> Self {
        Self::Quoted {
            flag,
            value: value.into(),
        }
    }

    pub fn is_io_placeholder(&self) -> bool {
        matches!(self, Self::IoPlaceholder)
    }

    /// Process arguments for this element, without shell quoting.
    pub fn argv(&self) -> Vec<String> {
        match self {
            Self::IoPlaceholder => Vec::new(),
            Self::Flag { flag, value } | Self::Quoted { flag, value } => {
                vec![flag.to_string(), value.clone()]
            }
        }
    }
}

impl fmt::Display for EncoderArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoPlaceholder => f.write_str(IO_PLACEHOLDER),
            Self::Flag { flag, value } => write!(f, "{} {}", flag, value),
            Self::Quoted { flag, value } => write!(f, "{} \"{}\"", flag, value),
        }
    }
}

/// `key=value` pairs for `-svtav1-params`, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvtParams {
    params: Vec<(&'static str, String)>,
}

impl SvtParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<V: ToString>(&mut self, key: &'static str, value: V) {
        self.params.push((key, value.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl fmt::Display for SvtParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self
            .params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        f.write_str(&joined.join(":"))
    }
}

/// Encoder-private parameters: the tune always, the variance boost curve for
/// HDR sources or when the user forces it.
pub fn svt_params(options: &OptionSet, is_hdr: bool) -> SvtParams {
    let mut params = SvtParams::new();
    params.push("tune", options.tune);

    if is_hdr || options.enable_hdr_curve {
        params.push("variance-boost-curve", HDR_VARIANCE_BOOST_CURVE);
    }

    params
}

/// Builds the argument list in the order the encoder expects it.
///
/// HDR colour tags follow the classification only; forcing the curve on an SDR
/// source does not retag it.
pub fn assemble_arguments(options: &OptionSet, is_hdr: bool) -> Vec<EncoderArg> {
    let mut args = vec![
        EncoderArg::IoPlaceholder,
        EncoderArg::flag("-c:v", VIDEO_ENCODER),
        EncoderArg::flag("-crf", options.crf.to_string()),
        EncoderArg::flag("-preset", options.preset.to_string()),
        EncoderArg::flag("-pix_fmt", PIXEL_FORMAT),
    ];

    let params = svt_params(options, is_hdr);
    if !params.is_empty() {
        args.push(EncoderArg::quoted("-svtav1-params", params.to_string()));
    }

    if is_hdr {
        args.push(EncoderArg::flag("-color_primaries", HDR_COLOR_PRIMARIES));
        args.push(EncoderArg::flag("-color_trc", HDR_COLOR_TRANSFER));
        args.push(EncoderArg::flag("-colorspace", HDR_COLORSPACE));
    }

    args.push(EncoderArg::flag("-c:a", options.audio_codec.as_str()));

    if options.container.supports_subtitle_copy() {
        args.push(EncoderArg::flag("-c:s", "copy"));
    }

    args.push(EncoderArg::flag("-map", "0"));
    args
}

/// Single-space join, the form the host substitutes into its command template.
pub fn join_arguments(args: &[EncoderArg]) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
