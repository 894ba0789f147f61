//! Static plugin metadata the host renders into its configuration UI.
//!
//! Nothing in here takes part in a decision; the resolver in
//! [`super::options`] only shares the default constants.

use serde::Serialize;
use std::fmt;

pub const OPT_TUNE: &str = "tune";
pub const OPT_CRF: &str = "crf";
pub const OPT_PRESET: &str = "preset";
pub const OPT_ENABLE_HDR_CURVE: &str = "enable_hdr_curve";
pub const OPT_CONTAINER: &str = "container";
pub const OPT_AUDIO_CODEC: &str = "audio_codec";
pub const OPT_FFMPEG_PATH: &str = "ffmpeg_path";

pub const DEFAULT_TUNE: &str = "0";
pub const DEFAULT_CRF: u8 = 35;
pub const DEFAULT_PRESET: u8 = 4;
/// The dropdown carries presets as text.
pub const DEFAULT_PRESET_TEXT: &str = "4";
pub const DEFAULT_ENABLE_HDR_CURVE: bool = false;
pub const DEFAULT_CONTAINER: &str = "mkv";
pub const DEFAULT_AUDIO_CODEC: &str = "copy";
pub const DEFAULT_FFMPEG_PATH: &str = "/opt/ffmpeg-svt-av1-hdr/bin/ffmpeg";

pub const TUNE_CHOICES: &[&str] = &["0", "4"];
pub const PRESET_CHOICES: &[&str] = &[
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12",
];
pub const BOOLEAN_CHOICES: &[&str] = &["false", "true"];
pub const CONTAINER_CHOICES: &[&str] = &["mkv", "mp4", "webm"];
pub const AUDIO_CODEC_CHOICES: &[&str] = &["copy", "aac", "opus", "flac"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    String,
    Number,
    Boolean,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionDefault {
    Text(&'static str),
    Number(u8),
    Flag(bool),
}

impl fmt::Display for OptionDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{}", n),
            Self::Flag(flag) => write!(f, "{}", flag),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputUi {
    Dropdown { options: &'static [&'static str] },
    Text,
}

impl InputUi {
    pub fn choices(&self) -> &'static [&'static str] {
        match self {
            Self::Dropdown { options } => *options,
            Self::Text => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: OptionType,
    pub default_value: OptionDefault,
    #[serde(rename = "inputUI")]
    pub input_ui: InputUi,
    pub tooltip: &'static str,
}

pub const OPTION_SCHEMA: &[OptionSpec] = &[
    OptionSpec {
        name: OPT_TUNE,
        kind: OptionType::String,
        default_value: OptionDefault::Text(DEFAULT_TUNE),
        input_ui: InputUi::Dropdown {
            options: TUNE_CHOICES,
        },
        tooltip: "Tuning mode. 0=VQ (Visual Quality, recommended), 4=Film Grain (for grainy content, use preset 2).",
    },
    OptionSpec {
        name: OPT_CRF,
        kind: OptionType::Number,
        default_value: OptionDefault::Number(DEFAULT_CRF),
        input_ui: InputUi::Text,
        tooltip: "CRF value (quality). Lower = better quality, larger file. Recommended: 20-40 for film grain tune, 30-38 for VQ.",
    },
    OptionSpec {
        name: OPT_PRESET,
        kind: OptionType::String,
        default_value: OptionDefault::Text(DEFAULT_PRESET_TEXT),
        input_ui: InputUi::Dropdown {
            options: PRESET_CHOICES,
        },
        tooltip: "Encoding preset. Lower = slower/better quality. 2-6 recommended for VQ, 2 highly recommended for Film Grain.",
    },
    OptionSpec {
        name: OPT_ENABLE_HDR_CURVE,
        kind: OptionType::Boolean,
        default_value: OptionDefault::Flag(DEFAULT_ENABLE_HDR_CURVE),
        input_ui: InputUi::Dropdown {
            options: BOOLEAN_CHOICES,
        },
        tooltip: "Enable PQ-optimized variance boost curve (curve 3). Always enabled when HDR is detected.",
    },
    OptionSpec {
        name: OPT_CONTAINER,
        kind: OptionType::String,
        default_value: OptionDefault::Text(DEFAULT_CONTAINER),
        input_ui: InputUi::Dropdown {
            options: CONTAINER_CHOICES,
        },
        tooltip: "Output container format.",
    },
    OptionSpec {
        name: OPT_AUDIO_CODEC,
        kind: OptionType::String,
        default_value: OptionDefault::Text(DEFAULT_AUDIO_CODEC),
        input_ui: InputUi::Dropdown {
            options: AUDIO_CODEC_CHOICES,
        },
        tooltip: "Audio codec. Use \"copy\" to preserve original audio.",
    },
    OptionSpec {
        name: OPT_FFMPEG_PATH,
        kind: OptionType::String,
        default_value: OptionDefault::Text(DEFAULT_FFMPEG_PATH),
        input_ui: InputUi::Text,
        tooltip: "Path to an FFmpeg build with SVT-AV1-HDR support.",
    },
];

pub fn option_spec(name: &str) -> Option<&'static OptionSpec> {
    OPTION_SCHEMA.iter().find(|spec| spec.name == name)
}

/// Plugin identity plus the option schema, in the host's field naming.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PluginDetails {
    pub id: &'static str,
    #[serde(rename = "Stage")]
    pub stage: &'static str,
    #[serde(rename = "Name")]
    pub name: &'static str,
    #[serde(rename = "Type")]
    pub kind: &'static str,
    #[serde(rename = "Operation")]
    pub operation: &'static str,
    #[serde(rename = "Description")]
    pub description: &'static str,
    #[serde(rename = "Version")]
    pub version: &'static str,
    #[serde(rename = "Tags")]
    pub tags: &'static str,
    #[serde(rename = "Inputs")]
    pub inputs: &'static [OptionSpec],
}

pub static PLUGIN_DETAILS: PluginDetails = PluginDetails {
    id: "Tdarr_Plugin_SVT_AV1_HDR",
    stage: "Pre-processing",
    name: "SVT-AV1-HDR Encoder",
    kind: "Video",
    operation: "Transcode",
    description: "Encode video to AV1 using an FFmpeg build with the SVT-AV1-HDR encoder. \
        Uses the VQ tune by default or the Film Grain tune for grainy sources, applies the \
        PQ-optimized variance boost curve to HDR content, keeps HDR colour metadata and \
        always outputs 10-bit.",
    version: "1.1.0",
    tags: "pre-processing,ffmpeg,video,av1,hdr,svt-av1-hdr",
    inputs: OPTION_SCHEMA,
};

pub fn details() -> &'static PluginDetails {
    &PLUGIN_DETAILS
}
