use super::schema::{self, option_spec};
use crate::utils::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

/// Option values exactly as the host or config file supplied them.
///
/// Values are loosely typed: a number may arrive as `35` or `"35"`, a boolean
/// as `true` or `"true"`. [`resolve_options`] turns this into an [`OptionSet`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawOptions(Map<String, Value>);

impl RawOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a JSON object, or `null` for "nothing configured".
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Object(map) => Ok(Self(map.clone())),
            other => Err(Error::contract(format!(
                "plugin inputs must be a JSON object, got {}",
                json_kind(other)
            ))),
        }
    }

    pub fn with<V: Into<Value>>(mut self, name: &str, value: V) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert<V: Into<Value>>(&mut self, name: &str, value: V) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Values in `overrides` replace ours.
    pub fn merge(&mut self, overrides: &RawOptions) {
        for (name, value) in &overrides.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tune {
    #[serde(rename = "0")]
    VisualQuality,
    #[serde(rename = "4")]
    FilmGrain,
}

impl Tune {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VisualQuality => "0",
            Self::FilmGrain => "4",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VisualQuality => "VQ",
            Self::FilmGrain => "Film Grain",
        }
    }

    pub fn from_string(s: &str) -> Option<Self> {
        match s {
            "0" => Some(Self::VisualQuality),
            "4" => Some(Self::FilmGrain),
            _ => None,
        }
    }
}

impl fmt::Display for Tune {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    Mkv,
    Mp4,
    Webm,
}

impl Container {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mkv => "mkv",
            Self::Mp4 => "mp4",
            Self::Webm => "webm",
        }
    }

    pub fn extension(&self) -> String {
        format!(".{}", self.as_str())
    }

    /// Matroska is the only choice that takes arbitrary subtitle codecs as-is.
    pub fn supports_subtitle_copy(&self) -> bool {
        matches!(self, Self::Mkv)
    }

    pub fn from_string(s: &str) -> Option<Self> {
        match s {
            "mkv" => Some(Self::Mkv),
            "mp4" => Some(Self::Mp4),
            "webm" => Some(Self::Webm),
            _ => None,
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCodec {
    Copy,
    Aac,
    Opus,
    Flac,
}

impl AudioCodec {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Aac => "aac",
            Self::Opus => "opus",
            Self::Flac => "flac",
        }
    }

    pub fn from_string(s: &str) -> Option<Self> {
        match s {
            "copy" => Some(Self::Copy),
            "aac" => Some(Self::Aac),
            "opus" => Some(Self::Opus),
            "flac" => Some(Self::Flac),
            _ => None,
        }
    }
}

impl fmt::Display for AudioCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const MAX_CRF: u8 = 63;
pub const MAX_PRESET: u8 = 12;

/// Fully resolved plugin options. Every field has a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSet {
    pub tune: Tune,
    pub crf: u8,
    pub preset: u8,
    pub enable_hdr_curve: bool,
    pub container: Container,
    pub audio_codec: AudioCodec,
    pub encoder_path: String,
}

impl Default for OptionSet {
    fn default() -> Self {
        Self {
            tune: Tune::VisualQuality,
            crf: schema::DEFAULT_CRF,
            preset: schema::DEFAULT_PRESET,
            enable_hdr_curve: schema::DEFAULT_ENABLE_HDR_CURVE,
            container: Container::Mkv,
            audio_codec: AudioCodec::Copy,
            encoder_path: schema::DEFAULT_FFMPEG_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub options: OptionSet,
    /// One line per supplied value that could not be used.
    pub warnings: Vec<String>,
}

/// Fills every option from `raw`, falling back to the schema default when a
/// value is missing, null, an empty string, or not one the encoder accepts.
pub fn resolve_options(raw: &RawOptions) -> ResolvedOptions {
    let defaults = OptionSet::default();
    let mut resolver = Resolver {
        raw,
        warnings: Vec::new(),
    };

    for name in raw.names() {
        if option_spec(name).is_none() {
            resolver.reject(name, "unknown option, ignored".to_string());
        }
    }

    let options = OptionSet {
        tune: resolver.resolve(schema::OPT_TUNE, defaults.tune, |v| {
            text_value(v).and_then(|s| Tune::from_string(&s))
        }),
        crf: resolver.resolve(schema::OPT_CRF, defaults.crf, |v| {
            bounded_integer(v, MAX_CRF)
        }),
        preset: resolver.resolve(schema::OPT_PRESET, defaults.preset, |v| {
            bounded_integer(v, MAX_PRESET)
        }),
        enable_hdr_curve: resolver.resolve(
            schema::OPT_ENABLE_HDR_CURVE,
            defaults.enable_hdr_curve,
            boolean_value,
        ),
        container: resolver.resolve(schema::OPT_CONTAINER, defaults.container, |v| {
            text_value(v).and_then(|s| Container::from_string(&s))
        }),
        audio_codec: resolver.resolve(schema::OPT_AUDIO_CODEC, defaults.audio_codec, |v| {
            text_value(v).and_then(|s| AudioCodec::from_string(&s))
        }),
        encoder_path: resolver.resolve(schema::OPT_FFMPEG_PATH, defaults.encoder_path, |v| {
            v.as_str().map(|s| s.trim().to_string())
        }),
    };

    ResolvedOptions {
        options,
        warnings: resolver.warnings,
    }
}

struct Resolver<'a> {
    raw: &'a RawOptions,
    warnings: Vec<String>,
}

impl<'a> Resolver<'a> {
    /// `None` for absent, null and blank-string values.
    fn provided(&self, name: &str) -> Option<&'a Value> {
        match self.raw.get(name)? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            value => Some(value),
        }
    }

    fn resolve<T, F>(&mut self, name: &str, default: T, parse: F) -> T
    where
        T: fmt::Display,
        F: FnOnce(&Value) -> Option<T>,
    {
        let Some(value) = self.provided(name) else {
            return default;
        };

        match parse(value) {
            Some(resolved) => resolved,
            None => {
                let message = format!("invalid value {}, using default {}", value, default);
                self.reject(name, message);
                default
            }
        }
    }

    fn reject(&mut self, name: &str, message: String) {
        warn!("Option '{}': {}", name, message);
        self.warnings.push(format!("Option '{}': {}", name, message));
    }
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn bounded_integer(value: &Value, max: u8) -> Option<u8> {
    let parsed = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;

    u8::try_from(parsed).ok().filter(|n| *n <= max)
}

fn boolean_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(s) => match s.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
