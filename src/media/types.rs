use serde::Serialize;

/// Broad class of an input file as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediumKind {
    Video,
    Audio,
    Other,
}

impl MediumKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Other => "other",
        }
    }

    /// Anything the host may send that is not `video` or `audio` is `Other`.
    pub fn from_string(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "video" => Self::Video,
            "audio" => Self::Audio,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecType {
    Video,
    Audio,
    Subtitle,
    Other,
}

impl CodecType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Subtitle => "subtitle",
            Self::Other => "other",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "video" => Self::Video,
            "audio" => Self::Audio,
            "subtitle" => Self::Subtitle,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SideDataEntry {
    pub type_label: Option<String>,
}

impl SideDataEntry {
    pub fn labelled<S: Into<String>>(label: S) -> Self {
        Self {
            type_label: Some(label.into()),
        }
    }
}

/// One probed stream. Only the fields the planner consults are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamInfo {
    pub codec_type: CodecType,
    pub codec_name: String,
    pub color_transfer: Option<String>,
    pub color_primaries: Option<String>,
    pub side_data: Vec<SideDataEntry>,
}

impl StreamInfo {
    pub fn new<S: Into<String>>(codec_type: CodecType, codec_name: S) -> Self {
        Self {
            codec_type,
            codec_name: codec_name.into(),
            color_transfer: None,
            color_primaries: None,
            side_data: Vec::new(),
        }
    }

    pub fn video<S: Into<String>>(codec_name: S) -> Self {
        Self::new(CodecType::Video, codec_name)
    }

    pub fn audio<S: Into<String>>(codec_name: S) -> Self {
        Self::new(CodecType::Audio, codec_name)
    }

    pub fn subtitle<S: Into<String>>(codec_name: S) -> Self {
        Self::new(CodecType::Subtitle, codec_name)
    }

    pub fn with_color_transfer<S: Into<String>>(mut self, transfer: S) -> Self {
        self.color_transfer = Some(transfer.into());
        self
    }

    pub fn with_color_primaries<S: Into<String>>(mut self, primaries: S) -> Self {
        self.color_primaries = Some(primaries.into());
        self
    }

    pub fn with_side_data(mut self, entry: SideDataEntry) -> Self {
        self.side_data.push(entry);
        self
    }

    pub fn is_video(&self) -> bool {
        self.codec_type == CodecType::Video
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaDescriptor {
    pub medium_kind: MediumKind,
    pub streams: Vec<StreamInfo>,
}

impl MediaDescriptor {
    pub fn new(medium_kind: MediumKind, streams: Vec<StreamInfo>) -> Self {
        Self {
            medium_kind,
            streams,
        }
    }

    pub fn video(streams: Vec<StreamInfo>) -> Self {
        Self::new(MediumKind::Video, streams)
    }

    /// First video stream in probe order.
    pub fn primary_video_stream(&self) -> Option<&StreamInfo> {
        self.streams.iter().find(|s| s.is_video())
    }
}
