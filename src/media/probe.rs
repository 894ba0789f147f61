//! Adapters from prober/host JSON documents to [`MediaDescriptor`].
//!
//! Only the outer shape is enforced: the document, the `streams` list and each
//! stream entry must be what ffprobe emits. Individual fields that are missing
//! or have an unexpected type are treated as absent.

use super::types::{CodecType, MediaDescriptor, MediumKind, SideDataEntry, StreamInfo};
use crate::utils::{Error, Result};
use serde_json::Value;

impl MediaDescriptor {
    /// Builds a descriptor from `ffprobe -show_streams -print_format json` output.
    pub fn from_probe_json(medium_kind: MediumKind, probe: &Value) -> Result<Self> {
        let root = probe
            .as_object()
            .ok_or_else(|| Error::contract("ffprobe document must be a JSON object"))?;

        let streams = match root.get("streams") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => entries
                .iter()
                .enumerate()
                .map(|(index, entry)| parse_stream(index, entry))
                .collect::<Result<Vec<_>>>()?,
            Some(_) => return Err(Error::contract("ffprobe `streams` must be an array")),
        };

        Ok(Self::new(medium_kind, streams))
    }

    /// Builds a descriptor from the host's file record
    /// (`{"fileMedium": "video", "ffProbeData": {"streams": [...]}}`).
    pub fn from_host_file(file: &Value) -> Result<Self> {
        let root = file
            .as_object()
            .ok_or_else(|| Error::contract("host file record must be a JSON object"))?;

        let medium_kind = root
            .get("fileMedium")
            .and_then(Value::as_str)
            .map(MediumKind::from_string)
            .unwrap_or(MediumKind::Other);

        match root.get("ffProbeData") {
            None | Some(Value::Null) => Ok(Self::new(medium_kind, Vec::new())),
            Some(probe) => Self::from_probe_json(medium_kind, probe),
        }
    }
}

fn parse_stream(index: usize, entry: &Value) -> Result<StreamInfo> {
    let stream = entry.as_object().ok_or_else(|| {
        Error::contract(format!("ffprobe stream #{} must be a JSON object", index))
    })?;

    let text = |key: &str| stream.get(key).and_then(Value::as_str).map(str::to_string);

    let codec_type = stream
        .get("codec_type")
        .and_then(Value::as_str)
        .map(CodecType::from_string)
        .unwrap_or(CodecType::Other);

    let side_data = stream
        .get("side_data_list")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(parse_side_data).collect())
        .unwrap_or_default();

    Ok(StreamInfo {
        codec_type,
        codec_name: text("codec_name").unwrap_or_default(),
        color_transfer: text("color_transfer"),
        color_primaries: text("color_primaries"),
        side_data,
    })
}

fn parse_side_data(entry: &Value) -> SideDataEntry {
    SideDataEntry {
        type_label: entry
            .get("side_data_type")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}
