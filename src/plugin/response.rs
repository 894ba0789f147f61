use super::decision::DecisionResult;
use serde::Serialize;

/// The record a Tdarr-style host expects back from a plugin call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostResponse {
    #[serde(rename = "processFile")]
    pub process_file: bool,
    pub preset: String,
    pub container: String,
    #[serde(rename = "handBrakeMode")]
    pub hand_brake_mode: bool,
    #[serde(rename = "FFmpegMode")]
    pub ffmpeg_mode: bool,
    #[serde(rename = "reQueueAfter")]
    pub re_queue_after: bool,
    #[serde(rename = "infoLog")]
    pub info_log: String,
    #[serde(rename = "FFmpegPath", skip_serializing_if = "Option::is_none")]
    pub ffmpeg_path: Option<String>,
}

impl From<&DecisionResult> for HostResponse {
    fn from(decision: &DecisionResult) -> Self {
        let info_log = decision
            .log
            .iter()
            .map(|line| format!("{}\n", line))
            .collect();

        Self {
            process_file: decision.should_process,
            preset: decision.arguments(),
            container: decision.output_extension.clone(),
            hand_brake_mode: false,
            ffmpeg_mode: true,
            re_queue_after: false,
            info_log,
            ffmpeg_path: decision.encoder_path_override.clone(),
        }
    }
}
