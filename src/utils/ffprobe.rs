use crate::media::{MediaDescriptor, MediumKind};
use crate::utils::{Error, Result};
use std::path::Path;
use tokio::process::Command as TokioCommand;
use tracing::debug;

/// Thin wrapper around the external prober. Only the stream listing is used.
#[derive(Debug, Clone)]
pub struct Ffprobe {
    ffprobe_path: String,
}

impl Ffprobe {
    pub fn new(ffprobe_path: String) -> Self {
        Self { ffprobe_path }
    }

    pub fn path(&self) -> &str {
        &self.ffprobe_path
    }

    pub async fn check_availability(&self) -> Result<()> {
        let output = TokioCommand::new(&self.ffprobe_path)
            .arg("-version")
            .output()
            .await?;

        if !output.status.success() {
            return Err(Error::probe(format!(
                "{} is not available or not executable",
                self.ffprobe_path
            )));
        }

        Ok(())
    }

    /// Run ffprobe with custom arguments and return stdout as string
    pub async fn run(&self, args: &[&str]) -> Result<String> {
        debug!("Running ffprobe with args: {:?}", args);

        let output = TokioCommand::new(&self.ffprobe_path)
            .args(args)
            .output()
            .await?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            return Err(Error::probe(format!("ffprobe failed: {}", error_msg.trim())));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    pub async fn probe_streams<P: AsRef<Path>>(&self, input_path: P) -> Result<serde_json::Value> {
        let input_path = input_path.as_ref().to_string_lossy();

        let output = self
            .run(&[
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_streams",
                &input_path,
            ])
            .await?;

        serde_json::from_str(&output)
            .map_err(|e| Error::parse(format!("Failed to parse ffprobe output: {}", e)))
    }

    /// Probes `input_path` and wraps the streams together with the given medium kind.
    pub async fn describe<P: AsRef<Path>>(
        &self,
        input_path: P,
        medium_kind: MediumKind,
    ) -> Result<MediaDescriptor> {
        let probe = self.probe_streams(input_path).await?;
        MediaDescriptor::from_probe_json(medium_kind, &probe)
    }
}
