use super::types::*;
use crate::plugin::RawOptions;
use crate::utils::logging::{parse_level, LOG_LEVELS};
use crate::utils::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
const FALLBACK_CONFIG_FILE: &str = "config.default.yaml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Plugin inputs, in the same loose shape the host sends them.
    #[serde(default)]
    pub options: RawOptions,
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_str = std::fs::read_to_string(config_path)?;
        Self::from_yaml(&config_str)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `config_path` if it exists, otherwise the first of
    /// `config.default.yaml` and `<user config dir>/svt-av1-hdr/config.yaml`,
    /// otherwise built-in defaults.
    pub fn load_with_fallback<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();
        if config_path.exists() {
            return Self::load(config_path);
        }

        for candidate in Self::fallback_paths() {
            if candidate.exists() {
                debug!("Using fallback configuration: {}", candidate.display());
                return Self::load(candidate);
            }
        }

        debug!(
            "No configuration file found at {}, using defaults",
            config_path.display()
        );
        Ok(Self::default())
    }

    fn fallback_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(FALLBACK_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("svt-av1-hdr").join(DEFAULT_CONFIG_FILE));
        }
        paths
    }

    pub fn validate(&self) -> Result<()> {
        if self.tools.ffprobe.trim().is_empty() {
            return Err(Error::validation("tools.ffprobe must not be empty"));
        }

        if parse_level(&self.logging.level).is_none() {
            return Err(Error::validation(format!(
                "Invalid logging.level '{}' (must be one of: {})",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{resolve_options, Container, Tune};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tools.ffprobe, "ffprobe");
        assert!(config.options.is_empty());
    }

    #[test]
    fn test_config_load_from_string() {
        let yaml = r#"
tools:
  ffprobe: "/usr/local/bin/ffprobe"

logging:
  level: "debug"
  show_timestamps: true

options:
  tune: "4"
  crf: 28
  preset: "2"
  enable_hdr_curve: "true"
  container: webm
"#;

        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.tools.ffprobe, "/usr/local/bin/ffprobe");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.show_timestamps);
        assert!(config.logging.colored_output);

        let options = resolve_options(&config.options).options;
        assert_eq!(options.tune, Tune::FilmGrain);
        assert_eq!(options.crf, 28);
        assert_eq!(options.preset, 2);
        assert!(options.enable_hdr_curve);
        assert_eq!(options.container, Container::Webm);
    }

    #[test]
    fn test_config_validation_rejects_bad_level() {
        let yaml = "logging:\n  level: loud\n";
        assert!(matches!(
            Config::from_yaml(yaml),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_config_validation_rejects_empty_ffprobe() {
        let yaml = "tools:\n  ffprobe: \"\"\n";
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_malformed_yaml_is_config_error() {
        assert!(matches!(
            Config::from_yaml("options: [unclosed"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "options:\n  audio_codec: opus").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(
            config.options.get("audio_codec"),
            Some(&serde_json::json!("opus"))
        );
    }

    #[test]
    fn test_load_with_fallback_uses_existing_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "logging:\n  level: warn").unwrap();

        let config = Config::load_with_fallback(file.path()).unwrap();
        assert_eq!(config.logging.level, "warn");
    }
}
