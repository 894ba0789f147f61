use crate::config::DEFAULT_CONFIG_FILE;
use crate::media::MediumKind;
use crate::plugin::{schema, RawOptions};
use crate::utils::{Error, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
#[command(name = "svt-av1-hdr")]
#[command(about = "Decide whether and how to re-encode video to AV1 with SVT-AV1-HDR")]
#[command(long_about = "
Plans AV1 transcodes for an FFmpeg build carrying the SVT-AV1-HDR encoder.
Each input is probed, classified as HDR or SDR, and turned into the encoder
argument string a pipeline host would run. Nothing is encoded.

EXAMPLES:
  # Decide for one file, using options from config.yaml
  svt-av1-hdr decide movie.mkv

  # Whole library, machine readable
  svt-av1-hdr decide ~/Videos/ --json

  # Saved ffprobe output instead of running ffprobe
  svt-av1-hdr decide --probe-json movie.probe.json --tune 4 --preset 2

  # Full command line with the input/output placeholder filled in
  svt-av1-hdr render movie.mkv -o movie-av1.mkv

  # Option schema the host renders
  svt-av1-hdr details --json
")]
pub struct CliArgs {
    /// Configuration file path
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE, value_name = "FILE")]
    pub config: PathBuf,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decide whether each input should be transcoded and print the plan
    Decide {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        options: OptionArgs,

        /// Print the host response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the complete encoder command for one input
    Render {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        options: OptionArgs,

        /// Output file (defaults to <input stem>-av1.<container> next to the input)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Show plugin details and the option schema
    Details {
        /// Print as JSON in the host's format
        #[arg(long)]
        json: bool,
    },

    /// Validate the configuration file
    ValidateConfig,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Media file or directory to probe
    #[arg(value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Read ffprobe JSON (-show_streams -print_format json) from FILE instead of running ffprobe
    #[arg(long, value_name = "FILE", conflicts_with = "file_json")]
    pub probe_json: Option<PathBuf>,

    /// Read a host file record ({fileMedium, ffProbeData}) from FILE
    #[arg(long, value_name = "FILE")]
    pub file_json: Option<PathBuf>,

    /// Medium kind to assume with --probe-json (default: from the input extension, else video)
    #[arg(long, value_parser = ["video", "audio", "other"])]
    pub medium: Option<String>,
}

impl SourceArgs {
    pub fn validate(&self) -> Result<()> {
        if self.input.is_none() && self.probe_json.is_none() && self.file_json.is_none() {
            return Err(Error::validation(
                "An input path, --probe-json or --file-json is required",
            ));
        }

        if self.medium.is_some() && self.probe_json.is_none() {
            return Err(Error::validation("--medium only applies to --probe-json"));
        }

        if let Some(input) = &self.input {
            if self.probe_json.is_none() && self.file_json.is_none() && !input.exists() {
                return Err(Error::validation(format!(
                    "Input path does not exist: {}",
                    input.display()
                )));
            }
        }

        Ok(())
    }

    pub fn medium_override(&self) -> Option<MediumKind> {
        self.medium.as_deref().map(MediumKind::from_string)
    }
}

/// Command-line overrides for the plugin options in the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// Tune: 0 = visual quality, 4 = film grain
    #[arg(long, value_parser = ["0", "4"])]
    pub tune: Option<String>,

    /// Constant rate factor (0-63, lower is better quality)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=63))]
    pub crf: Option<u8>,

    /// Encoder preset (0-12, lower is slower)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=12))]
    pub preset: Option<u8>,

    /// Apply the PQ variance boost curve even to SDR sources (`false` undoes the config)
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub enable_hdr_curve: Option<bool>,

    /// Output container
    #[arg(long, value_parser = ["mkv", "mp4", "webm"])]
    pub container: Option<String>,

    /// Audio codec for the output
    #[arg(long, value_parser = ["copy", "aac", "opus", "flac"])]
    pub audio_codec: Option<String>,

    /// FFmpeg build with SVT-AV1-HDR
    #[arg(long, value_name = "PATH")]
    pub encoder_path: Option<String>,
}

impl OptionArgs {
    /// Only flags the user actually passed end up in the result.
    pub fn overrides(&self) -> RawOptions {
        let mut raw = RawOptions::new();

        if let Some(tune) = &self.tune {
            raw.insert(schema::OPT_TUNE, tune.as_str());
        }
        if let Some(crf) = self.crf {
            raw.insert(schema::OPT_CRF, crf);
        }
        if let Some(preset) = self.preset {
            raw.insert(schema::OPT_PRESET, preset.to_string());
        }
        if let Some(enabled) = self.enable_hdr_curve {
            raw.insert(schema::OPT_ENABLE_HDR_CURVE, enabled);
        }
        if let Some(container) = &self.container {
            raw.insert(schema::OPT_CONTAINER, container.as_str());
        }
        if let Some(audio_codec) = &self.audio_codec {
            raw.insert(schema::OPT_AUDIO_CODEC, audio_codec.as_str());
        }
        if let Some(path) = &self.encoder_path {
            raw.insert(schema::OPT_FFMPEG_PATH, path.as_str());
        }

        raw
    }
}

impl CliArgs {
    pub fn get_log_level<'a>(&self, config_level: &'a str) -> &'a str {
        if self.debug {
            "debug"
        } else {
            config_level
        }
    }

    pub fn should_use_color(&self) -> bool {
        !self.no_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_decide_with_overrides() {
        let args = parse(&[
            "svt-av1-hdr",
            "decide",
            "movie.mkv",
            "--tune",
            "4",
            "--crf",
            "28",
            "--enable-hdr-curve",
            "--json",
        ]);

        let Command::Decide {
            source,
            options,
            json,
        } = args.command
        else {
            panic!("expected decide");
        };
        assert!(json);
        assert_eq!(source.input, Some(PathBuf::from("movie.mkv")));

        let raw = options.overrides();
        assert_eq!(raw.get("tune"), Some(&json!("4")));
        assert_eq!(raw.get("crf"), Some(&json!(28)));
        assert_eq!(raw.get("enable_hdr_curve"), Some(&json!(true)));
        assert_eq!(raw.get("container"), None);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(CliArgs::try_parse_from(["svt-av1-hdr", "decide", "a.mkv", "--crf", "70"]).is_err());
        assert!(
            CliArgs::try_parse_from(["svt-av1-hdr", "decide", "a.mkv", "--preset", "13"]).is_err()
        );
        assert!(
            CliArgs::try_parse_from(["svt-av1-hdr", "decide", "a.mkv", "--container", "avi"])
                .is_err()
        );
    }

    #[test]
    fn test_probe_json_conflicts_with_file_json() {
        assert!(CliArgs::try_parse_from([
            "svt-av1-hdr",
            "decide",
            "--probe-json",
            "a.json",
            "--file-json",
            "b.json",
        ])
        .is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = parse(&["svt-av1-hdr", "details", "--debug", "--no-color"]);
        assert!(args.debug);
        assert!(!args.should_use_color());
        assert_eq!(args.get_log_level("warn"), "debug");
        assert_eq!(args.config, PathBuf::from("config.yaml"));
    }

    #[test]
    fn test_source_validation() {
        assert!(SourceArgs::default().validate().is_err());

        let source = SourceArgs {
            probe_json: Some(PathBuf::from("probe.json")),
            medium: Some("audio".to_string()),
            ..SourceArgs::default()
        };
        assert!(source.validate().is_ok());
        assert_eq!(source.medium_override(), Some(MediumKind::Audio));

        let source = SourceArgs {
            input: Some(PathBuf::from("/definitely/missing.mkv")),
            ..SourceArgs::default()
        };
        assert!(source.validate().is_err());
    }

    #[test]
    fn test_hdr_curve_flag_takes_optional_value() {
        let overrides = |extra: &[&str]| {
            let mut argv = vec!["svt-av1-hdr", "decide", "a.mkv"];
            argv.extend_from_slice(extra);
            let Command::Decide { options, .. } = parse(&argv).command else {
                panic!("expected decide");
            };
            options.overrides()
        };

        assert_eq!(
            overrides(&["--enable-hdr-curve"]).get("enable_hdr_curve"),
            Some(&json!(true))
        );
        assert_eq!(
            overrides(&["--enable-hdr-curve", "false"]).get("enable_hdr_curve"),
            Some(&json!(false))
        );
        assert_eq!(
            overrides(&["--enable-hdr-curve=true"]).get("enable_hdr_curve"),
            Some(&json!(true))
        );
        assert_eq!(overrides(&[]).get("enable_hdr_curve"), None);
    }

    #[test]
    fn test_empty_overrides() {
        assert!(OptionArgs::default().overrides().is_empty());
    }
}
