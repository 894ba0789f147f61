use crate::{
    cli::{CliArgs, Command, OptionArgs, SourceArgs},
    config::Config,
    encoding::EncoderCommand,
    media::{MediaDescriptor, MediumKind},
    plugin::{decide, details, DecisionResult, DecisionSummary, HostResponse, RawOptions},
    utils::{
        default_output_path, find_media_files, medium_kind_for_named_file, medium_kind_for_path,
        Error, Ffprobe, Result,
    },
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One input as handed to the planner; probing may have failed.
struct PlannedInput {
    label: String,
    media: Result<MediaDescriptor>,
}

#[derive(Serialize)]
struct DecisionReport<'a> {
    file: &'a str,
    decision: DecisionSummary<'a>,
    response: HostResponse,
}

pub async fn run_command(args: &CliArgs, config: &Config) -> Result<()> {
    match &args.command {
        Command::Decide {
            source,
            options,
            json,
        } => decide_command(config, source, options, *json).await,
        Command::Render {
            source,
            options,
            output,
        } => render_command(config, source, options, output.as_deref()).await,
        Command::Details { json } => show_details(*json),
        Command::ValidateConfig => validate_config(&args.config),
    }
}

/// Config options overlaid with whatever was passed on the command line.
fn effective_options(config: &Config, overrides: &OptionArgs) -> RawOptions {
    let mut raw = config.options.clone();
    raw.merge(&overrides.overrides());
    raw
}

async fn decide_command(
    config: &Config,
    source: &SourceArgs,
    overrides: &OptionArgs,
    json: bool,
) -> Result<()> {
    let raw_options = effective_options(config, overrides);
    let inputs = gather_inputs(source, config).await?;

    let mut decisions = Vec::new();
    let mut failed = 0usize;

    for (index, input) in inputs.iter().enumerate() {
        info!("Processing file {}/{}: {}", index + 1, inputs.len(), input.label);

        match &input.media {
            Ok(media) => decisions.push((input.label.as_str(), decide(media, &raw_options))),
            Err(e) => {
                warn!("Failed to probe {}: {}", input.label, e);
                failed += 1;
            }
        }
    }

    if json {
        let reports: Vec<DecisionReport> = decisions
            .iter()
            .map(|(file, decision)| DecisionReport {
                file: *file,
                decision: decision.summary(),
                response: HostResponse::from(decision),
            })
            .collect();
        let rendered = match reports.as_slice() {
            [single] => serde_json::to_string_pretty(single)?,
            all => serde_json::to_string_pretty(all)?,
        };
        println!("{}", rendered);
    } else {
        for (file, decision) in &decisions {
            print_decision(file, decision);
        }
    }

    if failed > 0 && failed == inputs.len() {
        return Err(Error::probe("All inputs failed to probe"));
    }

    if inputs.len() > 1 {
        info!(
            "Planning complete: {} planned, {} failed",
            inputs.len() - failed,
            failed
        );
    }

    Ok(())
}

async fn render_command(
    config: &Config,
    source: &SourceArgs,
    overrides: &OptionArgs,
    output: Option<&Path>,
) -> Result<()> {
    let input_path = source
        .input
        .as_ref()
        .ok_or_else(|| Error::validation("render needs the input path to place after -i"))?;

    if input_path.is_dir() {
        return Err(Error::validation(format!(
            "render works on a single file, got directory: {}",
            input_path.display()
        )));
    }

    let raw_options = effective_options(config, overrides);
    let input = gather_inputs(source, config)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| Error::validation("No input to render"))?;
    let decision = decide(&input.media?, &raw_options);

    if !decision.should_process {
        for line in &decision.log {
            println!("{}", line);
        }
        return Ok(());
    }

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input_path, &decision.output_extension));
    let command = EncoderCommand::from_decision(&decision, input_path, &output_path)?;

    println!("{}", command.shell_line()?);
    Ok(())
}

fn show_details(json: bool) -> Result<()> {
    let details = details();

    if json {
        println!("{}", serde_json::to_string_pretty(details)?);
        return Ok(());
    }

    println!("{} v{} ({})", details.name, details.version, details.id);
    println!("Stage: {}  Type: {}  Operation: {}", details.stage, details.kind, details.operation);
    println!("Tags: {}", details.tags);
    println!();
    println!("{}", details.description);
    println!();
    println!("{:-<80}", "");
    println!("{:<18} {:<8} {:<36} Choices", "Option", "Type", "Default");
    println!("{:-<80}", "");

    for spec in details.inputs {
        let choices = spec.input_ui.choices();
        println!(
            "{:<18} {:<8} {:<36} {}",
            spec.name,
            spec.kind.as_str(),
            spec.default_value.to_string(),
            if choices.is_empty() {
                "(free text)".to_string()
            } else {
                choices.join(", ")
            }
        );
        println!("  {}", spec.tooltip);
    }

    println!("{:-<80}", "");
    Ok(())
}

pub fn validate_config(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;

    println!("✓ Configuration is valid: {}", config_path.display());
    println!("  ffprobe: {}", config.tools.ffprobe);
    println!("  log level: {}", config.logging.level);

    let resolved = crate::plugin::resolve_options(&config.options);
    for warning in &resolved.warnings {
        println!("  ! {}", warning);
    }
    println!(
        "  options: tune={} crf={} preset={} container={} audio={}",
        resolved.options.tune,
        resolved.options.crf,
        resolved.options.preset,
        resolved.options.container,
        resolved.options.audio_codec
    );

    Ok(())
}

async fn gather_inputs(source: &SourceArgs, config: &Config) -> Result<Vec<PlannedInput>> {
    source.validate()?;

    if let Some(path) = &source.file_json {
        let record = read_json(path)?;
        return Ok(vec![PlannedInput {
            label: source_label(source.input.as_deref(), path),
            media: MediaDescriptor::from_host_file(&record),
        }]);
    }

    if let Some(path) = &source.probe_json {
        let medium_kind = source
            .medium_override()
            .or_else(|| source.input.as_deref().map(medium_kind_for_named_file))
            .unwrap_or(MediumKind::Video);
        let probe = read_json(path)?;
        return Ok(vec![PlannedInput {
            label: source_label(source.input.as_deref(), path),
            media: MediaDescriptor::from_probe_json(medium_kind, &probe),
        }]);
    }

    let Some(input) = &source.input else {
        return Err(Error::validation("No input given"));
    };

    // The extension lists only filter directory walks.
    let named_file = input.is_file();
    let files = find_media_files(input)?;
    info!("Found {} media file(s) to plan", files.len());

    let ffprobe = Ffprobe::new(config.tools.ffprobe.clone());
    ffprobe
        .check_availability()
        .await
        .map_err(|e| Error::probe(format!("{} not usable: {}", ffprobe.path(), e)))?;

    let mut inputs = Vec::with_capacity(files.len());
    for file in files {
        let medium_kind = if named_file {
            medium_kind_for_named_file(&file)
        } else {
            medium_kind_for_path(&file)
        };
        let media = if medium_kind == MediumKind::Video {
            ffprobe.describe(&file, medium_kind).await
        } else {
            Ok(MediaDescriptor::new(medium_kind, Vec::new()))
        };
        inputs.push(PlannedInput {
            label: file.display().to_string(),
            media,
        });
    }

    Ok(inputs)
}

fn source_label(input: Option<&Path>, json_path: &Path) -> String {
    input
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(json_path))
        .display()
        .to_string()
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn print_decision(label: &str, decision: &DecisionResult) {
    println!("{}", label);
    for line in &decision.log {
        println!("  {}", line);
    }
    if decision.should_process {
        println!("  Arguments: {}", decision.arguments());
        println!("  Output extension: {}", decision.output_extension);
    }
    println!();
}
