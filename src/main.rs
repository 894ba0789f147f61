use clap::Parser;

use svt_av1_hdr_planner::{
    cli::{run_command, validate_config, CliArgs, Command},
    config::Config,
    utils::{setup_logging, Result},
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Loading would fall back to defaults and hide a broken file.
    if let Command::ValidateConfig = args.command {
        return validate_config(&args.config);
    }

    let config = Config::load_with_fallback(&args.config)?;

    setup_logging(
        args.get_log_level(&config.logging.level),
        config.logging.show_timestamps,
        config.logging.colored_output && args.should_use_color(),
    )?;

    run_command(&args, &config).await
}
