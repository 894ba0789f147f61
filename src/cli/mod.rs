pub mod args;
pub mod commands;

pub use args::{CliArgs, Command, OptionArgs, SourceArgs};
pub use commands::{run_command, validate_config};
