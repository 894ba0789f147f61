use super::args::EncoderArg;
use crate::plugin::DecisionResult;
use crate::utils::{Error, Result};
use std::path::Path;

/// Complete encoder invocation with the `<io>` placeholder filled in the way
/// the host does it: options before the placeholder apply to the input,
/// everything after it to the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderCommand {
    program: String,
    args: Vec<String>,
}

impl EncoderCommand {
    pub fn from_decision<P: AsRef<Path>, Q: AsRef<Path>>(
        decision: &DecisionResult,
        input_path: P,
        output_path: Q,
    ) -> Result<Self> {
        if !decision.should_process {
            return Err(Error::validation(
                "Decision does not call for processing; no encoder command to build",
            ));
        }

        let program = decision
            .encoder_path_override
            .clone()
            .ok_or_else(|| Error::validation("Decision carries no encoder path"))?;

        Ok(Self {
            program,
            args: substitute_io(
                &decision.encoder_arguments,
                &input_path.as_ref().to_string_lossy(),
                &output_path.as_ref().to_string_lossy(),
            ),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The command as a single POSIX-shell-safe line.
    pub fn shell_line(&self) -> Result<String> {
        let words =
            std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str));
        shlex::try_join(words)
            .map_err(|e| Error::validation(format!("Cannot quote encoder command: {}", e)))
    }
}

fn substitute_io(arguments: &[EncoderArg], input: &str, output: &str) -> Vec<String> {
    let split = arguments
        .iter()
        .position(EncoderArg::is_io_placeholder)
        .unwrap_or(0);
    let (input_options, rest) = arguments.split_at(split);

    let mut args: Vec<String> = input_options.iter().flat_map(EncoderArg::argv).collect();
    args.push("-i".to_string());
    args.push(input.to_string());
    args.extend(rest.iter().flat_map(EncoderArg::argv));
    args.push(output.to_string());
    args
}
