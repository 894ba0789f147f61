pub mod args;
pub mod command;

pub use args::{assemble_arguments, join_arguments, svt_params, EncoderArg, SvtParams, TARGET_CODEC};
pub use command::EncoderCommand;
