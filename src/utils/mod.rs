pub mod error;
pub mod ffprobe;
pub mod filesystem;
pub mod logging;

pub use error::{Error, Result};
pub use ffprobe::Ffprobe;
pub use filesystem::{
    default_output_path, find_media_files, medium_kind_for_named_file, medium_kind_for_path,
};
pub use logging::setup_logging;
