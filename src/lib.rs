pub mod cli;
pub mod config;
pub mod encoding;
pub mod hdr;
pub mod media;
pub mod plugin;
pub mod utils;

pub use config::Config;
pub use encoding::{EncoderArg, EncoderCommand};
pub use hdr::{classify_hdr, detect_hdr_signal, HdrSignal};
pub use media::{CodecType, MediaDescriptor, MediumKind, StreamInfo};
pub use plugin::{decide, details, DecisionResult, HostResponse, OptionSet, RawOptions};
pub use utils::{Error, Result};
