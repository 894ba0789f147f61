pub mod detection;
pub mod types;

pub use detection::{classify_hdr, detect_hdr_signal};
pub use types::HdrSignal;
