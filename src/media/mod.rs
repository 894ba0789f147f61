pub mod probe;
pub mod types;

pub use types::*;
