use serde::Serialize;
use std::fmt;

/// Which piece of stream metadata marked the content as HDR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum HdrSignal {
    Transfer(String),  // PQ or HLG transfer characteristics
    Primaries(String), // BT.2020 primaries
    SideData(String),  // mastering display / content light level / HDR side data
}

impl fmt::Display for HdrSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transfer(value) => write!(f, "color_transfer={}", value),
            Self::Primaries(value) => write!(f, "color_primaries={}", value),
            Self::SideData(label) => write!(f, "side data \"{}\"", label),
        }
    }
}
