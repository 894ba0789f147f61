use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The caller handed over a record that does not have the agreed shape.
    #[error("Contract violation: {message}")]
    Contract { message: String },

    #[error("ffprobe error: {message}")]
    Probe { message: String },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl Error {
    pub fn contract<T: Into<String>>(message: T) -> Self {
        Self::Contract {
            message: message.into(),
        }
    }

    pub fn probe<T: Into<String>>(message: T) -> Self {
        Self::Probe {
            message: message.into(),
        }
    }

    pub fn parse<T: Into<String>>(message: T) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::Contract { .. })
    }
}
