use thiserror::Error;

pub type Result<T> = std::result::Result<T, SeedkitError>;

#[derive(Error, Debug)]
pub enum SeedkitError {
    #[error("Invalid encoded length: {length}")]
    InvalidLength { length: usize },

    #[error("Invalid character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("Unknown word '{word}' at position {position}")]
    UnknownWord { word: String, position: usize },

    #[error("No valid labels found in import")]
    NoValidLabels,

    #[error("Cipher error: {0}")]
    Cipher(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Account not found: {name}")]
    AccountNotFound { name: String },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),
}

impl SeedkitError {
    pub fn cipher(msg: impl Into<String>) -> Self {
        Self::Cipher(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn dialog(msg: impl Into<String>) -> Self {
        Self::Dialog(msg.into())
    }
}

// conversion from dialoguer::Error
impl From<dialoguer::Error> for SeedkitError {
    fn from(err: dialoguer::Error) -> Self {
        SeedkitError::Dialog(err.to_string())
    }
}
