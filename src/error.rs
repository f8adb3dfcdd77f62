use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Invalid coordinates")]
    InvalidCoordinates,

    #[cfg(feature = "db")]
    #[error("Database error: {message}")]
    Database { message: String },
}

impl AtlasError {
    /// True for errors caused by a bad submission rather than a failing backend.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField(_) | Self::InvalidCoordinates)
    }
}

pub type Result<T> = std::result::Result<T, AtlasError>;
