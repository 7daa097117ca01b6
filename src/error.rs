use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkSimError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to bind to {addr}: {reason}")]
    Bind { addr: String, reason: String },

    #[error("Signal handler error: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LinkSimError>;
