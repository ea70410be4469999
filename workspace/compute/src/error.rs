use thiserror::Error;

/// Error types for the page logic
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputeError {
    /// Section identifier that does not name any section
    #[error("Unknown section: {0}")]
    UnknownSection(String),

    /// Endpoint the playground does not serve
    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// Error from the preference store (e.g. localStorage unavailable)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Error from the chart rendering backend
    #[error("Chart error: {0}")]
    Chart(String),

    /// Invalid configuration value
    #[error("Config error: {0}")]
    Config(String),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
