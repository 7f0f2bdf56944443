use thiserror::Error;

/// Custom error types for submux
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("No processable video files found")]
    NoFilesFound,

    #[error("External dependency '{0}' not found")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, std::io::Error),

    #[error("{tool} failed: {stderr}")]
    ToolFailed { tool: String, stderr: String },

    #[error("Unknown language code '{0}'")]
    UnknownLanguage(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Metadata lookup failed: {0}")]
    MetadataLookup(#[from] reqwest::Error),
}

/// Result type for submux operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
