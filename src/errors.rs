// src/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RowdeckError {
    #[error("Invalid view configuration '{view}': {message}")]
    InvalidView { view: String, message: String },

    #[error("Unknown view: {0}")]
    UnknownView(String),

    #[error("Duplicate record id '{0}' in row source")]
    DuplicateRecordId(String),

    #[error("Feed entry {index} has no '{field}' field")]
    MissingRecordId { index: usize, field: String },

    #[error("Feed entry {index} has a nested value in field '{field}'")]
    UnsupportedFieldValue { index: usize, field: String },

    #[error("Malformed feed: {0}")]
    MalformedFeed(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("A request is already pending for record {0}")]
    ActionPending(String),

    #[error("Action '{action}' is not configured for view '{view}'")]
    ActionNotConfigured { action: String, view: String },

    #[error("Server responded with HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Malformed server response: {0}")]
    MalformedResponse(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("XDG directory error: {0}")]
    XdgError(#[from] xdg::BaseDirectoriesError),

    #[error("TOML serialization error: {0}")]
    TomlSerializationError(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RowdeckError>;
