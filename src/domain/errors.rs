use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("files array is required and must not be empty")]
    EmptyBundle,

    #[error("file.path (or file.name) is required for each file (missing at index {index})")]
    MissingPath { index: usize },

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Duplicate path '{0}': every file in a bundle needs a unique path")]
    DuplicatePath(String),

    #[error("File {0}: either content or sourceUrl (for binary) is required")]
    MissingSource(String),

    #[error("Invalid sourceUrl '{url}': {reason}")]
    InvalidSourceUrl { url: String, reason: String },

    #[error("Invalid file kind: {0}")]
    InvalidFileKind(String),

    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("Field '{field}' too long: {len} > {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
}
