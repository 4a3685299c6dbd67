use std::path::PathBuf;

use thiserror::Error;

/// The primary error type that can be produced by Facet.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no such view: {0}")]
    NoSuchView(String),
    #[error("view with name \"{0}\" already exists")]
    ViewAlreadyExists(String),
    #[error("view \"{0}\" has no field named \"{1}\"")]
    NoSuchField(String, String),
    #[error("view \"{0}\" already has a field named \"{1}\"")]
    FieldAlreadyExists(String, String),
    #[error("field \"{field}\" expects a {expected} value, but got {got}")]
    UnexpectedType {
        field: String,
        expected: &'static str,
        got: String,
    },
    #[error("only scalar values (null, booleans, numbers and strings) are supported, but got {0}")]
    NonScalarValue(String),
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("cannot determine file type of file: {0}")]
    CannotDetermineFileType(PathBuf),
    #[error("failed to load configuration from {0}")]
    FailedToLoadConfig(PathBuf),
    #[error("I/O error {0}: {1}")]
    Io(String, std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
