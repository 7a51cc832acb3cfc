//! Error types for volume packaging

use crate::types::DataType;
use thiserror::Error;

/// Main error type for packaging operations
#[derive(Error, Debug)]
pub enum PackError {
    #[error("Unsupported element type: {0}")]
    UnsupportedType(DataType),

    #[error("Invalid array: {0}")]
    InvalidArray(String),

    #[error("Unsupported dimensionality: {0} (axis reordering requires 3 dimensions)")]
    UnsupportedDimensionality(usize),

    #[error("Invalid data type")]
    InvalidDataType,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Specialized Result type for packaging operations
pub type Result<T> = std::result::Result<T, PackError>;

impl From<serde_json::Error> for PackError {
    fn from(err: serde_json::Error) -> Self {
        PackError::Serialization(err.to_string())
    }
}

impl From<zip::result::ZipError> for PackError {
    fn from(err: zip::result::ZipError) -> Self {
        PackError::Archive(err.to_string())
    }
}

impl From<ndarray::ShapeError> for PackError {
    fn from(err: ndarray::ShapeError) -> Self {
        PackError::InvalidArray(err.to_string())
    }
}
