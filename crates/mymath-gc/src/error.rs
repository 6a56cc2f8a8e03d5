use std::path::PathBuf;

use thiserror::Error;

use crate::object::ObjectId;

/// Errors raised by the host heap.
#[derive(Error, Debug)]
pub enum GcError {
    #[error("Object {0} has been reclaimed or was never allocated.")]
    StaleReference(ObjectId),

    #[error("Object {id} is a {found}, expected {expected}.")]
    TypeMismatch {
        id: ObjectId,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Index {index} out of bounds for array of length {len}.")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Failed to read heap configuration from {path}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid heap configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid value `{value}` for {name}.")]
    InvalidSetting { name: &'static str, value: String },
}
