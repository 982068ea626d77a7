//! Error types for bankportal-source

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {location}: {source}")]
    IoError {
        location: String,
        #[source]
        source: io::Error,
    },

    #[error("Malformed JSON in {location}: {message}")]
    MalformedJson { location: String, message: String },

    #[error("Unexpected document shape in {location}: {message}")]
    InvalidShape { location: String, message: String },
}

impl SourceError {
    /// Where the failing data came from
    pub fn location(&self) -> &str {
        match self {
            SourceError::IoError { location, .. } => location,
            SourceError::MalformedJson { location, .. } => location,
            SourceError::InvalidShape { location, .. } => location,
        }
    }
}
