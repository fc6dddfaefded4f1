//! Fridge-tag Parser Library
//!
//! A Rust library for converting the indented key/value text exports written
//! by Berlinger Fridge-tag and Q-tag temperature loggers into validated,
//! camelCase JSON documents for cold-chain monitoring platforms.
//!
//! This library provides tools for:
//! - Rebuilding the nested section hierarchy from indentation-significant text
//! - Re-homing mis-nested timestamps and ordering per-day history entries
//! - Validating the raw tree against a permissive input schema, collecting
//!   every field violation instead of stopping at the first one
//! - Projecting validated input into the strict output shape with unit
//!   conversions and renamed fields
//! - Serving the pipeline over HTTP and from the command line

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod fridgetag_parser;
        pub mod numeric;
        pub mod pipeline;
        pub mod schema;
    }
    pub mod adapters {
        pub mod filesystem;
        pub mod http;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{FieldValue, RawDocument, RawMap, RawValue};
pub use app::services::fridgetag_parser::{ParseReport, parse_to_raw_document};
pub use app::services::pipeline::{PipelineOptions, ProcessedDocument, process_bytes, process_text};
pub use app::services::schema::{
    FieldViolation, QTagDataInput, QTagDataOutput, ValidationError, project,
    validate_document, validate_history_records,
};
pub use config::Config;

/// Result type alias for the Fridge-tag parser
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Fridge-tag processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Source file does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Source path exists but is not a regular file
    #[error("Not a file: {path}")]
    NotAFile { path: String },

    /// Input bytes are not valid UTF-8
    #[error("Decoding error: {message}")]
    Decode {
        message: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// The assembled document was rejected by the input schema
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Output document could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// HTTP server error
    #[error("Server error: {message}")]
    Server {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a not-a-file error
    pub fn not_a_file(path: impl Into<String>) -> Self {
        Self::NotAFile { path: path.into() }
    }

    /// Create a UTF-8 decoding error
    pub fn decode(message: impl Into<String>, source: std::string::FromUtf8Error) -> Self {
        Self::Decode {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a server error
    pub fn server(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Server {
            message: message.into(),
            source,
        }
    }

    /// Whether this is the fatal document validation failure (as opposed to
    /// an unexpected failure such as I/O or decoding)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Field-level violations when this is a validation failure
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::Validation(err) => err.violations(),
            _ => &[],
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(error: std::string::FromUtf8Error) -> Self {
        Self::Decode {
            message: "input is not valid UTF-8".to_string(),
            source: error,
        }
    }
}

impl From<::config::ConfigError> for Error {
    fn from(error: ::config::ConfigError) -> Self {
        Self::Configuration {
            message: error.to_string(),
        }
    }
}
