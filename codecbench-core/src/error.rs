//! Custom error types for codecbench.
//!
//! Explicit enum error types only. Failures are contained at the per-codec
//! boundary: the runner turns each of these into a failed measurement record
//! instead of aborting the whole run.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the benchmark harness.
#[derive(Debug, Error)]
pub enum BenchError {
    // =========================================================================
    // Configuration Errors - Fail-Fast on Invalid Config
    // =========================================================================
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    // =========================================================================
    // Codec Errors - Reported Per Codec, Never Abort the Run
    // =========================================================================
    #[error("Codec '{codec}' cannot be configured for this payload: {reason}")]
    Configuration { codec: String, reason: String },

    #[error("Codec '{codec}' failed to encode: {message}")]
    Encode { codec: String, message: String },

    #[error("Codec '{codec}' failed to decode: {message}")]
    Decode { codec: String, message: String },

    #[error("Codec '{codec}' does not support {operation}")]
    Unsupported {
        codec: String,
        operation: &'static str,
    },

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl BenchError {
    /// True for failures detected before the timed phase starts.
    pub fn is_setup_failure(&self) -> bool {
        matches!(
            self,
            BenchError::Validation(_)
                | BenchError::ConfigNotFound { .. }
                | BenchError::ConfigParse { .. }
                | BenchError::Configuration { .. }
                | BenchError::Unsupported { .. }
        )
    }
}

/// Invalid configuration values. Detected while loading, before any codec runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid field value: {field} = {value} - {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unknown codec: {name} (available: {available})")]
    UnknownCodec { name: String, available: String },

    #[error("Duplicate codec entry: {name}")]
    DuplicateCodec { name: String },

    #[error("Unknown payload kind: {value}")]
    UnknownPayload { value: String },
}

/// Result type alias using BenchError.
pub type BenchResult<T> = Result<T, BenchError>;
