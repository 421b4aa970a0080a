//! Domain error types
//!
//! This module defines the error hierarchy for sheetforge. Errors are
//! domain-specific and don't expose third-party types; adapter errors are
//! converted to strings at the boundary.

use thiserror::Error;

/// Main sheetforge error type
///
/// A missing field during flattening is deliberately absent from this
/// hierarchy: resolution misses degrade to an empty cell and never surface.
#[derive(Debug, Error)]
pub enum SheetforgeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request rejected before a job was created
    #[error("Validation error: {0}")]
    Validation(String),

    /// Spreadsheet generation failed
    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    /// Job store failed
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Notification delivery failed
    #[error("Notification error: {0}")]
    Notification(String),

    /// Illegal job state transition
    #[error("Invalid job transition from {from} to {to}")]
    InvalidTransition {
        /// Current status
        from: String,
        /// Requested status
        to: String,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Spreadsheet writer errors
#[derive(Debug, Error)]
pub enum WriteError {
    /// Output file could not be created or written
    #[error("Failed to write output file: {0}")]
    Io(String),

    /// Workbook encoding failed
    #[error("Failed to encode workbook: {0}")]
    Encoding(String),

    /// Merge range or cell coordinates outside the sheet
    #[error("Invalid sheet layout: {0}")]
    Layout(String),
}

/// Job store errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Store could not be reached
    #[error("Job store unavailable: {0}")]
    Unavailable(String),

    /// Update targeted a job that was never created
    #[error("Job not found: {0}")]
    NotFound(String),

    /// Create targeted a job ID that already exists
    #[error("Job already exists: {0}")]
    Conflict(String),

    /// Stored job could not be decoded
    #[error("Corrupt job record: {0}")]
    Corrupt(String),
}

impl SheetforgeError {
    /// Render the error and its full source chain for operator diagnostics
    pub fn trace(&self) -> String {
        let mut trace = format!("{self}");
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            trace.push_str(&format!("\n  caused by: {cause}"));
            source = cause.source();
        }
        trace.push_str(&format!("\n\n{self:?}"));
        trace
    }
}

impl From<std::io::Error> for SheetforgeError {
    fn from(err: std::io::Error) -> Self {
        SheetforgeError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SheetforgeError {
    fn from(err: serde_json::Error) -> Self {
        SheetforgeError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for SheetforgeError {
    fn from(err: toml::de::Error) -> Self {
        SheetforgeError::Configuration(format!("TOML parse error: {err}"))
    }
}
