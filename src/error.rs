//! Error types for goalpost
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! A point lookup that finds nothing is not an error; it is `Ok(None)`.

use thiserror::Error;

/// The main error type for goalpost
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Query Plan Errors
    // ============================================================================
    #[error("Query plan error: {message}")]
    Plan { message: String },

    #[error("Invalid attribute name: '{name}'")]
    InvalidAttribute { name: String },

    // ============================================================================
    // Storage Errors
    // ============================================================================
    #[error("Storage {operation} failed: {message}")]
    Store { operation: String, message: String },

    #[error("Failed to decode stored item: {message}")]
    Codec { message: String },

    // ============================================================================
    // Cursor Errors
    // ============================================================================
    #[error("Invalid cursor: {message}")]
    Cursor { message: String },

    #[error("Page limit must be positive, got {limit}")]
    InvalidPageLimit { limit: u32 },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a query plan error
    pub fn plan(message: impl Into<String>) -> Self {
        Self::Plan {
            message: message.into(),
        }
    }

    /// Create an invalid attribute error
    pub fn invalid_attribute(name: impl Into<String>) -> Self {
        Self::InvalidAttribute { name: name.into() }
    }

    /// Create a storage error for the named operation
    pub fn store(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Store {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a codec error
    pub fn codec(message: impl Into<String>) -> Self {
        Self::Codec {
            message: message.into(),
        }
    }

    /// Create a cursor error
    pub fn cursor(message: impl Into<String>) -> Self {
        Self::Cursor {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error came from building a query plan
    pub fn is_build_error(&self) -> bool {
        matches!(self, Error::Plan { .. } | Error::InvalidAttribute { .. })
    }

    /// Check if this error came from talking to the store
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Error::Store { .. })
    }
}

/// Result type alias for goalpost
pub type Result<T> = std::result::Result<T, Error>;
