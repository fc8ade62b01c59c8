//! Core error types for mobirec-core.
//!
//! This module defines the error hierarchy using thiserror. Questionnaire
//! errors are programming-error class (the manifest and the caller disagree),
//! prediction errors are recoverable and always retryable.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for mobirec-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Questionnaire/answer-store errors
    #[error("Questionnaire error: {0}")]
    Questionnaire(#[from] QuestionnaireError),

    /// Prediction service errors
    #[error("Prediction failed: {0}")]
    Prediction(#[from] PredictionError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors raised by the question manifest and the answer store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuestionnaireError {
    /// Key is not part of the fixed question set
    #[error("Unknown question key: {0}")]
    UnknownKey(String),

    /// Value outside the legal domain of the question
    #[error("Value '{value}' is not allowed for '{key}' (expected {expected})")]
    OutOfDomainValue {
        key: String,
        value: String,
        expected: String,
    },

    /// Question index outside `0..len`
    #[error("Question index {index} out of bounds (length: {len})")]
    InvalidQuestionIndex { index: usize, len: usize },

    /// Manifest has no questions
    #[error("Question manifest is empty")]
    EmptyManifest,

    /// Two questions share a key
    #[error("Duplicate question key: {0}")]
    DuplicateKey(String),

    /// Manifest entry is malformed
    #[error("Invalid question '{key}': {message}")]
    InvalidManifest { key: String, message: String },
}

/// Failure of the external prediction call.
///
/// Every variant is treated the same way by the wizard: stay on review,
/// leave the answers alone, notify once.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PredictionError {
    /// Connection, timeout or request building failure
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("prediction service returned HTTP {0}")]
    Status(u16),

    /// Body is not the expected JSON
    #[error("malformed response body: {0}")]
    MalformedBody(String),

    /// Body lacks a usable label field
    #[error("response has no '{0}' label")]
    MissingLabel(String),

    /// Predictor reported success with a blank label
    #[error("prediction service returned an empty label")]
    EmptyLabel,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Config directory cannot be determined or created
    #[error("Config directory unavailable: {0}")]
    DirUnavailable(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
