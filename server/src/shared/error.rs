//! Shared error types for the application
//!
//! This module defines all error types used across the application,
//! following domain-driven design principles.

use thiserror::Error;

/// Domain errors - errors that occur in the domain layer
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Repository errors - errors that occur during data access
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    RepositoryError::Duplicate(db_err.message().to_string())
                } else if db_err.is_check_violation() {
                    RepositoryError::ConstraintViolation(db_err.message().to_string())
                } else {
                    RepositoryError::Database(db_err.message().to_string())
                }
            }
            sqlx::Error::RowNotFound => RepositoryError::NotFound("row not found".to_string()),
            sqlx::Error::PoolTimedOut => {
                RepositoryError::Connection("Connection pool timeout".to_string())
            }
            sqlx::Error::PoolClosed => {
                RepositoryError::Connection("Connection pool closed".to_string())
            }
            _ => RepositoryError::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

/// TMDB catalog client errors
#[derive(Debug, Clone, Error)]
pub enum TmdbError {
    #[error("API error: {0}")]
    ApiError(u16),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl From<reqwest::Error> for TmdbError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TmdbError::Network("Request timeout".to_string())
        } else if err.is_connect() {
            TmdbError::Network("Connection failed".to_string())
        } else {
            TmdbError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TmdbError {
    fn from(err: serde_json::Error) -> Self {
        TmdbError::Deserialization(err.to_string())
    }
}

/// OpenAI classifier client errors
#[derive(Debug, Clone, Error)]
pub enum OpenAiError {
    #[error("Missing API key")]
    MissingApiKey,

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("API error: {0}")]
    ApiError(u16),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response shape: {0}")]
    UnexpectedResponse(String),
}

impl From<reqwest::Error> for OpenAiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OpenAiError::Network("Request timeout".to_string())
        } else {
            OpenAiError::Network(err.to_string())
        }
    }
}

/// Pipeline execution errors
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    #[error("Stage '{stage}' failed: {message}")]
    ExecutionFailed { stage: String, message: String },
}

/// Application errors - errors that occur in the application layer
#[derive(Debug, Clone, Error)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("TMDB error: {0}")]
    Tmdb(#[from] TmdbError),

    #[error("OpenAI error: {0}")]
    OpenAi(#[from] OpenAiError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// True when the failure is a pipeline abort that the request facade may
    /// retry with a reduced input (basename instead of the full path).
    pub fn is_pipeline_fatal(&self) -> bool {
        matches!(self, ApplicationError::Pipeline(_))
    }
}
