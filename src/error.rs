// src/error.rs

//! Error types for the review service.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for startup and wiring code.
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors that can stop the service from starting.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage failed
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Mail transport could not be set up
    #[error(transparent)]
    Notification(#[from] NotificationError),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Storage read or write failed. A failed write never leaves a row behind.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Stored timestamp '{0}' is not valid RFC 3339")]
    Timestamp(String),

    #[error("Stored rating {0} is outside 1..=5")]
    Rating(i64),
}

/// Outbound admin email failed. Never reported to the submitter.
#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Mail server did not answer within {0:?}")]
    TimedOut(Duration),
}
