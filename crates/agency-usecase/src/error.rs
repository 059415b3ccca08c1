//! Error taxonomy shared by every use case
//!
//! An [`AppError`] carries two messages: one for the log, with whatever
//! detail helps debugging, and one that is safe to hand back to a client.
//! Persistence failures never leak into the client message.

use agency_domain::{RepositoryError, RuleViolation};
use thiserror::Error;

const DATABASE_CLIENT_MESSAGE: &str = "database raised an error";
const INTERNAL_CLIENT_MESSAGE: &str = "internal server error";

/// What went wrong, from the caller's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Entity referenced by id does not exist
    NotFound,
    /// Caller-supplied data violates a static constraint
    InvalidArgument,
    /// Operation violates a lifecycle rule
    Conflict,
    /// Opaque persistence failure
    Database,
    /// Anything unclassified
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Database => "database_error",
            ErrorKind::Internal => "internal",
        }
    }

    /// Caused by the caller rather than by the system
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::NotFound | ErrorKind::InvalidArgument | ErrorKind::Conflict
        )
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified failure of a use case
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    client_message: String,
}

impl AppError {
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        client_message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            client_message: client_message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>, client_message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message, client_message)
    }

    pub fn invalid_argument(
        message: impl Into<String>,
        client_message: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::InvalidArgument, message, client_message)
    }

    pub fn conflict(message: impl Into<String>, client_message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message, client_message)
    }

    /// The client only ever sees a generic message
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message, DATABASE_CLIENT_MESSAGE)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message, INTERNAL_CLIENT_MESSAGE)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Log-worthy detail
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Safe to serialize into a response body
    pub fn client_message(&self) -> &str {
        &self.client_message
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => AppError::not_found(
                format!("{} {} vanished during write", entity, id),
                format!("there is no {} with such id", entity),
            ),
            other => AppError::database(other.to_string()),
        }
    }
}

impl From<RuleViolation> for AppError {
    fn from(violation: RuleViolation) -> Self {
        let message = violation.to_string();
        match violation {
            RuleViolation::TargetCount { .. } => {
                AppError::invalid_argument(message.clone(), message)
            }
            _ => AppError::conflict(message.clone(), message),
        }
    }
}

/// Result type alias for use case operations
pub type AppResult<T> = Result<T, AppError>;
