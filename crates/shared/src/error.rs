//! Application-wide error types.
//!
//! Repository errors from the database layer convert into `AppError`, which is
//! what the request-handling layer pattern-matches on to build a response.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Message returned in place of internal details for server-side failures.
pub const GENERIC_SERVER_ERROR: &str = "An internal error occurred";

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (e.g., an imbalanced journal).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict with current state (e.g., insufficient stock, duplicate SKU).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Required business configuration is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Configuration(_) => 422,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true for failures on the server side (5xx).
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Returns the message safe to show to a client.
    ///
    /// Server errors only expose their details when `expose_internal` is set,
    /// which callers tie to a non-production environment.
    #[must_use]
    pub fn public_message(&self, expose_internal: bool) -> String {
        if self.is_server_error() && !expose_internal {
            GENERIC_SERVER_ERROR.to_string()
        } else {
            self.to_string()
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
