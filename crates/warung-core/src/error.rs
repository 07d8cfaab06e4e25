//! # Site Error Types
//!
//! Typed error handling for the warung site engine.
//! Fallible operations return `Result<T, SiteError>`.
//!
//! Configuration findings and checkout rejections are values, not errors;
//! they only become a `SiteError` at the HTTP boundary.

use crate::checkout::Rejection;
use thiserror::Error;

/// Core error type for site operations
#[derive(Debug, Error)]
pub enum SiteError {
    /// Site document could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// A color value is not a `#RRGGBB` hex triple
    #[error("Invalid color: {value}")]
    InvalidColor { value: String },

    /// Inquiry form is missing a required field
    #[error("Inquiry is missing required field: {field}")]
    InvalidInquiry { field: &'static str },

    /// Reservation form is missing a required field
    #[error("Reservation is missing required field: {field}")]
    InvalidReservation { field: &'static str },

    /// Reservations are switched off for this site
    #[error("Reservations are not available")]
    ReservationsDisabled,

    /// Session expired or never existed
    #[error("Session not found or expired: {session_id}")]
    SessionNotFound { session_id: String },

    /// Checkout was rejected (cart left intact)
    #[error("Checkout rejected: {0}")]
    CheckoutRejected(Rejection),

    /// Command not allowed in the current checkout phase
    #[error("Invalid transition: {command} while {phase}")]
    InvalidTransition { command: String, phase: String },

    /// The session store is full
    #[error("Too many active sessions (limit {limit})")]
    SessionLimit { limit: usize },

    /// Missing or wrong admin token
    #[error("Unauthorized")]
    Unauthorized,
}

impl SiteError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            SiteError::Parse(_) => 500,
            SiteError::InvalidColor { .. } => 400,
            SiteError::InvalidInquiry { .. } => 400,
            SiteError::InvalidReservation { .. } => 400,
            SiteError::ReservationsDisabled => 403,
            SiteError::SessionNotFound { .. } => 404,
            SiteError::CheckoutRejected(_) => 422,
            SiteError::InvalidTransition { .. } => 409,
            SiteError::SessionLimit { .. } => 503,
            SiteError::Unauthorized => 401,
        }
    }

    /// Returns true if the user can fix this by changing their input and retrying
    pub fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            SiteError::CheckoutRejected(_)
                | SiteError::InvalidInquiry { .. }
                | SiteError::InvalidReservation { .. }
                | SiteError::InvalidTransition { .. }
        )
    }
}

impl From<toml::de::Error> for SiteError {
    fn from(err: toml::de::Error) -> Self {
        SiteError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for SiteError {
    fn from(err: serde_json::Error) -> Self {
        SiteError::Parse(err.to_string())
    }
}

/// Result type alias for site operations
pub type SiteResult<T> = Result<T, SiteError>;
