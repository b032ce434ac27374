//! Application error taxonomy.
//!
//! Every error is recoverable: handlers surface it as a transient toast or an
//! HTTP status, never as a process failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::notify::Toast;

/// Errors raised by the view-models and the external collaborators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// User input was rejected before any state changed.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A mock reply is still outstanding for this conversation.
    #[error("A reply is already pending")]
    ReplyPending,

    /// The conversational backend could not be reached.
    #[error("Backend unavailable: {0}")]
    Transport(String),

    /// Credentials were rejected by the authentication provider.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A referenced message, chat or route does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// HTTP status used when the error leaves the JSON API.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ReplyPending => StatusCode::CONFLICT,
            Self::Transport(_) => StatusCode::BAD_GATEWAY,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Whether the error should be swallowed by fragment handlers.
    ///
    /// Empty submissions and double submissions are silent no-ops in the UI.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::ReplyPending)
    }

    /// User-facing notification for this error.
    #[must_use]
    pub fn toast(&self) -> Toast {
        let title = match self {
            Self::Validation(_) => "Check your input",
            Self::ReplyPending => "Please wait",
            Self::Transport(_) => "Connection problem",
            Self::Auth(_) => "Sign-in failed",
            Self::NotFound(_) => "Not found",
        };
        Toast::error(title, self.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Result alias for view-model operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ToastKind;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Validation("empty".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(AppError::ReplyPending.status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Transport("down".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::NotFound("msg".into()).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_silent_errors() {
        assert!(AppError::Validation("empty".into()).is_silent());
        assert!(AppError::ReplyPending.is_silent());
        assert!(!AppError::Transport("down".into()).is_silent());
    }

    #[test]
    fn test_toast_carries_message() {
        let toast = AppError::Transport("timeout".into()).toast();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.title, "Connection problem");
        assert!(toast.description.contains("timeout"));
    }
}
