// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication and authorization errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication error type.
///
/// Token problems never reveal why verification failed: a bad signature,
/// a malformed token and an expired token are all `InvalidToken`.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No authorization header present
    #[error("Unauthorized access")]
    MissingAuthHeader,
    /// Token failed verification (malformed, wrong signature or expired)
    #[error("Forbidden access")]
    InvalidToken,
    /// Token is valid but no user record exists for its email
    #[error("Forbidden access")]
    UnknownRequester,
    /// Requester lacks the role or ownership the route requires
    #[error("Forbidden access")]
    InsufficientPermissions,
    /// Internal error
    #[error("Internal authentication error: {0}")]
    InternalError(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidToken => "invalid_token",
            AuthError::UnknownRequester => "unknown_requester",
            AuthError::InsufficientPermissions => "insufficient_permissions",
            AuthError::InternalError(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken
            | AuthError::UnknownRequester
            | AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
            AuthError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
