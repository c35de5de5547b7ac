// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::AuthError;
use crate::providers::PaymentError;
use crate::storage::{InvalidDocumentId, StoreError};

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub code: &'static str,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    error_code: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
            error_code: self.code,
        });
        (self.status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => ApiError::not_found(format!("{what} not found")),
            other => {
                tracing::error!(error = %other, "Document store failure");
                ApiError::internal("storage error")
            }
        }
    }
}

impl From<InvalidDocumentId> for ApiError {
    fn from(err: InvalidDocumentId) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, "invalid_id", err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::new(err.status_code(), err.error_code(), err.to_string())
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Unconfigured => ApiError::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "payments_unconfigured",
                err.to_string(),
            ),
            PaymentError::InvalidAmount(_) => {
                ApiError::new(StatusCode::BAD_REQUEST, "invalid_amount", err.to_string())
            }
            PaymentError::Request(_)
            | PaymentError::InvalidResponse(_)
            | PaymentError::Rejected { .. } => {
                tracing::error!(error = %err, "Payment provider failure");
                ApiError::new(StatusCode::BAD_GATEWAY, "payment_provider_error", err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_message() {
        let nf = ApiError::not_found("missing");
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.message, "missing");
        assert_eq!(nf.code, "not_found");

        let bad = ApiError::bad_request("bad");
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);
        assert_eq!(bad.message, "bad");
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::bad_request("bad data").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"bad data","error_code":"bad_request"}"#);
    }

    #[test]
    fn invalid_id_is_bad_request() {
        let err: ApiError = InvalidDocumentId("nope".to_string()).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "invalid_id");
    }

    #[test]
    fn auth_errors_keep_status_and_code() {
        let err: ApiError = AuthError::MissingAuthHeader.into();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.code, "missing_auth_header");

        let err: ApiError = AuthError::InsufficientPermissions.into();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn payment_errors_map_to_gateway_statuses() {
        let err: ApiError = PaymentError::Unconfigured.into();
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.code, "payments_unconfigured");

        let err: ApiError = PaymentError::InvalidAmount("neg".to_string()).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err: ApiError = PaymentError::Rejected {
            status: 402,
            message: "card declined".to_string(),
        }
        .into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn store_failures_are_internal() {
        let io = std::io::Error::other("disk gone");
        let err: ApiError = StoreError::from(io).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "storage error");
    }
}
