// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication and admin middleware for Axum.
//!
//! ## Gates
//!
//! - [`require_auth`] verifies the bearer token and attaches the
//!   [`AuthenticatedUser`] to the request extensions.
//! - [`require_admin`] must run after `require_auth`. It looks up the
//!   requester's stored record on every request and only lets admins through.
//!
//! ```rust,ignore
//! let admin_routes = Router::new()
//!     .route("/products", post(create_product))
//!     .route_layer(from_fn_with_state(state.clone(), require_admin))
//!     .route_layer(from_fn_with_state(state.clone(), require_auth));
//! ```

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{AuthError, AuthenticatedUser, TokenCodec};
use crate::state::AppState;
use crate::storage::{DocumentStore, UserRepository};

/// Auth gate: reject requests without a valid token.
///
/// - no `Authorization` header: 401
/// - token fails verification: 403
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(request.headers(), &state.tokens) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

/// Admin gate: reject requesters whose stored role is not `admin`.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(email) = request
        .extensions()
        .get::<AuthenticatedUser>()
        .map(|user| user.email.clone())
    else {
        tracing::error!("require_admin: AuthenticatedUser not found - ensure require_auth runs first");
        return AuthError::MissingAuthHeader.into_response();
    };

    match check_admin(&state.store, &email) {
        Ok(()) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}

/// Verify the bearer token in `headers`.
pub(crate) fn authenticate(
    headers: &HeaderMap,
    tokens: &TokenCodec,
) -> Result<AuthenticatedUser, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    let claims = tokens.verify(bearer_token(header))?;
    Ok(AuthenticatedUser::from_claims(claims))
}

/// Token part of an `Authorization` value: everything after the first space.
pub fn bearer_token(header: &str) -> &str {
    header.split_once(' ').map(|(_, token)| token).unwrap_or("")
}

fn check_admin(store: &DocumentStore, email: &str) -> Result<(), AuthError> {
    match UserRepository::new(store).role_of(email) {
        Ok(Some(role)) if role.is_admin() => Ok(()),
        Ok(Some(_)) => {
            tracing::warn!(%email, "Non-admin user attempted to access admin endpoint");
            Err(AuthError::InsufficientPermissions)
        }
        Ok(None) => {
            tracing::warn!(%email, "Admin check for token without a user record");
            Err(AuthError::UnknownRequester)
        }
        Err(e) => {
            tracing::error!(%email, error = %e, "Admin lookup failed");
            Err(AuthError::InternalError("role lookup failed".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Auth, Role};
    use crate::storage::Collection;
    use crate::test_support::{seed_user, test_state};
    use axum::{
        body::{to_bytes, Body},
        http::StatusCode,
        middleware::from_fn_with_state,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    async fn whoami(Auth(user): Auth) -> String {
        user.email
    }

    fn gated_router(state: AppState) -> Router {
        let authed = Router::new()
            .route("/me", get(whoami))
            .route_layer(from_fn_with_state(state.clone(), require_auth));
        let admin = Router::new()
            .route("/admin-only", get(whoami))
            .route_layer(from_fn_with_state(state.clone(), require_admin))
            .route_layer(from_fn_with_state(state.clone(), require_auth));
        authed.merge(admin).with_state(state)
    }

    async fn send(app: Router, path: &str, auth: Option<String>) -> (StatusCode, String) {
        let mut builder = axum::http::Request::builder().uri(path);
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        let response = app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn bearer_token_takes_text_after_first_space() {
        assert_eq!(bearer_token("Bearer abc.def"), "abc.def");
        assert_eq!(bearer_token("Bearer a b"), "a b");
        assert_eq!(bearer_token("abc"), "");
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let (state, _dir) = test_state();
        let (status, body) = send(gated_router(state), "/me", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("missing_auth_header"));
    }

    #[tokio::test]
    async fn invalid_token_is_forbidden() {
        let (state, _dir) = test_state();
        let (status, body) =
            send(gated_router(state), "/me", Some("Bearer not.a.token".to_string())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body.contains("invalid_token"));
    }

    #[tokio::test]
    async fn header_without_space_is_forbidden() {
        let (state, _dir) = test_state();
        let token = state.tokens.issue("a@x.com").unwrap();
        let (status, _) = send(gated_router(state), "/me", Some(token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn token_from_other_secret_is_forbidden() {
        let (state, _dir) = test_state();
        let token = TokenCodec::new(b"someone-else").issue("a@x.com").unwrap();
        let (status, _) =
            send(gated_router(state), "/me", Some(format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn valid_token_reaches_handler_with_claim() {
        let (state, _dir) = test_state();
        let token = state.tokens.issue("a@x.com").unwrap();
        let (status, body) =
            send(gated_router(state), "/me", Some(format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "a@x.com");
    }

    #[tokio::test]
    async fn admin_gate_rejects_plain_user() {
        let (state, _dir) = test_state();
        seed_user(&state, "user@x.com", Role::User);
        let token = state.tokens.issue("user@x.com").unwrap();

        let (status, body) =
            send(gated_router(state), "/admin-only", Some(format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body.contains("insufficient_permissions"));
    }

    #[tokio::test]
    async fn admin_gate_rejects_unknown_requester() {
        let (state, _dir) = test_state();
        let token = state.tokens.issue("ghost@x.com").unwrap();

        let (status, body) =
            send(gated_router(state), "/admin-only", Some(format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body.contains("unknown_requester"));
    }

    #[tokio::test]
    async fn admin_gate_admits_admin() {
        let (state, _dir) = test_state();
        seed_user(&state, "boss@x.com", Role::Admin);
        let token = state.tokens.issue("boss@x.com").unwrap();

        let (status, body) =
            send(gated_router(state), "/admin-only", Some(format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "boss@x.com");
    }

    #[tokio::test]
    async fn admin_gate_requires_exact_lowercase_role() {
        let (state, _dir) = test_state();
        for (email, role) in [("upper@x.com", "ADMIN"), ("title@x.com", "Admin")] {
            let record = serde_json::json!({"email": email, "role": role});
            state
                .store
                .insert_one(Collection::Users, record.as_object().cloned().unwrap())
                .unwrap();

            let token = state.tokens.issue(email).unwrap();
            let (status, body) = send(
                gated_router(state.clone()),
                "/admin-only",
                Some(format!("Bearer {token}")),
            )
            .await;
            assert_eq!(status, StatusCode::FORBIDDEN, "role {role} passed the gate");
            assert!(body.contains("insufficient_permissions"));
        }
    }

    #[tokio::test]
    async fn admin_gate_without_token_is_unauthorized() {
        let (state, _dir) = test_state();
        let (status, _) = send(gated_router(state), "/admin-only", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
