// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.
//!
//! `PUT /user/{email}` is the sign-in path: it stores the profile and hands
//! back a fresh token. Role changes and deletions go through the admin gate.

use axum::{
    extract::{Path, State},
    Json,
};

use super::write_result;
use crate::{
    auth::{Auth, Role},
    error::ApiError,
    models::{AdminStatusResponse, UserTokenResponse, WriteResponse},
    state::AppState,
    storage::{Document, UserRepository},
};

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = [serde_json::Value]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_users(
    Auth(_user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, ApiError> {
    Ok(Json(UserRepository::new(&state.store).list()?))
}

/// Create or update a profile and issue a 24 hour token for it.
///
/// A `role` field in the body is ignored.
#[utoipa::path(
    put,
    path = "/user/{email}",
    params(("email" = String, Path, description = "User email")),
    tag = "Users",
    request_body = serde_json::Value,
    responses((status = 200, body = UserTokenResponse))
)]
pub async fn upsert_user(
    Path(email): Path<String>,
    State(state): State<AppState>,
    Json(profile): Json<Document>,
) -> Result<Json<UserTokenResponse>, ApiError> {
    let outcome = UserRepository::new(&state.store).upsert_profile(&email, profile)?;
    let token = state.tokens.issue(&email)?;
    let response = UserTokenResponse::new(&outcome, token);
    tracing::info!(%email, created = response.upserted, "Profile stored, token issued");
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/user/admin/{email}",
    params(("email" = String, Path, description = "User to promote")),
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = WriteResponse),
        (status = 403, description = "Requester is not an admin"),
        (status = 404, description = "No such user")
    )
)]
pub async fn make_admin(
    Auth(requester): Auth,
    Path(email): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<WriteResponse>, ApiError> {
    set_role(&state, &requester.email, &email, Role::Admin)
}

#[utoipa::path(
    put,
    path = "/user/remove-admin/{email}",
    params(("email" = String, Path, description = "User to demote")),
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = WriteResponse),
        (status = 403, description = "Requester is not an admin"),
        (status = 404, description = "No such user")
    )
)]
pub async fn remove_admin(
    Auth(requester): Auth,
    Path(email): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<WriteResponse>, ApiError> {
    set_role(&state, &requester.email, &email, Role::User)
}

fn set_role(
    state: &AppState,
    requester: &str,
    email: &str,
    role: Role,
) -> Result<Json<WriteResponse>, ApiError> {
    let outcome = UserRepository::new(&state.store).set_role(email, role)?;
    if outcome.is_applied() {
        tracing::info!(%requester, %email, %role, "User role changed");
    }
    write_result(outcome, || format!("user {email}"))
}

#[utoipa::path(
    delete,
    path = "/user/{email}",
    params(("email" = String, Path, description = "User to delete")),
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = WriteResponse),
        (status = 403, description = "Requester is not an admin"),
        (status = 404, description = "No such user")
    )
)]
pub async fn delete_user(
    Auth(requester): Auth,
    Path(email): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<WriteResponse>, ApiError> {
    let outcome = UserRepository::new(&state.store).delete(&email)?;
    if outcome.is_applied() {
        tracing::info!(requester = %requester.email, %email, "User deleted");
    }
    write_result(outcome, || format!("user {email}"))
}

/// Whether `email` holds the admin role. Unknown users are not admins.
#[utoipa::path(
    get,
    path = "/admin/{email}",
    params(("email" = String, Path, description = "User email")),
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = AdminStatusResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn admin_status(
    Auth(_user): Auth,
    Path(email): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AdminStatusResponse>, ApiError> {
    let admin = UserRepository::new(&state.store)
        .role_of(&email)?
        .is_some_and(|role| role.is_admin());
    Ok(Json(AdminStatusResponse { admin }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthenticatedUser;
    use crate::test_support::{seed_user, test_state};
    use axum::http::StatusCode;
    use serde_json::json;

    fn auth(email: &str) -> Auth {
        Auth(AuthenticatedUser {
            email: email.to_string(),
        })
    }

    #[tokio::test]
    async fn upsert_issues_token_for_path_email() {
        let (state, _dir) = test_state();
        let profile = json!({"name": "Ann", "role": "admin"})
            .as_object()
            .cloned()
            .unwrap();

        let Json(response) = upsert_user(Path("ann@x.com".to_string()), State(state.clone()), Json(profile))
            .await
            .unwrap();
        assert!(response.success);
        assert!(response.upserted);
        assert_eq!(state.tokens.verify(&response.token).unwrap().email, "ann@x.com");

        let users = UserRepository::new(&state.store);
        assert_eq!(users.role_of("ann@x.com").unwrap(), Some(Role::User));

        let again = json!({"name": "Ann B"}).as_object().cloned().unwrap();
        let Json(second) = upsert_user(Path("ann@x.com".to_string()), State(state.clone()), Json(again))
            .await
            .unwrap();
        assert!(!second.upserted);
        assert_eq!(users.list().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn promote_and_demote() {
        let (state, _dir) = test_state();
        seed_user(&state, "bob@x.com", Role::User);

        make_admin(auth("boss@x.com"), Path("bob@x.com".to_string()), State(state.clone()))
            .await
            .unwrap();
        let Json(status) = admin_status(auth("bob@x.com"), Path("bob@x.com".to_string()), State(state.clone()))
            .await
            .unwrap();
        assert!(status.admin);

        remove_admin(auth("boss@x.com"), Path("bob@x.com".to_string()), State(state.clone()))
            .await
            .unwrap();
        let Json(status) = admin_status(auth("bob@x.com"), Path("bob@x.com".to_string()), State(state))
            .await
            .unwrap();
        assert!(!status.admin);
    }

    #[tokio::test]
    async fn promoting_unknown_user_is_not_found() {
        let (state, _dir) = test_state();
        let err = make_admin(auth("boss@x.com"), Path("ghost@x.com".to_string()), State(state.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert!(UserRepository::new(&state.store).list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn admin_status_of_unknown_user_is_false() {
        let (state, _dir) = test_state();
        let Json(status) = admin_status(auth("a@x.com"), Path("nobody@x.com".to_string()), State(state))
            .await
            .unwrap();
        assert_eq!(status, AdminStatusResponse { admin: false });
    }

    #[tokio::test]
    async fn delete_user_removes_record() {
        let (state, _dir) = test_state();
        seed_user(&state, "gone@x.com", Role::User);

        delete_user(auth("boss@x.com"), Path("gone@x.com".to_string()), State(state.clone()))
            .await
            .unwrap();
        assert!(UserRepository::new(&state.store)
            .find_by_email("gone@x.com")
            .unwrap()
            .is_none());
    }
}
