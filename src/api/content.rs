// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blog and review endpoints. All open.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::ApiError,
    models::{LimitQuery, WriteResponse},
    state::AppState,
    storage::{BlogRepository, Document, ReviewRepository},
};

#[utoipa::path(
    get,
    path = "/blogs",
    params(LimitQuery),
    tag = "Content",
    responses((status = 200, description = "Blog posts in storage order", body = [serde_json::Value]))
)]
pub async fn list_blogs(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    Ok(Json(BlogRepository::new(&state.store).list(query.limit())?))
}

#[utoipa::path(
    get,
    path = "/reviews",
    params(LimitQuery),
    tag = "Content",
    responses((status = 200, description = "Reviews, newest first", body = [serde_json::Value]))
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    Ok(Json(
        ReviewRepository::new(&state.store).list_latest(query.limit())?,
    ))
}

#[utoipa::path(
    post,
    path = "/review",
    tag = "Content",
    request_body = serde_json::Value,
    responses((status = 200, body = WriteResponse))
)]
pub async fn create_review(
    State(state): State<AppState>,
    Json(review): Json<Document>,
) -> Result<Json<WriteResponse>, ApiError> {
    let id = ReviewRepository::new(&state.store).create(review)?;
    Ok(Json(WriteResponse::inserted(id)))
}
