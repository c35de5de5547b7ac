// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Product catalogue endpoints.
//!
//! Reads and stock updates are open; creating, editing and deleting
//! products is reserved for admins.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::write_result;
use crate::{
    error::ApiError,
    models::{LimitQuery, StockUpdateRequest, WriteResponse},
    state::AppState,
    storage::{Document, DocumentId, ProductRepository},
};

#[utoipa::path(
    get,
    path = "/products",
    params(LimitQuery),
    tag = "Products",
    responses((status = 200, description = "Products in storage order", body = [serde_json::Value]))
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let products = ProductRepository::new(&state.store).list(query.limit())?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/product/{id}",
    params(("id" = String, Path, description = "Product identifier")),
    tag = "Products",
    responses(
        (status = 200, body = serde_json::Value),
        (status = 400, description = "Malformed identifier"),
        (status = 404, description = "No such product")
    )
)]
pub async fn get_product(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Document>, ApiError> {
    let id: DocumentId = id.parse()?;
    ProductRepository::new(&state.store)
        .get(id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("product {id} not found")))
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    request_body = serde_json::Value,
    responses(
        (status = 200, body = WriteResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requester is not an admin")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(product): Json<Document>,
) -> Result<Json<WriteResponse>, ApiError> {
    let id = ProductRepository::new(&state.store).create(product)?;
    tracing::info!(product_id = %id, "Product created");
    Ok(Json(WriteResponse::inserted(id)))
}

/// Overwrite the stock quantity of a product.
#[utoipa::path(
    put,
    path = "/product/{id}",
    params(("id" = String, Path, description = "Product identifier")),
    tag = "Products",
    request_body = StockUpdateRequest,
    responses(
        (status = 200, body = WriteResponse),
        (status = 404, description = "No such product")
    )
)]
pub async fn update_stock(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<StockUpdateRequest>,
) -> Result<Json<WriteResponse>, ApiError> {
    let id: DocumentId = id.parse()?;
    let outcome = ProductRepository::new(&state.store).set_stock(id, request.in_stock)?;
    write_result(outcome, || format!("product {id}"))
}

/// Merge the body into a product document.
#[utoipa::path(
    patch,
    path = "/product/{id}",
    params(("id" = String, Path, description = "Product identifier")),
    tag = "Products",
    security(("bearer_auth" = [])),
    request_body = serde_json::Value,
    responses(
        (status = 200, body = WriteResponse),
        (status = 403, description = "Requester is not an admin"),
        (status = 404, description = "No such product")
    )
)]
pub async fn edit_product(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(fields): Json<Document>,
) -> Result<Json<WriteResponse>, ApiError> {
    let id: DocumentId = id.parse()?;
    let outcome = ProductRepository::new(&state.store).edit(id, fields)?;
    write_result(outcome, || format!("product {id}"))
}

#[utoipa::path(
    delete,
    path = "/product/{id}",
    params(("id" = String, Path, description = "Product identifier")),
    tag = "Products",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = WriteResponse),
        (status = 403, description = "Requester is not an admin"),
        (status = 404, description = "No such product")
    )
)]
pub async fn delete_product(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<WriteResponse>, ApiError> {
    let id: DocumentId = id.parse()?;
    let outcome = ProductRepository::new(&state.store).delete(id)?;
    if outcome.is_applied() {
        tracing::info!(product_id = %id, "Product deleted");
    }
    write_result(outcome, || format!("product {id}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;
    use axum::http::StatusCode;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn create_then_get_product() {
        let (state, _dir) = test_state();
        let Json(created) = create_product(
            State(state.clone()),
            Json(doc(json!({"name": "Drill", "inStock": 3}))),
        )
        .await
        .unwrap();
        assert!(created.success);

        let id = created.inserted_id.unwrap();
        let Json(product) = get_product(Path(id.clone()), State(state)).await.unwrap();
        assert_eq!(product["name"], "Drill");
        assert_eq!(product["_id"], json!(id));
    }

    #[tokio::test]
    async fn get_product_rejects_malformed_id() {
        let (state, _dir) = test_state();
        let err = get_product(Path("not-an-id".to_string()), State(state))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "invalid_id");
    }

    #[tokio::test]
    async fn get_missing_product_is_not_found() {
        let (state, _dir) = test_state();
        let id = DocumentId::generate().to_string();
        let err = get_product(Path(id), State(state)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_stock_on_missing_product_is_not_found() {
        let (state, _dir) = test_state();
        let id = DocumentId::generate().to_string();
        let err = update_stock(Path(id), State(state), Json(StockUpdateRequest { in_stock: 1 }))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn edit_merges_fields_and_delete_removes() {
        let (state, _dir) = test_state();
        let id = ProductRepository::new(&state.store)
            .create(doc(json!({"name": "Saw", "price": 10, "inStock": 1})))
            .unwrap();

        edit_product(
            Path(id.to_string()),
            State(state.clone()),
            Json(doc(json!({"price": 12}))),
        )
        .await
        .unwrap();

        let product = ProductRepository::new(&state.store).get(id).unwrap().unwrap();
        assert_eq!(product["price"], 12);
        assert_eq!(product["name"], "Saw");

        let Json(deleted) = delete_product(Path(id.to_string()), State(state.clone()))
            .await
            .unwrap();
        assert!(deleted.success);

        let err = delete_product(Path(id.to_string()), State(state))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_products_honours_limit() {
        let (state, _dir) = test_state();
        let repo = ProductRepository::new(&state.store);
        for n in 0..5 {
            repo.create(doc(json!({"n": n}))).unwrap();
        }

        let Json(all) = list_products(State(state.clone()), Query(LimitQuery::default()))
            .await
            .unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0]["n"], 0);

        let query = LimitQuery {
            limit: Some("2".to_string()),
        };
        let Json(some) = list_products(State(state), Query(query)).await.unwrap();
        assert_eq!(some.len(), 2);
    }
}
