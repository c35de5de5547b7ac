// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Order endpoints.
//!
//! Anyone may place or delete an order. Reading, paying and changing the
//! status of an order require a valid token, and a user may only list
//! their own orders.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use super::write_result;
use crate::{
    auth::{Auth, AuthError},
    error::ApiError,
    models::{PaymentConfirmationResponse, StatusUpdateRequest, WriteResponse},
    state::AppState,
    storage::{Document, DocumentId, OrderRepository},
};

#[utoipa::path(
    post,
    path = "/order",
    tag = "Orders",
    request_body = serde_json::Value,
    responses((status = 200, body = WriteResponse))
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(order): Json<Document>,
) -> Result<Json<WriteResponse>, ApiError> {
    let id = OrderRepository::new(&state.store).create(order)?;
    tracing::info!(order_id = %id, "Order placed");
    Ok(Json(WriteResponse::inserted(id)))
}

#[utoipa::path(
    get,
    path = "/order/{id}",
    params(("id" = String, Path, description = "Order identifier")),
    tag = "Orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = serde_json::Value),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No such order")
    )
)]
pub async fn get_order(
    Auth(_user): Auth,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Document>, ApiError> {
    let id: DocumentId = id.parse()?;
    OrderRepository::new(&state.store)
        .get(id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("order {id} not found")))
}

/// Record a payment for the order and mark it paid.
///
/// The body is stored as the payment record and must carry a string
/// `transactionId`. Both writes happen in one transaction.
#[utoipa::path(
    patch,
    path = "/order/{id}",
    params(("id" = String, Path, description = "Order identifier")),
    tag = "Orders",
    security(("bearer_auth" = [])),
    request_body = serde_json::Value,
    responses(
        (status = 200, body = PaymentConfirmationResponse),
        (status = 400, description = "Missing transactionId"),
        (status = 404, description = "No such order; nothing recorded")
    )
)]
pub async fn confirm_payment(
    Auth(user): Auth,
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payment): Json<Document>,
) -> Result<Json<PaymentConfirmationResponse>, ApiError> {
    let id: DocumentId = id.parse()?;
    let transaction_id = payment
        .get("transactionId")
        .and_then(Value::as_str)
        .filter(|tx| !tx.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::bad_request("transactionId must be a non-empty string"))?;

    let receipt = OrderRepository::new(&state.store)
        .record_payment(id, &transaction_id, payment)?
        .ok_or_else(|| ApiError::not_found(format!("order {id} not found")))?;

    tracing::info!(
        order_id = %receipt.order_id,
        payment_id = %receipt.payment_id,
        %transaction_id,
        requester = %user.email,
        "Order paid"
    );

    Ok(Json(PaymentConfirmationResponse {
        success: true,
        order_id: receipt.order_id.to_string(),
        payment_id: receipt.payment_id.to_string(),
        transaction_id,
    }))
}

#[utoipa::path(
    put,
    path = "/order/{id}",
    params(("id" = String, Path, description = "Order identifier")),
    tag = "Orders",
    security(("bearer_auth" = [])),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, body = WriteResponse),
        (status = 404, description = "No such order")
    )
)]
pub async fn update_status(
    Auth(_user): Auth,
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<WriteResponse>, ApiError> {
    let id: DocumentId = id.parse()?;
    let outcome = OrderRepository::new(&state.store).set_status(id, &request.status)?;
    write_result(outcome, || format!("order {id}"))
}

#[utoipa::path(
    delete,
    path = "/order/{id}",
    params(("id" = String, Path, description = "Order identifier")),
    tag = "Orders",
    responses(
        (status = 200, body = WriteResponse),
        (status = 404, description = "No such order")
    )
)]
pub async fn delete_order(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<WriteResponse>, ApiError> {
    let id: DocumentId = id.parse()?;
    let outcome = OrderRepository::new(&state.store).delete(id)?;
    write_result(outcome, || format!("order {id}"))
}

/// Orders placed by `email`. Only the owner may list them.
#[utoipa::path(
    get,
    path = "/orders/{email}",
    params(("email" = String, Path, description = "Owner email")),
    tag = "Orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = [serde_json::Value]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Token belongs to another user")
    )
)]
pub async fn list_orders_by_email(
    Auth(user): Auth,
    Path(email): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, ApiError> {
    if !user.owns(&email) {
        tracing::warn!(requester = %user.email, %email, "Order listing for another user refused");
        return Err(AuthError::InsufficientPermissions.into());
    }
    Ok(Json(OrderRepository::new(&state.store).list_by_email(&email)?))
}
