// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{PaymentIntentRequest, PaymentIntentResponse},
    state::AppState,
};

/// Create a payment intent for an order total and return its client secret.
///
/// `totalPrice` is in major currency units; the provider is charged in
/// minor units.
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "Payments",
    security(("bearer_auth" = [])),
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, body = PaymentIntentResponse),
        (status = 400, description = "Negative or non-finite totalPrice"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Payment provider failed"),
        (status = 503, description = "Payments not configured")
    )
)]
pub async fn create_payment_intent(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<PaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>, ApiError> {
    let bridge = state.payments()?;
    let client_secret = bridge.create_intent(request.total_price).await?;
    tracing::info!(
        requester = %user.email,
        total_price = request.total_price,
        currency = bridge.currency(),
        "Payment intent created"
    );
    Ok(Json(PaymentIntentResponse { client_secret }))
}
