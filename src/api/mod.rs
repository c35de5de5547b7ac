// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP routes.
//!
//! Routes fall into three groups by gate: open, token-protected
//! ([`require_auth`]) and admin-only ([`require_admin`] after
//! [`require_auth`]). A path may appear in several groups with different
//! methods.

use axum::{
    http::HeaderName,
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{require_admin, require_auth, AuthenticatedUser, Role},
    error::ApiError,
    models::{
        AdminStatusResponse, PaymentConfirmationResponse, PaymentIntentRequest,
        PaymentIntentResponse, StatusUpdateRequest, StockUpdateRequest, UserTokenResponse,
        WriteResponse,
    },
    state::AppState,
    storage::WriteOutcome,
};

pub mod content;
pub mod health;
pub mod orders;
pub mod payments;
pub mod products;
pub mod users;

const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(health::banner))
        .route("/health", get(health::health))
        .route("/products", get(products::list_products))
        .route(
            "/product/{id}",
            get(products::get_product).put(products::update_stock),
        )
        .route("/blogs", get(content::list_blogs))
        .route("/reviews", get(content::list_reviews))
        .route("/review", post(content::create_review))
        .route("/order", post(orders::create_order))
        .route("/order/{id}", delete(orders::delete_order))
        .route("/user/{email}", put(users::upsert_user));

    let authed_routes = Router::new()
        .route(
            "/order/{id}",
            get(orders::get_order)
                .patch(orders::confirm_payment)
                .put(orders::update_status),
        )
        .route("/orders/{email}", get(orders::list_orders_by_email))
        .route("/users", get(users::list_users))
        .route("/admin/{email}", get(users::admin_status))
        .route(
            "/create-payment-intent",
            post(payments::create_payment_intent),
        )
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    // Layers run bottom-up: require_auth first, then require_admin.
    let admin_routes = Router::new()
        .route("/products", post(products::create_product))
        .route(
            "/product/{id}",
            patch(products::edit_product).delete(products::delete_product),
        )
        .route("/user/admin/{email}", put(users::make_admin))
        .route("/user/remove-admin/{email}", put(users::remove_admin))
        .route("/user/{email}", delete(users::delete_user))
        .route_layer(from_fn_with_state(state.clone(), require_admin))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .merge(public_routes)
        .merge(authed_routes)
        .merge(admin_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

/// Map a write outcome to the standard response: 404 when nothing matched.
pub(crate) fn write_result(
    outcome: WriteOutcome,
    target: impl FnOnce() -> String,
) -> Result<Json<WriteResponse>, ApiError> {
    match outcome {
        WriteOutcome::Applied(_) | WriteOutcome::Upserted(_) => Ok(Json(WriteResponse::ok())),
        WriteOutcome::NotFound => Err(ApiError::not_found(format!("{} not found", target()))),
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::banner,
        health::health,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_stock,
        products::edit_product,
        products::delete_product,
        content::list_blogs,
        content::list_reviews,
        content::create_review,
        orders::create_order,
        orders::get_order,
        orders::confirm_payment,
        orders::update_status,
        orders::delete_order,
        orders::list_orders_by_email,
        users::list_users,
        users::upsert_user,
        users::make_admin,
        users::remove_admin,
        users::delete_user,
        users::admin_status,
        payments::create_payment_intent
    ),
    components(
        schemas(
            health::HealthResponse,
            AuthenticatedUser,
            Role,
            WriteResponse,
            StockUpdateRequest,
            StatusUpdateRequest,
            PaymentConfirmationResponse,
            UserTokenResponse,
            AdminStatusResponse,
            PaymentIntentRequest,
            PaymentIntentResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and store health"),
        (name = "Products", description = "Product catalogue"),
        (name = "Content", description = "Blogs and reviews"),
        (name = "Orders", description = "Orders and payment confirmation"),
        (name = "Users", description = "Profiles, tokens and admin roles"),
        (name = "Payments", description = "Payment intents")
    )
)]
struct ApiDoc;
