// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies with a fixed shape. Stored entities
//! (products, orders, reviews, blogs, users) are schema-free documents and
//! travel as plain JSON objects; only the fields handlers act on are typed
//! here.
//!
//! All bodies use camelCase on the wire.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::storage::{DocumentId, WriteOutcome};

// =============================================================================
// Listing
// =============================================================================

/// Optional `?limit=` on list routes.
///
/// Parsing is lenient: leading digits are used (`"3abc"` is 3), and an
/// absent, unparseable, zero or negative value means no limit.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct LimitQuery {
    /// Maximum number of documents to return.
    pub limit: Option<String>,
}

impl LimitQuery {
    pub fn limit(&self) -> Option<usize> {
        let raw = self.limit.as_deref()?.trim();
        let digits = raw.strip_prefix('+').unwrap_or(raw);
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        match digits[..end].parse::<usize>() {
            Ok(0) | Err(_) => None,
            Ok(n) => Some(n),
        }
    }
}

// =============================================================================
// Write results
// =============================================================================

/// Result of a create, update or delete.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WriteResponse {
    pub success: bool,
    /// Identifier of the created document, on inserts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inserted_id: Option<String>,
}

impl WriteResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            inserted_id: None,
        }
    }

    pub fn inserted(id: DocumentId) -> Self {
        Self {
            success: true,
            inserted_id: Some(id.to_string()),
        }
    }
}

// =============================================================================
// Products
// =============================================================================

/// Overwrite a product's stock quantity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockUpdateRequest {
    pub in_stock: u64,
}

// =============================================================================
// Orders
// =============================================================================

/// Change an order's status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    /// Free-form status, e.g. `pending`, `shipped`.
    pub status: String,
}

/// Identifiers written by a payment confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmationResponse {
    pub success: bool,
    pub order_id: String,
    pub payment_id: String,
    pub transaction_id: String,
}

// =============================================================================
// Users
// =============================================================================

/// Result of a profile upsert, with a fresh 24 hour token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserTokenResponse {
    pub success: bool,
    /// `true` when the user did not exist before.
    pub upserted: bool,
    pub token: String,
}

impl UserTokenResponse {
    pub fn new(outcome: &WriteOutcome, token: String) -> Self {
        Self {
            success: outcome.is_applied(),
            upserted: matches!(outcome, WriteOutcome::Upserted(_)),
            token,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AdminStatusResponse {
    pub admin: bool,
}

// =============================================================================
// Payments
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    /// Order total in major currency units (e.g. dollars).
    pub total_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    /// Provider client secret, returned verbatim.
    pub client_secret: String,
}
