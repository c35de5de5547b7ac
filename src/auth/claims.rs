// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and the authenticated requester.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims carried by a storefront token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject email
    pub email: String,

    /// Issued at (Unix seconds)
    pub iat: i64,

    /// Expiration (Unix seconds)
    pub exp: i64,
}

/// Requester identity attached to the request by the auth gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Email from the verified token
    pub email: String,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: TokenClaims) -> Self {
        Self {
            email: claims.email,
        }
    }

    /// Whether this requester is the owner of `email`'s resources.
    pub fn owns(&self, email: &str) -> bool {
        self.email == email
    }
}
