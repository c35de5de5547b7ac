// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Token-based authentication and the admin role check for the storefront API.
//!
//! ## Auth Flow
//!
//! 1. Client upserts its profile with `PUT /user/{email}` and receives a token
//! 2. Client sends `Authorization: Bearer <token>`
//! 3. Server:
//!    - Verifies the HS256 signature and expiry (no leeway)
//!    - Attaches the token's email to the request
//!    - On admin routes, looks up the user record and requires role `admin`
//!
//! Tokens are valid for 24 hours and are reissued, never refreshed.

pub mod claims;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod roles;
pub mod token;

pub use claims::{AuthenticatedUser, TokenClaims};
pub use error::AuthError;
pub use extractor::Auth;
pub use middleware::{require_admin, require_auth};
pub use roles::Role;
pub use token::{TokenCodec, TOKEN_LIFETIME_SECS};
