// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token codec: issues and verifies HS256-signed session tokens.
//!
//! A token carries the subject email and a fixed 24 hour validity window.
//! Verification has no clock-skew leeway, and every failure (bad signature,
//! malformed token, expiry) collapses into [`AuthError::InvalidToken`].

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::{claims::TokenClaims, AuthError};

/// Validity window of an issued token (24 hours).
pub const TOKEN_LIFETIME_SECS: i64 = 24 * 60 * 60;

/// Signs and verifies tokens with a process-wide secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Issue a token for `email`, valid for 24 hours from now.
    pub fn issue(&self, email: &str) -> Result<String, AuthError> {
        self.issue_at(email, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (Unix seconds).
    pub fn issue_at(&self, email: &str, now: i64) -> Result<String, AuthError> {
        let claims = TokenClaims {
            email: email.to_string(),
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::InternalError(format!("failed to sign token: {e}")))
    }

    /// Verify `token` against the current time.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify `token` as if the current time were `now` (Unix seconds).
    pub fn verify_at(&self, token: &str, now: i64) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against the supplied clock.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let claims = decode::<TokenClaims>(token, &self.decoding, &validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token verification failed");
                AuthError::InvalidToken
            })?
            .claims;

        if now > claims.exp {
            tracing::debug!(email = %claims.email, exp = claims.exp, "Token expired");
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }
}
