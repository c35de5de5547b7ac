// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Payment Providers
//!
//! The storefront never touches card data. Checkout asks the provider for a
//! payment intent and hands its client secret back to the browser.
//!
//! Prices arrive in major currency units and are sent to the provider in
//! minor units (cents): `12.5` becomes `1250`.

use std::sync::Arc;

use async_trait::async_trait;

pub mod stripe;

pub use stripe::StripeClient;

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("payments are not configured")]
    Unconfigured,
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("payment provider request failed: {0}")]
    Request(String),
    #[error("payment provider returned an invalid response: {0}")]
    InvalidResponse(String),
    #[error("payment provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// External service that creates payment intents.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create an intent for `amount_minor` and return its client secret.
    async fn create_intent(&self, amount_minor: u64, currency: &str) -> Result<String, PaymentError>;
}

/// Convert a major-unit price to minor units, rounding to the nearest unit.
pub fn to_minor_units(total_price: f64) -> Result<u64, PaymentError> {
    if !total_price.is_finite() {
        return Err(PaymentError::InvalidAmount(
            "totalPrice must be a finite number".to_string(),
        ));
    }
    if total_price < 0.0 {
        return Err(PaymentError::InvalidAmount(
            "totalPrice must not be negative".to_string(),
        ));
    }

    let minor = (total_price * 100.0).round();
    if minor > u64::MAX as f64 {
        return Err(PaymentError::InvalidAmount("totalPrice is too large".to_string()));
    }
    Ok(minor as u64)
}

/// Provider plus the currency every intent is created in.
#[derive(Clone)]
pub struct PaymentBridge {
    provider: Arc<dyn PaymentProvider>,
    currency: String,
}

impl PaymentBridge {
    pub fn new(provider: Arc<dyn PaymentProvider>, currency: impl Into<String>) -> Self {
        Self {
            provider,
            currency: currency.into(),
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Create an intent for `total_price` (major units) and return the
    /// provider's client secret unchanged.
    pub async fn create_intent(&self, total_price: f64) -> Result<String, PaymentError> {
        let amount_minor = to_minor_units(total_price)?;
        tracing::debug!(amount_minor, currency = %self.currency, "Creating payment intent");
        self.provider.create_intent(amount_minor, &self.currency).await
    }
}
