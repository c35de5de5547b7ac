// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Stripe payment-intent integration.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::info;

use super::{PaymentError, PaymentProvider};

pub const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";
const PAYMENT_INTENTS_PATH: &str = "/v1/payment_intents";
const PAYMENT_METHOD_TYPE: &str = "card";

#[derive(Clone)]
pub struct StripeClient {
    api_base_url: String,
    secret_key: String,
    http: Client,
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("api_base_url", &self.api_base_url)
            .field("secret_key", &"[redacted]")
            .finish()
    }
}

impl StripeClient {
    pub fn new(
        api_base_url: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, PaymentError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| PaymentError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_base_url: api_base_url.into(),
            secret_key: secret_key.into(),
            http,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.api_base_url.trim_end_matches('/'),
            PAYMENT_INTENTS_PATH
        )
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    async fn create_intent(&self, amount_minor: u64, currency: &str) -> Result<String, PaymentError> {
        let form = [
            ("amount", amount_minor.to_string()),
            ("currency", currency.to_string()),
            ("payment_method_types[]", PAYMENT_METHOD_TYPE.to_string()),
        ];

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                PaymentError::Request(format!("POST {PAYMENT_INTENTS_PATH} failed: {e}"))
            })?;

        let status = response.status();
        let body: Value = response.json().await.map_err(|e| {
            PaymentError::InvalidResponse(format!("POST {PAYMENT_INTENTS_PATH} invalid JSON: {e}"))
        })?;

        if !status.is_success() {
            let message = body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .unwrap_or("no error message")
                .to_string();
            return Err(PaymentError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let client_secret = body
            .get("client_secret")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                PaymentError::InvalidResponse("missing client_secret in response".to_string())
            })?
            .to_string();

        let intent_id = body.get("id").and_then(Value::as_str).unwrap_or("unknown");
        info!(
            %intent_id,
            amount_minor,
            %currency,
            "Stripe payment intent created"
        );

        Ok(client_secret)
    }
}
