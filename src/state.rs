// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::TokenCodec;
use crate::providers::{PaymentBridge, PaymentError};
use crate::storage::DocumentStore;

/// Shared handles passed to every handler.
///
/// Built once in `main` and cloned per request; nothing here is mutated
/// after startup.
#[derive(Clone)]
pub struct AppState {
    pub store: DocumentStore,
    pub tokens: Arc<TokenCodec>,
    /// `None` when no payment provider key is configured.
    pub payments: Option<PaymentBridge>,
}

impl AppState {
    pub fn new(store: DocumentStore, tokens: TokenCodec) -> Self {
        Self {
            store,
            tokens: Arc::new(tokens),
            payments: None,
        }
    }

    pub fn with_payments(mut self, payments: PaymentBridge) -> Self {
        self.payments = Some(payments);
        self
    }

    pub fn payments(&self) -> Result<&PaymentBridge, PaymentError> {
        self.payments.as_ref().ok_or(PaymentError::Unconfigured)
    }
}
