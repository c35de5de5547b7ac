// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared fixtures for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tempfile::TempDir;

use crate::auth::{Role, TokenCodec};
use crate::providers::{PaymentBridge, PaymentError, PaymentProvider};
use crate::state::AppState;
use crate::storage::{Document, DocumentStore, UserRepository};

pub const TEST_SECRET: &[u8] = b"test-secret";

/// Provider that records each call and answers `secret_<amount>`.
#[derive(Default)]
pub struct FakeProvider {
    pub calls: Mutex<Vec<(u64, String)>>,
}

#[async_trait]
impl PaymentProvider for FakeProvider {
    async fn create_intent(&self, amount_minor: u64, currency: &str) -> Result<String, PaymentError> {
        self.calls
            .lock()
            .unwrap()
            .push((amount_minor, currency.to_string()));
        Ok(format!("secret_{amount_minor}"))
    }
}

/// State over a fresh store, without payments.
pub fn test_state() -> (AppState, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::open(&dir.path().join("test.redb")).unwrap();
    (AppState::new(store, TokenCodec::new(TEST_SECRET)), dir)
}

/// State over a fresh store with a recording payment provider.
pub fn test_state_with_payments() -> (AppState, Arc<FakeProvider>, TempDir) {
    let (state, dir) = test_state();
    let provider = Arc::new(FakeProvider::default());
    let state = state.with_payments(PaymentBridge::new(provider.clone(), "usd"));
    (state, provider, dir)
}

/// Store a user record with the given role.
pub fn seed_user(state: &AppState, email: &str, role: Role) {
    let users = UserRepository::new(&state.store);
    let mut profile = Document::new();
    profile.insert("name".to_string(), json!(email));
    users.upsert_profile(email, profile).unwrap();
    users.set_role(email, role).unwrap();
}

/// `Authorization` header value for `email`.
pub fn bearer(state: &AppState, email: &str) -> String {
    format!("Bearer {}", state.tokens.issue(email).unwrap())
}
