// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Order repository, including payment confirmation.
//!
//! Orders carry the owner's `email`, `totalPrice`, `paid`, `status` and,
//! once paid, `transactionId`. Payment records live in their own collection
//! and are written in the same transaction as the order's paid transition.

use serde_json::{json, Value};

use super::super::{
    Collection, Document, DocumentId, DocumentStore, Filter, FindOptions, StoreError, StoreResult,
    Update, WriteOutcome,
};

pub const STATUS_PAID: &str = "paid";

/// Identifiers written by a successful payment confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub order_id: DocumentId,
    pub payment_id: DocumentId,
}

pub struct OrderRepository<'a> {
    store: &'a DocumentStore,
}

impl<'a> OrderRepository<'a> {
    pub fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    pub fn create(&self, order: Document) -> StoreResult<DocumentId> {
        self.store.insert_one(Collection::Orders, order)
    }

    pub fn get(&self, id: DocumentId) -> StoreResult<Option<Document>> {
        self.store.find_by_id(Collection::Orders, id)
    }

    /// All orders placed by `email`, in storage order.
    pub fn list_by_email(&self, email: &str) -> StoreResult<Vec<Document>> {
        self.store.find(
            Collection::Orders,
            &Filter::eq("email", email),
            FindOptions::default(),
        )
    }

    pub fn set_status(&self, id: DocumentId, status: &str) -> StoreResult<WriteOutcome> {
        let mut set = Document::new();
        set.insert("status".to_string(), Value::String(status.to_string()));
        self.store
            .update_one(Collection::Orders, &Filter::Id(id), &Update::set(set))
    }

    pub fn delete(&self, id: DocumentId) -> StoreResult<WriteOutcome> {
        self.store.delete_one(Collection::Orders, &Filter::Id(id))
    }

    /// Record a payment and mark the order paid, atomically.
    ///
    /// Returns `None` when the order does not exist; in that case the
    /// payment record is not kept either.
    pub fn record_payment(
        &self,
        order_id: DocumentId,
        transaction_id: &str,
        mut payment: Document,
    ) -> StoreResult<Option<PaymentReceipt>> {
        payment.insert("orderId".to_string(), Value::String(order_id.to_string()));
        payment.insert(
            "transactionId".to_string(),
            Value::String(transaction_id.to_string()),
        );

        let mut set = Document::new();
        set.insert("paid".to_string(), json!(true));
        set.insert("status".to_string(), json!(STATUS_PAID));
        set.insert("transactionId".to_string(), json!(transaction_id));

        let result = self.store.write(|txn| {
            let payment_id = txn.insert_one(Collection::Payments, payment)?;
            match txn.update_one(Collection::Orders, &Filter::Id(order_id), &Update::set(set))? {
                WriteOutcome::NotFound => Err(StoreError::NotFound(format!("order {order_id}"))),
                _ => Ok(PaymentReceipt {
                    order_id,
                    payment_id,
                }),
            }
        });

        match result {
            Ok(receipt) => Ok(Some(receipt)),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Payment records attached to an order.
    pub fn payments_for(&self, order_id: DocumentId) -> StoreResult<Vec<Document>> {
        self.store.find(
            Collection::Payments,
            &Filter::eq("orderId", order_id.to_string()),
            FindOptions::default(),
        )
    }
}
