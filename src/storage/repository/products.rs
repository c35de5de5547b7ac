// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Product catalogue repository.
//!
//! Product documents are opaque apart from `inStock`, the integer quantity
//! overwritten by checkout clients.

use serde_json::json;

use super::super::{
    Collection, Document, DocumentId, DocumentStore, Filter, FindOptions, StoreResult, Update,
    WriteOutcome,
};

/// Field holding the available quantity.
pub const IN_STOCK_FIELD: &str = "inStock";

pub struct ProductRepository<'a> {
    store: &'a DocumentStore,
}

impl<'a> ProductRepository<'a> {
    pub fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    /// List products in storage order.
    pub fn list(&self, limit: Option<usize>) -> StoreResult<Vec<Document>> {
        self.store.find(
            Collection::Products,
            &Filter::All,
            FindOptions::default().limit(limit),
        )
    }

    pub fn get(&self, id: DocumentId) -> StoreResult<Option<Document>> {
        self.store.find_by_id(Collection::Products, id)
    }

    pub fn create(&self, product: Document) -> StoreResult<DocumentId> {
        self.store.insert_one(Collection::Products, product)
    }

    /// Overwrite the stock quantity.
    pub fn set_stock(&self, id: DocumentId, in_stock: u64) -> StoreResult<WriteOutcome> {
        let mut set = Document::new();
        set.insert(IN_STOCK_FIELD.to_string(), json!(in_stock));
        self.store
            .update_one(Collection::Products, &Filter::Id(id), &Update::set(set))
    }

    /// Merge arbitrary fields into the product.
    pub fn edit(&self, id: DocumentId, fields: Document) -> StoreResult<WriteOutcome> {
        self.store
            .update_one(Collection::Products, &Filter::Id(id), &Update::set(fields))
    }

    pub fn delete(&self, id: DocumentId) -> StoreResult<WriteOutcome> {
        self.store.delete_one(Collection::Products, &Filter::Id(id))
    }
}
