// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Reviews and blog posts: read-mostly content documents.

use super::super::{Collection, Document, DocumentId, DocumentStore, Filter, FindOptions, StoreResult};

pub struct ReviewRepository<'a> {
    store: &'a DocumentStore,
}

impl<'a> ReviewRepository<'a> {
    pub fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    /// Latest reviews first.
    pub fn list_latest(&self, limit: Option<usize>) -> StoreResult<Vec<Document>> {
        self.store.find(
            Collection::Reviews,
            &Filter::All,
            FindOptions::default().limit(limit).newest_first(),
        )
    }

    pub fn create(&self, review: Document) -> StoreResult<DocumentId> {
        self.store.insert_one(Collection::Reviews, review)
    }
}

pub struct BlogRepository<'a> {
    store: &'a DocumentStore,
}

impl<'a> BlogRepository<'a> {
    pub fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    pub fn list(&self, limit: Option<usize>) -> StoreResult<Vec<Document>> {
        self.store
            .find(Collection::Blogs, &Filter::All, FindOptions::default().limit(limit))
    }
}
