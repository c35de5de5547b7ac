// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Document Storage Module
//!
//! Persistent storage for the storefront collections using an embedded
//! redb database file.
//!
//! ## Collections
//!
//! ```text
//! products   catalogue entries, `inStock` quantity
//! reviews    customer reviews (listed newest-first)
//! blogs      read-only articles
//! orders     `email`, `totalPrice`, `paid`, `status`, `transactionId`
//! payments   one record per confirmed payment, linked by `orderId`
//! users      keyed by `email`, `role` is `user` or `admin`
//! ```
//!
//! Documents are schema-free JSON objects; handlers only rely on the fields
//! listed above.

pub mod document;
pub mod repository;
pub mod store;

pub use document::{
    Collection, Document, DocumentId, Filter, FindOptions, InvalidDocumentId, SortOrder, Update,
    WriteOutcome, ID_FIELD,
};
pub use repository::{
    BlogRepository, OrderRepository, PaymentReceipt, ProductRepository, ReviewRepository,
    UserRepository,
};
pub use store::{DocumentStore, StoreError, StoreResult, StoreTxn};
