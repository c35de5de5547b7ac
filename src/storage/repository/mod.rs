// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing named operations over the document store.
//!
//! Each repository borrows the [`DocumentStore`](super::DocumentStore) and
//! exposes the reads and writes one collection needs.

pub mod content;
pub mod orders;
pub mod products;
pub mod users;

pub use content::{BlogRepository, ReviewRepository};
pub use orders::{OrderRepository, PaymentReceipt};
pub use products::ProductRepository;
pub use users::UserRepository;
