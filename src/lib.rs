// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Storefront Server - HTTP backend for an online shop
//!
//! Products, blogs, reviews, orders, payments and users stored in an
//! embedded document store, with bearer-token authentication, an admin role
//! gate and a Stripe payment-intent bridge.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token codec, auth gate and admin gate
//! - `providers` - Payment provider integration (Stripe)
//! - `storage` - Document store (redb) and per-collection repositories

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod providers;
pub mod state;
pub mod storage;

#[cfg(test)]
mod test_support;
