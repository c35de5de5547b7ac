// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::error::Error;
use std::sync::Arc;

use storefront_server::{
    api::router,
    auth::TokenCodec,
    config::AppConfig,
    logging::init_tracing,
    providers::{PaymentBridge, StripeClient},
    state::AppState,
    storage::DocumentStore,
};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env is optional; real environment variables win
    let dotenv = dotenvy::dotenv();

    let config = AppConfig::from_env()?;
    init_tracing(config.log_format);

    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded environment file");
    }

    let store_path = config.store_path();
    let store = DocumentStore::open(&store_path)?;
    info!(path = %store_path.display(), "Document store opened");

    let mut state = AppState::new(store, TokenCodec::new(config.jwt_secret.as_bytes()));

    match &config.stripe {
        Some(stripe) => {
            let client = StripeClient::new(&stripe.api_base_url, &stripe.secret_key)?;
            state = state.with_payments(PaymentBridge::new(Arc::new(client), &config.currency));
            info!(currency = %config.currency, "Payment intents enabled");
        }
        None => warn!("STRIPE_SECRET_KEY not set - payment intents disabled"),
    }

    let app = router(state);

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Storefront server listening (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
