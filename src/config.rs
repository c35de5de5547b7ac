// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, defaults, and the [`AppConfig`] loaded from
//! them at startup. A `.env` file in the working directory is read first
//! (see `main.rs`); real environment variables take precedence.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `5000` |
//! | `DATA_DIR` | Directory holding the document store file | `./data` |
//! | `JWT_SECRET` | Token signing secret | Required |
//! | `STRIPE_SECRET_KEY` | Payment provider secret key | Optional (payments disabled) |
//! | `STRIPE_API_BASE_URL` | Payment provider base URL | `https://api.stripe.com` |
//! | `PAYMENT_CURRENCY` | Currency for payment intents | `usd` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::providers::stripe::DEFAULT_API_BASE_URL;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Directory holding `storefront.redb`. Created on startup if missing.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Secret used to sign and verify session tokens.
///
/// Changing it invalidates every issued token.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Stripe secret key. Without it `POST /create-payment-intent` answers 503.
pub const STRIPE_SECRET_KEY_ENV: &str = "STRIPE_SECRET_KEY";
pub const STRIPE_API_BASE_URL_ENV: &str = "STRIPE_API_BASE_URL";
pub const PAYMENT_CURRENCY_ENV: &str = "PAYMENT_CURRENCY";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_CURRENCY: &str = "usd";

/// File name of the store inside `DATA_DIR`.
pub const STORE_FILE_NAME: &str = "storefront.redb";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(String),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: String, value: String },
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value. Anything other than `json` is pretty.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Stripe settings, present only when a secret key is configured.
#[derive(Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    pub api_base_url: String,
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &"[redacted]")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub jwt_secret: String,
    pub stripe: Option<StripeConfig>,
    pub currency: String,
    pub log_format: LogFormat,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("data_dir", &self.data_dir)
            .field("jwt_secret", &"[redacted]")
            .field("stripe", &self.stripe)
            .field("currency", &self.currency)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env_optional = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let env_required =
            |name: &str| env_optional(name).ok_or_else(|| ConfigError::Missing(name.to_string()));
        let env_or_default =
            |name: &str, default: &str| env_optional(name).unwrap_or_else(|| default.to_string());

        let port = match env_optional(PORT_ENV) {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: PORT_ENV.to_string(),
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let stripe = env_optional(STRIPE_SECRET_KEY_ENV).map(|secret_key| StripeConfig {
            secret_key,
            api_base_url: env_or_default(STRIPE_API_BASE_URL_ENV, DEFAULT_API_BASE_URL),
        });

        Ok(Self {
            host: env_or_default(HOST_ENV, DEFAULT_HOST),
            port,
            data_dir: PathBuf::from(env_or_default(DATA_DIR_ENV, DEFAULT_DATA_DIR)),
            jwt_secret: env_required(JWT_SECRET_ENV)?,
            stripe,
            currency: env_or_default(PAYMENT_CURRENCY_ENV, DEFAULT_CURRENCY).to_lowercase(),
            log_format: env_optional(LOG_FORMAT_ENV)
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::Invalid {
            name: HOST_ENV.to_string(),
            value: self.host.clone(),
        })
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = load(&[(JWT_SECRET_ENV, "s3cret")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.currency, "usd");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.stripe.is_none());
        assert_eq!(config.store_path(), PathBuf::from("./data/storefront.redb"));
        assert_eq!(config.bind_addr().unwrap().port(), 5000);
    }

    #[test]
    fn missing_secret_is_an_error() {
        assert_eq!(
            load(&[]).unwrap_err(),
            ConfigError::Missing(JWT_SECRET_ENV.to_string())
        );
        assert!(load(&[(JWT_SECRET_ENV, "   ")]).is_err());
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = load(&[(JWT_SECRET_ENV, "s"), (PORT_ENV, "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn stripe_is_enabled_by_secret_key() {
        let config = load(&[
            (JWT_SECRET_ENV, "s"),
            (STRIPE_SECRET_KEY_ENV, "sk_test_1"),
            (PAYMENT_CURRENCY_ENV, "EUR"),
        ])
        .unwrap();
        let stripe = config.stripe.as_ref().unwrap();
        assert_eq!(stripe.secret_key, "sk_test_1");
        assert_eq!(stripe.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.currency, "eur");
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = load(&[(JWT_SECRET_ENV, "jwt-secret"), (STRIPE_SECRET_KEY_ENV, "sk_live_9")])
            .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("jwt-secret"));
        assert!(!debug.contains("sk_live_9"));
    }

    #[test]
    fn log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("other"), LogFormat::Pretty);
    }
}
