//! Chamados — ticketing REST backend.
//!
//! Exposes the full application as a library so the integration tests in
//! `tests/` can build the router against the in-memory store.

use std::sync::Arc;

use chrono::{DateTime, Utc};

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod errors;
pub mod images;
pub mod middleware;
pub mod models;
pub mod report;
pub mod store;

use auth::{CredentialVerifier, TokenService};
use images::ImageStore;
use store::TicketStore;

/// Shared application state passed to handlers and middleware.
pub struct AppState {
    pub store: Arc<dyn TicketStore>,
    pub images: ImageStore,
    pub tokens: TokenService,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub config: config::Config,
    /// Request-time clock for the business-day gate; swapped out in tests.
    pub clock: fn() -> DateTime<Utc>,
}

impl AppState {
    pub fn new(store: Arc<dyn TicketStore>, cfg: config::Config) -> Self {
        Self {
            images: ImageStore::new(&cfg.asset_dir),
            tokens: TokenService::new(&cfg.jwt_secret),
            credentials: Arc::new(auth::StaticCredentials {
                email: cfg.login_email.clone(),
                senha: cfg.login_senha.clone(),
                nome: cfg.login_nome.clone(),
            }),
            store,
            config: cfg,
            clock: Utc::now,
        }
    }
}
