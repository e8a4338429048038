//! Carta reservation & analytics server
//!
//! The server-side core of the Carta digital-menu platform: table-reservation
//! availability and booking, plus the best-effort analytics pipeline fed by
//! public menu pages. Menu CRUD, identity and media storage live elsewhere.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
