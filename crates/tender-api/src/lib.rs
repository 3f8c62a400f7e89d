//! # tender-api
//!
//! HTTP layer for the tender console built on Axum.
//!
//! Provides the page routes with their session guard, the JSON API under
//! `/api`, the WebSocket upgrade, middleware (request logging, CORS,
//! body limits), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
