// ABOUTME: HTTP server for namerecords, providing the bearer-protected REST API.
// ABOUTME: Uses Axum with an explicit state object, an auth layer, and a terminal error layer.

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod error;
pub mod routes;

pub use app_state::{AppState, SharedState};
pub use config::{Environment, ServiceConfig};
pub use error::ApiError;
pub use routes::create_router;
