mod app;
pub mod auth;
pub mod conditions;
pub mod config;
pub mod db;
pub mod geo;
pub mod routes;
mod state;
mod telemetry;
pub mod validation;

pub use app::{Server, build_app};
pub use state::AppState;
pub use telemetry::{configure_user_scope, init_sentry, init_tracing};
