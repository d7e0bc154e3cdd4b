//! HTTP API: router, handlers and response helpers

pub mod handler;
pub mod health;
pub mod helpers;
pub mod server;
pub mod state;

// Re-export the main entry points for convenience
pub use handler::summarize;
pub use server::{create_router, create_router_with_limit, serve};
pub use state::AppState;
