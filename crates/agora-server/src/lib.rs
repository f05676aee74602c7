//! Agora HTTP server library.
//!
//! Exposes the router so integration tests can drive the API in-process.

pub mod error;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
