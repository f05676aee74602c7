//! Application state shared by all request handlers.

use agora_core::storage::Database;

/// Shared state: the SQLite connection pool wrapper. Handlers hold no other
/// state; each request runs independently against the pool.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}
