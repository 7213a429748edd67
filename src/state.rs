//! Shared application state for all routes.

use crate::db::Database;
use std::sync::Arc;

/// Cloned per request. Holds only the executor; there is no other shared
/// mutable state.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
}
