use std::sync::Arc;

use crate::auth::TokenCodec;
use crate::storage::Storage;

/// Shared per-process application state.
///
/// Holds the storage handle and the token codec; both are passed explicitly
/// into every service call rather than reached through globals. Cloning is
/// cheap and each worker gets its own copy.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Storage>,
    pub tokens: TokenCodec,
}

impl AppState {
    pub fn new(store: Arc<dyn Storage>, tokens: TokenCodec) -> Self {
        Self { store, tokens }
    }
}
