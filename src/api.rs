//! HTTP API for the career counselor

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::runtime::Counselor;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub counselor: Arc<Counselor>,
}

impl AppState {
    pub fn new(counselor: Counselor) -> Self {
        Self {
            counselor: Arc::new(counselor),
        }
    }
}
