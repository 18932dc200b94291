//! HTTP route modules, one per resource
//!
//! All routes are mounted under `/api`.

use std::sync::Arc;

use axum::Router;
use serde::Serialize;

use super::server::AppState;

pub mod categories;
pub mod products;
pub mod tags;

/// Body for writes that answer with a confirmation instead of the row
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

impl Message {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Routes for every resource, relative to `/api`
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(categories::router())
        .merge(products::router())
        .merge(tags::router())
}
