//! storefront-server: REST API over categories, products and tags
//!
//! Exposes CRUD routes under `/api` backed by a [`Store`]: Postgres in
//! production, an in-memory store for tests and local runs. Product updates
//! reconcile the product's tag associations inside one transaction.

pub mod db;
pub mod http;
pub mod models;
pub mod seed;

pub use db::{create_pool, DbConfig, DbError, MemoryStore, PgStore, Store};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
