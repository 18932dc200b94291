//! Database layer - connection pool, repositories and stores
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default) - no Arc<Mutex<Connection>>
//! - Nested reads use JOINs - no N+1 queries
//! - Rely on DB constraints, map violations to client errors
//! - Transactions for multi-step operations

pub mod config;
pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repos;
pub mod store;

pub use config::DbConfig;
pub use error::DbError;
pub use memory::MemoryStore;
pub use pool::create_pool;
pub use store::{PgStore, Store};
