//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses JOINs for nested reads (no N+1)
//! - Maps zero affected rows to NotFound
//! - Uses transactions for multi-step writes

pub mod categories;
pub mod product_tags;
pub mod products;
pub mod tags;

pub use super::error::DbError;
pub use categories::CategoryRepo;
pub use products::ProductRepo;
pub use tags::TagRepo;
