//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod changes;
pub mod name;
pub mod price;
pub mod records;
pub mod stock;
pub mod tag_set;
pub mod validation;

pub use changes::{NewProduct, ProductChanges};
pub use name::Name;
pub use price::{Price, RawPrice};
pub use records::{
    Category, CategoryWithProducts, Product, ProductDetail, ProductTag, Tag, TagWithProducts,
};
pub use stock::{Stock, DEFAULT_STOCK};
pub use tag_set::{reconcile, TagDiff, TagIds};
pub use validation::ValidationError;
