//! Store trait and the Postgres implementation
//!
//! Handlers only see `dyn Store`, so the router can run against Postgres
//! in production and `MemoryStore` in tests.

use async_trait::async_trait;
use sqlx::PgPool;

use super::repos::{CategoryRepo, DbError, ProductRepo, TagRepo};
use crate::models::{
    Category, CategoryWithProducts, Name, NewProduct, ProductChanges, ProductDetail, Tag,
    TagWithProducts,
};

/// Persistence operations behind the HTTP API (testable)
#[async_trait]
pub trait Store: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<CategoryWithProducts>, DbError>;
    async fn get_category(&self, id: i32) -> Result<CategoryWithProducts, DbError>;
    async fn create_category(&self, name: Name) -> Result<Category, DbError>;
    async fn update_category(&self, id: i32, name: Name) -> Result<(), DbError>;
    async fn delete_category(&self, id: i32) -> Result<(), DbError>;

    async fn list_products(&self) -> Result<Vec<ProductDetail>, DbError>;
    async fn get_product(&self, id: i32) -> Result<ProductDetail, DbError>;
    async fn create_product(&self, new: NewProduct) -> Result<ProductDetail, DbError>;
    async fn update_product(
        &self,
        id: i32,
        changes: ProductChanges,
    ) -> Result<ProductDetail, DbError>;
    async fn delete_product(&self, id: i32) -> Result<(), DbError>;

    async fn list_tags(&self) -> Result<Vec<TagWithProducts>, DbError>;
    async fn get_tag(&self, id: i32) -> Result<TagWithProducts, DbError>;
    async fn create_tag(&self, name: Name) -> Result<Tag, DbError>;
    async fn update_tag(&self, id: i32, name: Name) -> Result<(), DbError>;
    async fn delete_tag(&self, id: i32) -> Result<(), DbError>;
}

/// Store backed by a Postgres pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_categories(&self) -> Result<Vec<CategoryWithProducts>, DbError> {
        CategoryRepo::new(&self.pool).list().await
    }

    async fn get_category(&self, id: i32) -> Result<CategoryWithProducts, DbError> {
        CategoryRepo::new(&self.pool).get(id).await
    }

    async fn create_category(&self, name: Name) -> Result<Category, DbError> {
        CategoryRepo::new(&self.pool).create(name).await
    }

    async fn update_category(&self, id: i32, name: Name) -> Result<(), DbError> {
        CategoryRepo::new(&self.pool).update(id, name).await
    }

    async fn delete_category(&self, id: i32) -> Result<(), DbError> {
        CategoryRepo::new(&self.pool).delete(id).await
    }

    async fn list_products(&self) -> Result<Vec<ProductDetail>, DbError> {
        ProductRepo::new(&self.pool).list().await
    }

    async fn get_product(&self, id: i32) -> Result<ProductDetail, DbError> {
        ProductRepo::new(&self.pool).get(id).await
    }

    async fn create_product(&self, new: NewProduct) -> Result<ProductDetail, DbError> {
        ProductRepo::new(&self.pool).create(new).await
    }

    async fn update_product(
        &self,
        id: i32,
        changes: ProductChanges,
    ) -> Result<ProductDetail, DbError> {
        ProductRepo::new(&self.pool).update(id, changes).await
    }

    async fn delete_product(&self, id: i32) -> Result<(), DbError> {
        ProductRepo::new(&self.pool).delete(id).await
    }

    async fn list_tags(&self) -> Result<Vec<TagWithProducts>, DbError> {
        TagRepo::new(&self.pool).list().await
    }

    async fn get_tag(&self, id: i32) -> Result<TagWithProducts, DbError> {
        TagRepo::new(&self.pool).get(id).await
    }

    async fn create_tag(&self, name: Name) -> Result<Tag, DbError> {
        TagRepo::new(&self.pool).create(name).await
    }

    async fn update_tag(&self, id: i32, name: Name) -> Result<(), DbError> {
        TagRepo::new(&self.pool).update(id, name).await
    }

    async fn delete_tag(&self, id: i32) -> Result<(), DbError> {
        TagRepo::new(&self.pool).delete(id).await
    }
}
