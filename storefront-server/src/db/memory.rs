//! In-memory store
//!
//! Mirrors the Postgres schema rules: serial ids per table, foreign keys
//! checked on write, `SET NULL` for a deleted category and cascades for
//! deleted products and tags. Every write validates before it mutates, so a
//! rejected write leaves the tables untouched.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::error::{MISSING_CATEGORY, MISSING_TAG};
use super::repos::DbError;
use super::Store;
use crate::models::{
    reconcile, Category, CategoryWithProducts, Name, NewProduct, Product, ProductChanges,
    ProductDetail, ProductTag, Tag, TagIds, TagWithProducts,
};

#[derive(Debug, Default)]
struct Tables {
    categories: BTreeMap<i32, Category>,
    products: BTreeMap<i32, Product>,
    tags: BTreeMap<i32, Tag>,
    product_tags: BTreeMap<i32, ProductTag>,
    last_category_id: i32,
    last_product_id: i32,
    last_tag_id: i32,
    last_product_tag_id: i32,
}

impl Tables {
    fn check_category(&self, category_id: Option<i32>) -> Result<(), DbError> {
        match category_id {
            Some(id) if !self.categories.contains_key(&id) => {
                Err(DbError::constraint(MISSING_CATEGORY))
            }
            _ => Ok(()),
        }
    }

    fn check_tags(&self, tag_ids: &TagIds) -> Result<(), DbError> {
        if tag_ids.as_slice().iter().all(|id| self.tags.contains_key(id)) {
            Ok(())
        } else {
            Err(DbError::constraint(MISSING_TAG))
        }
    }

    fn links_for(&self, product_id: i32) -> Vec<ProductTag> {
        self.product_tags
            .values()
            .filter(|pt| pt.product_id == product_id)
            .cloned()
            .collect()
    }

    fn link(&mut self, product_id: i32, tag_ids: &[i32]) {
        for &tag_id in tag_ids {
            self.last_product_tag_id += 1;
            let id = self.last_product_tag_id;
            self.product_tags.insert(
                id,
                ProductTag {
                    id,
                    product_id,
                    tag_id,
                },
            );
        }
    }

    fn category_with_products(&self, category: &Category) -> CategoryWithProducts {
        CategoryWithProducts {
            category: category.clone(),
            products: self
                .products
                .values()
                .filter(|p| p.category_id == Some(category.id))
                .cloned()
                .collect(),
        }
    }

    fn product_detail(&self, product: &Product) -> ProductDetail {
        let mut tags: Vec<Tag> = self
            .links_for(product.id)
            .iter()
            .filter_map(|pt| self.tags.get(&pt.tag_id).cloned())
            .collect();
        tags.sort_by_key(|t| t.id);

        ProductDetail {
            product: product.clone(),
            category: product
                .category_id
                .and_then(|id| self.categories.get(&id).cloned()),
            tags,
        }
    }

    fn tag_with_products(&self, tag: &Tag) -> TagWithProducts {
        let mut products: Vec<Product> = self
            .product_tags
            .values()
            .filter(|pt| pt.tag_id == tag.id)
            .filter_map(|pt| self.products.get(&pt.product_id).cloned())
            .collect();
        products.sort_by_key(|p| p.id);

        TagWithProducts {
            tag: tag.clone(),
            products,
        }
    }
}

/// Store kept entirely in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every join record, ordered by id.
    pub async fn join_records(&self) -> Vec<ProductTag> {
        self.tables.read().await.product_tags.values().cloned().collect()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<CategoryWithProducts>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .values()
            .map(|c| tables.category_with_products(c))
            .collect())
    }

    async fn get_category(&self, id: i32) -> Result<CategoryWithProducts, DbError> {
        let tables = self.tables.read().await;
        tables
            .categories
            .get(&id)
            .map(|c| tables.category_with_products(c))
            .ok_or_else(|| DbError::not_found("category", id))
    }

    async fn create_category(&self, name: Name) -> Result<Category, DbError> {
        let mut tables = self.tables.write().await;
        tables.last_category_id += 1;
        let category = Category {
            id: tables.last_category_id,
            category_name: name.into_string(),
        };
        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update_category(&self, id: i32, name: Name) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        let category = tables
            .categories
            .get_mut(&id)
            .ok_or_else(|| DbError::not_found("category", id))?;
        category.category_name = name.into_string();
        Ok(())
    }

    async fn delete_category(&self, id: i32) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        if tables.categories.remove(&id).is_none() {
            return Err(DbError::not_found("category", id));
        }

        for product in tables.products.values_mut() {
            if product.category_id == Some(id) {
                product.category_id = None;
            }
        }
        Ok(())
    }

    async fn list_products(&self) -> Result<Vec<ProductDetail>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .values()
            .map(|p| tables.product_detail(p))
            .collect())
    }

    async fn get_product(&self, id: i32) -> Result<ProductDetail, DbError> {
        let tables = self.tables.read().await;
        tables
            .products
            .get(&id)
            .map(|p| tables.product_detail(p))
            .ok_or_else(|| DbError::not_found("product", id))
    }

    async fn create_product(&self, new: NewProduct) -> Result<ProductDetail, DbError> {
        let mut tables = self.tables.write().await;
        tables.check_category(new.category_id)?;
        tables.check_tags(&new.tag_ids)?;

        tables.last_product_id += 1;
        let product = Product {
            id: tables.last_product_id,
            product_name: new.product_name.into_string(),
            price: new.price.value(),
            stock: new.stock.value(),
            category_id: new.category_id,
        };
        tables.products.insert(product.id, product.clone());
        tables.link(product.id, new.tag_ids.as_slice());

        Ok(tables.product_detail(&product))
    }

    async fn update_product(
        &self,
        id: i32,
        changes: ProductChanges,
    ) -> Result<ProductDetail, DbError> {
        let mut tables = self.tables.write().await;
        if !tables.products.contains_key(&id) {
            return Err(DbError::not_found("product", id));
        }
        tables.check_category(changes.category_id.flatten())?;
        if let Some(tag_ids) = &changes.tag_ids {
            tables.check_tags(tag_ids)?;
        }

        let product = tables
            .products
            .get_mut(&id)
            .ok_or_else(|| DbError::not_found("product", id))?;
        if let Some(name) = changes.product_name {
            product.product_name = name.into_string();
        }
        if let Some(price) = changes.price {
            product.price = price.value();
        }
        if let Some(stock) = changes.stock {
            product.stock = stock.value();
        }
        if let Some(category_id) = changes.category_id {
            product.category_id = category_id;
        }
        let product = product.clone();

        if let Some(tag_ids) = &changes.tag_ids {
            let diff = reconcile(&tables.links_for(id), tag_ids);
            for join_id in &diff.to_remove {
                tables.product_tags.remove(join_id);
            }
            tables.link(id, &diff.to_add);
        }

        Ok(tables.product_detail(&product))
    }

    async fn delete_product(&self, id: i32) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        if tables.products.remove(&id).is_none() {
            return Err(DbError::not_found("product", id));
        }
        tables.product_tags.retain(|_, pt| pt.product_id != id);
        Ok(())
    }

    async fn list_tags(&self) -> Result<Vec<TagWithProducts>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .tags
            .values()
            .map(|t| tables.tag_with_products(t))
            .collect())
    }

    async fn get_tag(&self, id: i32) -> Result<TagWithProducts, DbError> {
        let tables = self.tables.read().await;
        tables
            .tags
            .get(&id)
            .map(|t| tables.tag_with_products(t))
            .ok_or_else(|| DbError::not_found("tag", id))
    }

    async fn create_tag(&self, name: Name) -> Result<Tag, DbError> {
        let mut tables = self.tables.write().await;
        tables.last_tag_id += 1;
        let tag = Tag {
            id: tables.last_tag_id,
            tag_name: name.into_string(),
        };
        tables.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn update_tag(&self, id: i32, name: Name) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        let tag = tables
            .tags
            .get_mut(&id)
            .ok_or_else(|| DbError::not_found("tag", id))?;
        tag.tag_name = name.into_string();
        Ok(())
    }

    async fn delete_tag(&self, id: i32) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        if tables.tags.remove(&id).is_none() {
            return Err(DbError::not_found("tag", id));
        }
        tables.product_tags.retain(|_, pt| pt.tag_id != id);
        Ok(())
    }
}
