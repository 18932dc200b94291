//! Product repository
//!
//! Handles product CRUD with:
//! - Category and tags loaded in two queries for any number of products (no N+1)
//! - Product + join records written in one transaction
//! - Tag reconciliation under a row lock so concurrent updates of the same
//!   product serialize

use std::collections::HashMap;

use sqlx::{FromRow, PgConnection, PgPool};

use super::{product_tags, DbError};
use crate::models::{
    reconcile, Category, Name, NewProduct, Product, ProductChanges, ProductDetail, Tag,
};

#[derive(Debug, FromRow)]
struct ProductCategoryRow {
    id: i32,
    product_name: String,
    price: f64,
    stock: i32,
    category_id: Option<i32>,
    category_name: Option<String>,
}

#[derive(Debug, FromRow)]
struct ProductTagNameRow {
    product_id: i32,
    id: i32,
    tag_name: String,
}

/// Product repository
pub struct ProductRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products with category and tags, ordered by id.
    pub async fn list(&self) -> Result<Vec<ProductDetail>, DbError> {
        let mut conn = self.pool.acquire().await?;
        Ok(fetch_details(&mut conn, None).await?)
    }

    pub async fn get(&self, id: i32) -> Result<ProductDetail, DbError> {
        let mut conn = self.pool.acquire().await?;
        fetch_details(&mut conn, Some(id))
            .await?
            .pop()
            .ok_or_else(|| DbError::not_found("product", id))
    }

    /// Insert a product and its join records (atomic).
    pub async fn create(&self, new: NewProduct) -> Result<ProductDetail, DbError> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO product (product_name, price, stock, category_id)
            VALUES ($1, $2::FLOAT8, $3, $4)
            RETURNING id
            "#,
        )
        .bind(new.product_name.as_str())
        .bind(new.price.value())
        .bind(new.stock.value())
        .bind(new.category_id)
        .fetch_one(&mut *tx)
        .await?;

        product_tags::insert(&mut tx, id, new.tag_ids.as_slice()).await?;

        let detail = fetch_details(&mut tx, Some(id))
            .await?
            .pop()
            .ok_or_else(|| DbError::not_found("product", id))?;

        tx.commit().await?;

        tracing::debug!(product_id = id, tags = detail.tags.len(), "product created");
        Ok(detail)
    }

    /// Apply a partial update and reconcile tags (atomic).
    ///
    /// Any failing step rolls back the whole update.
    pub async fn update(
        &self,
        id: i32,
        changes: ProductChanges,
    ) -> Result<ProductDetail, DbError> {
        let mut tx = self.pool.begin().await?;

        let locked: Option<(i32,)> =
            sqlx::query_as("SELECT id FROM product WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        if locked.is_none() {
            return Err(DbError::not_found("product", id));
        }

        if !changes.leaves_row_untouched() {
            sqlx::query(
                r#"
                UPDATE product SET
                    product_name = COALESCE($2, product_name),
                    price = COALESCE($3::FLOAT8::NUMERIC(10, 2), price),
                    stock = COALESCE($4, stock),
                    category_id = CASE WHEN $6 THEN $5 ELSE category_id END
                WHERE id = $1
                "#,
            )
            .bind(id)
            .bind(changes.product_name.as_ref().map(Name::as_str))
            .bind(changes.price.map(|p| p.value()))
            .bind(changes.stock.map(|s| s.value()))
            .bind(changes.category_id.flatten())
            .bind(changes.category_id.is_some())
            .execute(&mut *tx)
            .await?;
        }

        if let Some(tag_ids) = &changes.tag_ids {
            let existing = product_tags::for_product(&mut tx, id).await?;
            let diff = reconcile(&existing, tag_ids);

            tracing::debug!(
                product_id = id,
                add = ?diff.to_add,
                remove = ?diff.to_remove,
                "reconciling product tags"
            );

            product_tags::remove(&mut tx, &diff.to_remove).await?;
            product_tags::insert(&mut tx, id, &diff.to_add).await?;
        }

        let detail = fetch_details(&mut tx, Some(id))
            .await?
            .pop()
            .ok_or_else(|| DbError::not_found("product", id))?;

        tx.commit().await?;
        Ok(detail)
    }

    /// Delete a product; its join records cascade.
    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("product", id));
        }
        Ok(())
    }
}

/// Load products (all, or the one matching `id`) with category and tags.
async fn fetch_details(
    conn: &mut PgConnection,
    id: Option<i32>,
) -> Result<Vec<ProductDetail>, sqlx::Error> {
    let products: Vec<ProductCategoryRow> = sqlx::query_as(
        r#"
        SELECT
            p.id,
            p.product_name,
            p.price::FLOAT8 AS price,
            p.stock,
            p.category_id,
            c.category_name
        FROM product p
        LEFT JOIN category c ON c.id = p.category_id
        WHERE $1::INT4 IS NULL OR p.id = $1
        ORDER BY p.id
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    if products.is_empty() {
        return Ok(Vec::new());
    }

    let tag_rows: Vec<ProductTagNameRow> = sqlx::query_as(
        r#"
        SELECT pt.product_id, t.id, t.tag_name
        FROM product_tag pt
        JOIN tag t ON t.id = pt.tag_id
        WHERE $1::INT4 IS NULL OR pt.product_id = $1
        ORDER BY pt.product_id, t.id
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(assemble(products, tag_rows))
}

fn assemble(
    products: Vec<ProductCategoryRow>,
    tag_rows: Vec<ProductTagNameRow>,
) -> Vec<ProductDetail> {
    let mut tags_by_product: HashMap<i32, Vec<Tag>> = HashMap::new();
    for row in tag_rows {
        tags_by_product.entry(row.product_id).or_default().push(Tag {
            id: row.id,
            tag_name: row.tag_name,
        });
    }

    products
        .into_iter()
        .map(|row| {
            let category = match (row.category_id, row.category_name) {
                (Some(id), Some(category_name)) => Some(Category { id, category_name }),
                _ => None,
            };

            ProductDetail {
                tags: tags_by_product.remove(&row.id).unwrap_or_default(),
                product: Product {
                    id: row.id,
                    product_name: row.product_name,
                    price: row.price,
                    stock: row.stock,
                    category_id: row.category_id,
                },
                category,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assemble_attaches_tags_and_category() {
        let products = vec![
            ProductCategoryRow {
                id: 1,
                product_name: "Plain T-Shirt".into(),
                price: 14.99,
                stock: 14,
                category_id: Some(1),
                category_name: Some("Shirts".into()),
            },
            ProductCategoryRow {
                id: 2,
                product_name: "Running Sneakers".into(),
                price: 90.0,
                stock: 25,
                category_id: None,
                category_name: None,
            },
        ];
        let tags = vec![
            ProductTagNameRow {
                product_id: 1,
                id: 6,
                tag_name: "white".into(),
            },
            ProductTagNameRow {
                product_id: 1,
                id: 7,
                tag_name: "gold".into(),
            },
        ];

        let details = assemble(products, tags);
        assert_eq!(details[0].tags.len(), 2);
        assert_eq!(details[0].category.as_ref().unwrap().category_name, "Shirts");
        assert!(details[1].tags.is_empty());
        assert!(details[1].category.is_none());
    }
}
