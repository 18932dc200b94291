//! Tag repository
//!
//! Tags reach their products through `product_tag`; reads join both tables
//! in one query.

use sqlx::{FromRow, PgPool};

use super::DbError;
use crate::models::{Name, Product, Tag, TagWithProducts};

#[derive(Debug, FromRow)]
struct TagProductRow {
    id: i32,
    tag_name: String,
    product_id: Option<i32>,
    product_name: Option<String>,
    price: Option<f64>,
    stock: Option<i32>,
    category_id: Option<i32>,
}

const SELECT_WITH_PRODUCTS: &str = r#"
    SELECT
        t.id,
        t.tag_name,
        p.id AS product_id,
        p.product_name,
        p.price::FLOAT8 AS price,
        p.stock,
        p.category_id
    FROM tag t
    LEFT JOIN product_tag pt ON pt.tag_id = t.id
    LEFT JOIN product p ON p.id = pt.product_id
"#;

/// Tag repository
pub struct TagRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> TagRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<TagWithProducts>, DbError> {
        let rows: Vec<TagProductRow> =
            sqlx::query_as(&format!("{SELECT_WITH_PRODUCTS} ORDER BY t.id, p.id"))
                .fetch_all(self.pool)
                .await?;

        Ok(fold_rows(rows))
    }

    pub async fn get(&self, id: i32) -> Result<TagWithProducts, DbError> {
        let rows: Vec<TagProductRow> =
            sqlx::query_as(&format!("{SELECT_WITH_PRODUCTS} WHERE t.id = $1 ORDER BY p.id"))
                .bind(id)
                .fetch_all(self.pool)
                .await?;

        fold_rows(rows)
            .pop()
            .ok_or_else(|| DbError::not_found("tag", id))
    }

    pub async fn create(&self, name: Name) -> Result<Tag, DbError> {
        let tag: Tag = sqlx::query_as(
            r#"
            INSERT INTO tag (tag_name)
            VALUES ($1)
            RETURNING id, tag_name
            "#,
        )
        .bind(name.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(tag)
    }

    pub async fn update(&self, id: i32, name: Name) -> Result<(), DbError> {
        let result = sqlx::query("UPDATE tag SET tag_name = $2 WHERE id = $1")
            .bind(id)
            .bind(name.as_str())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("tag", id));
        }
        Ok(())
    }

    /// Delete a tag and, through the cascade, its join records.
    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM tag WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("tag", id));
        }
        Ok(())
    }
}

fn fold_rows(rows: Vec<TagProductRow>) -> Vec<TagWithProducts> {
    let mut tags: Vec<TagWithProducts> = Vec::new();

    for row in rows {
        let product = match (row.product_id, row.product_name, row.price, row.stock) {
            (Some(id), Some(product_name), Some(price), Some(stock)) => Some(Product {
                id,
                product_name,
                price,
                stock,
                category_id: row.category_id,
            }),
            _ => None,
        };

        match tags.last_mut() {
            Some(last) if last.tag.id == row.id => last.products.extend(product),
            _ => tags.push(TagWithProducts {
                tag: Tag {
                    id: row.id,
                    tag_name: row.tag_name,
                },
                products: product.into_iter().collect(),
            }),
        }
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_keeps_tags_without_products() {
        let rows = vec![
            TagProductRow {
                id: 1,
                tag_name: "rock music".into(),
                product_id: Some(3),
                product_name: Some("Branded Baseball Hat".into()),
                price: Some(22.99),
                stock: Some(12),
                category_id: None,
            },
            TagProductRow {
                id: 2,
                tag_name: "pop music".into(),
                product_id: None,
                product_name: None,
                price: None,
                stock: None,
                category_id: None,
            },
        ];

        let folded = fold_rows(rows);
        assert_eq!(folded.len(), 2);
        assert_eq!(folded[0].products[0].id, 3);
        assert!(folded[0].products[0].category_id.is_none());
        assert!(folded[1].products.is_empty());
    }
}
