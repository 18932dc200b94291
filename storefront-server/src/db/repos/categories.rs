//! Category repository
//!
//! Reads LEFT JOIN products in a single query, then folds the rows back
//! into nested records (no N+1).

use sqlx::{FromRow, PgPool};

use super::DbError;
use crate::models::{Category, CategoryWithProducts, Name, Product};

/// One category joined with at most one of its products
#[derive(Debug, FromRow)]
struct CategoryProductRow {
    id: i32,
    category_name: String,
    product_id: Option<i32>,
    product_name: Option<String>,
    price: Option<f64>,
    stock: Option<i32>,
}

const SELECT_WITH_PRODUCTS: &str = r#"
    SELECT
        c.id,
        c.category_name,
        p.id AS product_id,
        p.product_name,
        p.price::FLOAT8 AS price,
        p.stock
    FROM category c
    LEFT JOIN product p ON p.category_id = c.id
"#;

/// Category repository
pub struct CategoryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List categories with their products, ordered by id.
    pub async fn list(&self) -> Result<Vec<CategoryWithProducts>, DbError> {
        let rows: Vec<CategoryProductRow> =
            sqlx::query_as(&format!("{SELECT_WITH_PRODUCTS} ORDER BY c.id, p.id"))
                .fetch_all(self.pool)
                .await?;

        Ok(fold_rows(rows))
    }

    /// Get a single category with its products.
    pub async fn get(&self, id: i32) -> Result<CategoryWithProducts, DbError> {
        let rows: Vec<CategoryProductRow> =
            sqlx::query_as(&format!("{SELECT_WITH_PRODUCTS} WHERE c.id = $1 ORDER BY p.id"))
                .bind(id)
                .fetch_all(self.pool)
                .await?;

        fold_rows(rows)
            .pop()
            .ok_or_else(|| DbError::not_found("category", id))
    }

    pub async fn create(&self, name: Name) -> Result<Category, DbError> {
        let category: Category = sqlx::query_as(
            r#"
            INSERT INTO category (category_name)
            VALUES ($1)
            RETURNING id, category_name
            "#,
        )
        .bind(name.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(category)
    }

    /// Rename a category. Zero matched rows is NotFound.
    pub async fn update(&self, id: i32, name: Name) -> Result<(), DbError> {
        let result = sqlx::query("UPDATE category SET category_name = $2 WHERE id = $1")
            .bind(id)
            .bind(name.as_str())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("category", id));
        }
        Ok(())
    }

    /// Delete a category. Its products survive with a null category_id.
    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM category WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("category", id));
        }
        Ok(())
    }
}

/// Group rows ordered by category id into nested records.
fn fold_rows(rows: Vec<CategoryProductRow>) -> Vec<CategoryWithProducts> {
    let mut categories: Vec<CategoryWithProducts> = Vec::new();

    for row in rows {
        let product = match (row.product_id, row.product_name, row.price, row.stock) {
            (Some(id), Some(product_name), Some(price), Some(stock)) => Some(Product {
                id,
                product_name,
                price,
                stock,
                category_id: Some(row.id),
            }),
            _ => None,
        };

        match categories.last_mut() {
            Some(last) if last.category.id == row.id => last.products.extend(product),
            _ => categories.push(CategoryWithProducts {
                category: Category {
                    id: row.id,
                    category_name: row.category_name,
                },
                products: product.into_iter().collect(),
            }),
        }
    }

    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i32, product: Option<(i32, &str)>) -> CategoryProductRow {
        CategoryProductRow {
            id,
            category_name: format!("category-{id}"),
            product_id: product.map(|(pid, _)| pid),
            product_name: product.map(|(_, name)| name.to_string()),
            price: product.map(|_| 9.99),
            stock: product.map(|_| 3),
        }
    }

    #[test]
    fn fold_groups_products_under_category() {
        let rows = vec![
            row(1, Some((10, "Plain T-Shirt"))),
            row(1, Some((11, "Polo"))),
            row(2, None),
            row(3, Some((12, "Cargo Shorts"))),
        ];

        let folded = fold_rows(rows);
        assert_eq!(folded.len(), 3);
        assert_eq!(folded[0].products.len(), 2);
        assert!(folded[1].products.is_empty());
        assert_eq!(folded[2].products[0].category_id, Some(3));
    }

    #[test]
    fn fold_empty() {
        assert!(fold_rows(Vec::new()).is_empty());
    }
}
