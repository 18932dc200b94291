//! Join-record queries
//!
//! These run on a borrowed connection so the product repository can call
//! them inside its transactions.

use sqlx::PgConnection;

use crate::models::ProductTag;

/// Join records for a product, oldest first.
pub async fn for_product(
    conn: &mut PgConnection,
    product_id: i32,
) -> Result<Vec<ProductTag>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, product_id, tag_id
        FROM product_tag
        WHERE product_id = $1
        ORDER BY id
        "#,
    )
    .bind(product_id)
    .fetch_all(conn)
    .await
}

/// Bulk insert one join record per tag id.
pub async fn insert(
    conn: &mut PgConnection,
    product_id: i32,
    tag_ids: &[i32],
) -> Result<(), sqlx::Error> {
    if tag_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO product_tag (product_id, tag_id)
        SELECT $1, tag_id FROM UNNEST($2::INT4[]) AS tag_id
        ON CONFLICT (product_id, tag_id) DO NOTHING
        "#,
    )
    .bind(product_id)
    .bind(tag_ids)
    .execute(conn)
    .await?;

    Ok(())
}

/// Delete join records by their own ids.
pub async fn remove(conn: &mut PgConnection, ids: &[i32]) -> Result<u64, sqlx::Error> {
    if ids.is_empty() {
        return Ok(0);
    }

    let result = sqlx::query("DELETE FROM product_tag WHERE id = ANY($1)")
        .bind(ids)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
