//! Schema migrations for the storefront tables

use sqlx::PgPool;

/// Create all tables and indexes that do not exist yet
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running storefront migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS category (
            id SERIAL PRIMARY KEY,
            category_name VARCHAR(255) NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Deleting a category orphans its products instead of removing them
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS product (
            id SERIAL PRIMARY KEY,
            product_name VARCHAR(255) NOT NULL,
            price NUMERIC(10, 2) NOT NULL CHECK (price >= 0),
            stock INTEGER NOT NULL DEFAULT 10 CHECK (stock >= 0),
            category_id INTEGER,
            CONSTRAINT product_category_fk FOREIGN KEY (category_id)
                REFERENCES category(id) ON DELETE SET NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tag (
            id SERIAL PRIMARY KEY,
            tag_name VARCHAR(255) NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS product_tag (
            id SERIAL PRIMARY KEY,
            product_id INTEGER NOT NULL,
            tag_id INTEGER NOT NULL,
            CONSTRAINT product_tag_product_fk FOREIGN KEY (product_id)
                REFERENCES product(id) ON DELETE CASCADE,
            CONSTRAINT product_tag_tag_fk FOREIGN KEY (tag_id)
                REFERENCES tag(id) ON DELETE CASCADE,
            CONSTRAINT product_tag_pair_unique UNIQUE (product_id, tag_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Storefront migrations complete");
    Ok(())
}

/// Drop every storefront table, then recreate the schema
pub async fn reset(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::warn!("Dropping storefront tables");

    sqlx::query("DROP TABLE IF EXISTS product_tag, product, tag, category CASCADE")
        .execute(pool)
        .await?;

    run(pool).await
}

async fn create_indexes(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_product_category ON product(category_id)")
        .execute(pool)
        .await?;

    // (product_id, tag_id) is already covered by the unique constraint
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_product_tag_tag ON product_tag(tag_id)")
        .execute(pool)
        .await?;

    Ok(())
}
