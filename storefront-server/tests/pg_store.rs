//! Postgres store tests
//!
//! Run with a scratch database:
//!   DATABASE_URL=postgres://localhost/storefront_test cargo test -- --ignored
//!
//! Each test resets the schema, so they hold a shared lock.

use sqlx::PgPool;
use tokio::sync::Mutex;

use storefront_server::db::migrations;
use storefront_server::models::{Name, NewProduct, Price, ProductChanges, Stock, TagIds};
use storefront_server::{create_pool, DbConfig, DbError, PgStore, Store};

static SCHEMA: Mutex<()> = Mutex::const_new(());

async fn fresh_store() -> PgStore {
    let config = DbConfig {
        url: std::env::var("DATABASE_URL").ok(),
        ..Default::default()
    };
    let pool = create_pool(&config).await.unwrap();
    migrations::reset(&pool).await.unwrap();
    PgStore::new(pool)
}

async fn links(pool: &PgPool, product_id: i32) -> Vec<(i32, i32)> {
    sqlx::query_as("SELECT id, tag_id FROM product_tag WHERE product_id = $1 ORDER BY tag_id")
        .bind(product_id)
        .fetch_all(pool)
        .await
        .unwrap()
}

async fn tags(store: &PgStore, names: &[&str]) -> Vec<i32> {
    let mut ids = Vec::new();
    for name in names {
        ids.push(store.create_tag(Name::new("tag_name", name).unwrap()).await.unwrap().id);
    }
    ids
}

fn product(name: &str, tag_ids: &[i32]) -> NewProduct {
    NewProduct {
        product_name: Name::new("product_name", name).unwrap(),
        price: Price::new(14.99).unwrap(),
        stock: Stock::default(),
        category_id: None,
        tag_ids: TagIds::new(tag_ids).unwrap(),
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_reconciles_tag_links() {
    let _guard = SCHEMA.lock().await;
    let store = fresh_store().await;
    let t = tags(&store, &["a", "b", "c", "d"]).await;

    let created = store.create_product(product("Tee", &t[..3])).await.unwrap();
    let id = created.product.id;
    let before = links(store.pool(), id).await;
    assert_eq!(before.len(), 3);

    let changes = ProductChanges {
        tag_ids: Some(TagIds::new(&t[1..]).unwrap()),
        ..Default::default()
    };
    let updated = store.update_product(id, changes).await.unwrap();
    assert_eq!(updated.tags.len(), 3);

    let after = links(store.pool(), id).await;
    assert_eq!(after.iter().map(|l| l.1).collect::<Vec<_>>(), t[1..].to_vec());
    // b and c keep their original join rows
    assert_eq!(after[0], before[1]);
    assert_eq!(after[1], before[2]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn unknown_tag_rolls_back_update() {
    let _guard = SCHEMA.lock().await;
    let store = fresh_store().await;
    let t = tags(&store, &["a"]).await;

    let created = store.create_product(product("Hat", &t)).await.unwrap();
    let id = created.product.id;

    let changes = ProductChanges {
        stock: Some(Stock::new(1).unwrap()),
        tag_ids: Some(TagIds::new(&[9999]).unwrap()),
        ..Default::default()
    };
    let err = store.update_product(id, changes).await.unwrap_err();
    assert!(matches!(err, DbError::Constraint { .. }));

    let unchanged = store.get_product(id).await.unwrap();
    assert_eq!(unchanged.product.stock, 10);
    assert_eq!(links(store.pool(), id).await.len(), 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_category_orphans_products() {
    let _guard = SCHEMA.lock().await;
    let store = fresh_store().await;

    let category = store
        .create_category(Name::new("category_name", "Shoes").unwrap())
        .await
        .unwrap();
    let mut new = product("Sneakers", &[]);
    new.category_id = Some(category.id);
    let created = store.create_product(new).await.unwrap();

    store.delete_category(category.id).await.unwrap();

    let orphan = store.get_product(created.product.id).await.unwrap();
    assert!(orphan.product.category_id.is_none());
    assert!(orphan.category.is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn missing_rows_are_not_found() {
    let _guard = SCHEMA.lock().await;
    let store = fresh_store().await;

    assert!(matches!(store.get_product(42).await, Err(DbError::NotFound { .. })));
    assert!(matches!(store.delete_tag(42).await, Err(DbError::NotFound { .. })));
    assert!(matches!(
        store
            .update_category(42, Name::new("category_name", "x").unwrap())
            .await,
        Err(DbError::NotFound { .. })
    ));
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_can_clear_category() {
    let _guard = SCHEMA.lock().await;
    let store = fresh_store().await;

    let category = store
        .create_category(Name::new("category_name", "Hats").unwrap())
        .await
        .unwrap();
    let mut new = product("Cap", &[]);
    new.category_id = Some(category.id);
    let created = store.create_product(new).await.unwrap();

    let untouched = store
        .update_product(created.product.id, ProductChanges::default())
        .await
        .unwrap();
    assert_eq!(untouched.product.category_id, Some(category.id));

    let changes = ProductChanges {
        category_id: Some(None),
        ..Default::default()
    };
    let cleared = store.update_product(created.product.id, changes).await.unwrap();
    assert!(cleared.product.category_id.is_none());
    assert!(cleared.category.is_none());
}
