//! Sample catalogue for development databases

use crate::db::{DbError, Store};
use crate::models::{Name, NewProduct, Price, Stock, TagIds, ValidationError};

const CATEGORIES: &[&str] = &["Shirts", "Shorts", "Music", "Hats", "Shoes"];

const TAGS: &[&str] = &[
    "rock music",
    "pop music",
    "blue",
    "red",
    "green",
    "white",
    "gold",
    "pop culture",
];

/// (name, price, stock, category index, tag indexes)
const PRODUCTS: &[(&str, f64, i64, usize, &[usize])] = &[
    ("Plain T-Shirt", 14.99, 14, 0, &[5, 6, 7]),
    ("Running Sneakers", 90.0, 25, 4, &[5]),
    ("Branded Baseball Hat", 22.99, 12, 3, &[0, 2, 3, 4]),
    ("Top 40 Music Compilation Vinyl Record", 12.99, 50, 2, &[0, 1, 7]),
    ("Cargo Shorts", 29.99, 22, 1, &[2]),
];

/// Row counts written by [`seed`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub tags: usize,
    pub products: usize,
    pub product_tags: usize,
}

/// Seeding failure
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error("invalid seed data: {0}")]
    Invalid(#[from] ValidationError),
}

/// Insert the sample categories, tags and products through `store`.
///
/// Ids are taken from what the store returns, so this works on a
/// non-empty store too; it just adds another copy of the catalogue.
pub async fn seed(store: &dyn Store) -> Result<SeedSummary, SeedError> {
    let mut summary = SeedSummary::default();

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for name in CATEGORIES {
        let category = store.create_category(Name::new("category_name", name)?).await?;
        category_ids.push(category.id);
        summary.categories += 1;
    }

    let mut tag_ids = Vec::with_capacity(TAGS.len());
    for name in TAGS {
        let tag = store.create_tag(Name::new("tag_name", name)?).await?;
        tag_ids.push(tag.id);
        summary.tags += 1;
    }

    for &(name, price, stock, category, tags) in PRODUCTS {
        let product_tags: Vec<i32> = tags.iter().map(|&i| tag_ids[i]).collect();
        let product = store
            .create_product(NewProduct {
                product_name: Name::new("product_name", name)?,
                price: Price::new(price)?,
                stock: Stock::new(stock)?,
                category_id: Some(category_ids[category]),
                tag_ids: TagIds::new(&product_tags)?,
            })
            .await?;

        summary.products += 1;
        summary.product_tags += product.tags.len();
    }

    tracing::info!(?summary, "seeded sample catalogue");
    Ok(summary)
}
