//! Product endpoints
//!
//! Bodies carry the product columns plus an optional `tagIds` array. On
//! create every listed tag is associated; on update a present `tagIds`
//! replaces the product's tag set and an absent one leaves it alone.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Deserializer};

use super::Message;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::{
    Name, NewProduct, Price, ProductChanges, ProductDetail, RawPrice, Stock, TagIds,
    ValidationError,
};

/// Keep an explicit `null` apart from an absent field: absent stays `None`
/// (via `#[serde(default)]`), `null` becomes `Some(None)`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Create product request
///
/// ```json
/// {
///   "product_name": "Basketball",
///   "price": 200.00,
///   "stock": 3,
///   "tagIds": [1, 2, 3, 4]
/// }
/// ```
///
/// `price` may also be a decimal string such as `"200.00"`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateProductRequest {
    pub product_name: Option<String>,
    pub price: Option<RawPrice>,
    pub stock: Option<i64>,
    pub category_id: Option<i32>,
    #[serde(rename = "tagIds", alias = "tag_ids")]
    pub tag_ids: Option<Vec<i32>>,
}

impl CreateProductRequest {
    pub fn validate(self) -> Result<NewProduct, ValidationError> {
        let price = self.price.ok_or(ValidationError::Missing { field: "price" })?;

        Ok(NewProduct {
            product_name: Name::required("product_name", self.product_name.as_deref())?,
            price: Price::try_from(price)?,
            stock: self.stock.map(Stock::new).transpose()?.unwrap_or_default(),
            category_id: self.category_id,
            tag_ids: TagIds::new(self.tag_ids.as_deref().unwrap_or_default())?,
        })
    }
}

/// Update product request; every field is optional
///
/// `"category_id": null` detaches the product from its category.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub product_name: Option<String>,
    pub price: Option<RawPrice>,
    pub stock: Option<i64>,
    #[serde(default, deserialize_with = "nullable")]
    pub category_id: Option<Option<i32>>,
    #[serde(rename = "tagIds", alias = "tag_ids")]
    pub tag_ids: Option<Vec<i32>>,
}

impl UpdateProductRequest {
    pub fn validate(self) -> Result<ProductChanges, ValidationError> {
        Ok(ProductChanges {
            product_name: self
                .product_name
                .as_deref()
                .map(|s| Name::new("product_name", s))
                .transpose()?,
            price: self.price.map(Price::try_from).transpose()?,
            stock: self.stock.map(Stock::new).transpose()?,
            category_id: self.category_id,
            tag_ids: self.tag_ids.as_deref().map(TagIds::new).transpose()?,
        })
    }
}

/// GET /products - list products with category and tags
async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductDetail>>, ApiError> {
    Ok(Json(state.store.list_products().await?))
}

/// GET /products/{id}
async fn get_product(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<ProductDetail>, ApiError> {
    Ok(Json(state.store.get_product(id).await?))
}

/// POST /products - create a product and its tag associations
async fn create_product(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateProductRequest>,
) -> Result<Json<ProductDetail>, ApiError> {
    let product = state.store.create_product(req.validate()?).await?;

    tracing::info!(
        product_id = product.product.id,
        tags = product.tags.len(),
        "product created"
    );
    Ok(Json(product))
}

/// PUT /products/{id} - update fields and reconcile tags
async fn update_product(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(req): ValidJson<UpdateProductRequest>,
) -> Result<Json<ProductDetail>, ApiError> {
    let product = state.store.update_product(id, req.validate()?).await?;

    tracing::info!(product_id = id, "product updated");
    Ok(Json(product))
}

/// DELETE /products/{id}
async fn delete_product(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Message>, ApiError> {
    state.store.delete_product(id).await?;

    tracing::info!(product_id = id, "product deleted");
    Ok(Json(Message::new("Product deleted successfully!")))
}

/// Product routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product)
                .put(update_product)
                .delete(delete_product),
        )
}
