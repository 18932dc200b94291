//! Category endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;

use super::Message;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::{CategoryWithProducts, Name};

/// Create/update category request
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub category_name: Option<String>,
}

impl CategoryRequest {
    fn name(&self) -> Result<Name, ApiError> {
        Ok(Name::required("category_name", self.category_name.as_deref())?)
    }
}

/// GET /categories - list categories with their products
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CategoryWithProducts>>, ApiError> {
    let categories = state.store.list_categories().await?;
    Ok(Json(categories))
}

/// GET /categories/{id} - get one category with its products
async fn get_category(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<CategoryWithProducts>, ApiError> {
    let category = state.store.get_category(id).await?;
    Ok(Json(category))
}

/// POST /categories - create a category
async fn create_category(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CategoryRequest>,
) -> Result<Json<CategoryWithProducts>, ApiError> {
    let category = state.store.create_category(req.name()?).await?;

    tracing::info!(category_id = category.id, "category created");
    Ok(Json(CategoryWithProducts {
        category,
        products: Vec::new(),
    }))
}

/// PUT /categories/{id} - rename a category
async fn update_category(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(req): ValidJson<CategoryRequest>,
) -> Result<Json<Message>, ApiError> {
    state.store.update_category(id, req.name()?).await?;
    Ok(Json(Message::new("Category updated successfully!")))
}

/// DELETE /categories/{id} - delete a category, keeping its products
async fn delete_category(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Message>, ApiError> {
    state.store.delete_category(id).await?;

    tracing::info!(category_id = id, "category deleted");
    Ok(Json(Message::new("Category successfully deleted!")))
}

/// Category routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}
