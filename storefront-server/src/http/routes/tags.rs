//! Tag endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;

use super::Message;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::{Name, TagWithProducts};

/// Create/update tag request
#[derive(Debug, Deserialize)]
pub struct TagRequest {
    pub tag_name: Option<String>,
}

impl TagRequest {
    fn name(&self) -> Result<Name, ApiError> {
        Ok(Name::required("tag_name", self.tag_name.as_deref())?)
    }
}

/// GET /tags - list tags with their products
async fn list_tags(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TagWithProducts>>, ApiError> {
    Ok(Json(state.store.list_tags().await?))
}

/// GET /tags/{id}
async fn get_tag(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<TagWithProducts>, ApiError> {
    Ok(Json(state.store.get_tag(id).await?))
}

/// POST /tags
async fn create_tag(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<TagRequest>,
) -> Result<Json<TagWithProducts>, ApiError> {
    let tag = state.store.create_tag(req.name()?).await?;

    tracing::info!(tag_id = tag.id, "tag created");
    Ok(Json(TagWithProducts {
        tag,
        products: Vec::new(),
    }))
}

/// PUT /tags/{id}
async fn update_tag(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(req): ValidJson<TagRequest>,
) -> Result<Json<Message>, ApiError> {
    state.store.update_tag(id, req.name()?).await?;
    Ok(Json(Message::new("Tag updated successfully!")))
}

/// DELETE /tags/{id} - delete a tag and its product associations
async fn delete_tag(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Message>, ApiError> {
    state.store.delete_tag(id).await?;

    tracing::info!(tag_id = id, "tag deleted");
    Ok(Json(Message::new("Tag deleted successfully!")))
}

/// Tag routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tags", get(list_tags).post(create_tag))
        .route(
            "/tags/{id}",
            get(get_tag).put(update_tag).delete(delete_tag),
        )
}
