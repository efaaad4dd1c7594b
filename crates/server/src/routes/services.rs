use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use models::results::InsertResult;
use serde_json::Value;

use super::auth::ServerState;
use crate::errors::ApiError;

/// GET /services — every service, projected to `_id`, `title`, `img`, `price`.
pub async fn list_services(State(state): State<ServerState>) -> Result<Json<Vec<Value>>, ApiError> {
    Ok(Json(state.catalog.list().await?))
}

/// GET /services/:id — the service, or `null` when no document matches.
pub async fn get_service(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Value>>, ApiError> {
    Ok(Json(state.catalog.get(&id).await?))
}

/// POST /addService
pub async fn add_service(
    State(state): State<ServerState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<InsertResult>, ApiError> {
    let Json(body) = body?;
    Ok(Json(state.catalog.add(body).await?))
}
