use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};
use models::results::{DeleteResult, InsertResult, UpdateResult};
use serde::Deserialize;
use serde_json::Value;
use service::auth::domain::TokenClaims;

use super::auth::ServerState;
use crate::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusInput {
    #[serde(default)]
    pub status: Option<String>,
}

/// POST /bookings — status is always stored as `pending`.
pub async fn create_booking(
    State(state): State<ServerState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<InsertResult>, ApiError> {
    let Json(body) = body?;
    Ok(Json(state.bookings.create(body).await?))
}

/// GET /bookings?email= — runs behind the bearer gate. The token's email must
/// equal the queried one, so a caller can only list their own bookings.
pub async fn list_bookings(
    State(state): State<ServerState>,
    Extension(claims): Extension<TokenClaims>,
    query: Result<Query<OwnerQuery>, QueryRejection>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let Query(query) = query?;
    if claims.email() != query.email.as_deref() {
        tracing::warn!(token_email = ?claims.email(), query_email = ?query.email, "owner mismatch");
        return Err(ApiError::Unauthorized);
    }
    Ok(Json(state.bookings.list(query.email.as_deref()).await?))
}

/// GET /allOrders
pub async fn list_all_bookings(State(state): State<ServerState>) -> Result<Json<Vec<Value>>, ApiError> {
    Ok(Json(state.bookings.list_all().await?))
}

/// DELETE /bookings/:id
pub async fn delete_booking(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResult>, ApiError> {
    Ok(Json(state.bookings.delete(&id).await?))
}

/// PATCH /bookings/:id — upserts: an unknown id creates `{_id, status}`.
pub async fn update_booking_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Result<Json<StatusInput>, JsonRejection>,
) -> Result<Json<UpdateResult>, ApiError> {
    let Json(input) = body?;
    Ok(Json(state.bookings.update_status(&id, input.status.as_deref()).await?))
}
