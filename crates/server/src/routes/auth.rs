use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
    Json,
};
use common::types::TokenResponse;
use serde_json::Value;
use service::auth::TokenService;
use service::bookings::repository::BookingRepository;
use service::catalog::repository::CatalogRepository;
use service::{BookingService, CatalogService};

use crate::errors::ApiError;

/// Shared handles for every request. Cloning is cheap; the store client
/// underneath is a single pooled connection.
#[derive(Clone)]
pub struct ServerState {
    pub catalog: CatalogService,
    pub bookings: BookingService,
    pub tokens: TokenService,
}

impl ServerState {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        bookings: Arc<dyn BookingRepository>,
        tokens: TokenService,
    ) -> Self {
        Self {
            catalog: CatalogService::new(catalog),
            bookings: BookingService::new(bookings),
            tokens,
        }
    }
}

/// POST /jwt — sign whatever identity object the caller posts.
pub async fn issue_token(
    State(state): State<ServerState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(identity) = body?;
    let token = state.tokens.issue(identity)?;
    Ok(Json(TokenResponse { token }))
}

/// Token is the second space-separated part of `Authorization` (`Bearer <token>`).
fn bearer_token(req: &Request) -> Option<&str> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    header.split(' ').nth(1).filter(|t| !t.is_empty())
}

/// Reject requests without a valid bearer token; on success the decoded
/// `TokenClaims` are stored in the request extensions.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_owned();
    let Some(token) = bearer_token(&req) else {
        tracing::warn!(%path, "missing bearer token");
        return Err(ApiError::Unauthorized);
    };
    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::warn!(%path, err = %e, "token validation failed");
        ApiError::from(e)
    })?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
