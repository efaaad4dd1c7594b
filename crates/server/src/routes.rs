pub mod auth;
pub mod bookings;
pub mod services;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use self::auth::ServerState;

pub const ROOT_MESSAGE: &str = "car doctor server running on this server";

/// GET / — plain-text liveness message.
pub async fn root() -> &'static str {
    ROOT_MESSAGE
}

/// Build the full application router: public catalog and booking routes plus
/// the token-gated owner listing.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/jwt", post(auth::issue_token))
        .route("/services", get(services::list_services))
        .route("/services/:id", get(services::get_service))
        .route("/addService", post(services::add_service))
        .route("/bookings", post(bookings::create_booking))
        .route("/allOrders", get(bookings::list_all_bookings))
        .route(
            "/bookings/:id",
            delete(bookings::delete_booking).patch(bookings::update_booking_status),
        );

    // Same path as the public POST /bookings; only the GET is gated.
    let protected = Router::new()
        .route("/bookings", get(bookings::list_bookings))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer_token,
        ));

    public
        .merge(protected)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request (method, path), headers left out
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                // request arrived
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and transport errors
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
