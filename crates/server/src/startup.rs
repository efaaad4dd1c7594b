use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use service::auth::TokenService;
use service::bookings::repository::MongoBookingRepository;
use service::catalog::repository::MongoCatalogRepository;
use service::unavailable::UnavailableStore;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::routes::{self, auth::ServerState};

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect the shared MongoDB client and wire the repositories into app state.
/// Store problems never stop the server: the ping runs in the background, and if
/// the client cannot be built (e.g. SRV lookup fails) the store-backed routes
/// answer 500 while `/` and `/jwt` keep working.
pub async fn build_state(cfg: &AppConfig) -> ServerState {
    let tokens = TokenService::new(&cfg.auth.jwt_secret, cfg.auth.token_ttl_secs);

    let client = match models::db::connect(&cfg.database).await {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "mongodb client setup failed; serving without a store");
            let store = Arc::new(UnavailableStore::new(e.to_string()));
            return ServerState::new(store.clone(), store, tokens);
        }
    };
    let db = models::db::database(&client, &cfg.database);

    // Ping off the startup path; outcome is only logged
    tokio::spawn(async move {
        models::db::ping(&client).await;
    });

    ServerState::new(
        Arc::new(MongoCatalogRepository::new(&db)),
        Arc::new(MongoBookingRepository::new(&db)),
        tokens,
    )
}

/// Bind and serve `app` until the listener fails.
pub async fn serve(addr: SocketAddr, app: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "car server running this port {}", addr.port());
    axum::serve(listener, app).await?;
    Ok(())
}

/// Public entry: load config, build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    // Config errors (missing secret, bad port) are fatal
    let cfg = AppConfig::load_and_validate()?;
    let state = build_state(&cfg).await;
    let app = routes::build_router(state, build_cors());

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    serve(addr, app).await
}
