use configs::DatabaseConfig;
use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Database,
};
use tracing::{error, info};

/// Build the shared, pooled client. Only the SRV lookup of a `mongodb+srv` URL
/// happens here; the driver connects lazily on first use.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<Client> {
    let mut options = ClientOptions::parse(&cfg.url).await?;
    options.max_pool_size = Some(cfg.max_pool_size);
    options.app_name = Some("car-doctor-server".to_string());
    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    let client = Client::with_options(options)?;
    Ok(client)
}

pub fn database(client: &Client, cfg: &DatabaseConfig) -> Database {
    client.database(&cfg.name)
}

/// Ping the deployment. Failure is reported but never fatal.
pub async fn ping(client: &Client) -> bool {
    match client.database("admin").run_command(doc! { "ping": 1 }).await {
        Ok(_) => {
            info!("Pinged your deployment. You successfully connected to MongoDB!");
            true
        }
        Err(e) => {
            error!(error = %e, "mongodb ping failed");
            false
        }
    }
}
