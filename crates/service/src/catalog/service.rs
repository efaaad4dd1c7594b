use std::sync::Arc;

use models::{catalog, document};
use models::results::InsertResult;
use serde_json::Value;
use tracing::{debug, instrument};

use super::repository::CatalogRepository;
use crate::errors::ServiceError;

/// Catalog operations behind `/services` and `/addService`.
#[derive(Clone)]
pub struct CatalogService {
    repo: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Value>, ServiceError> {
        let docs = self.repo.list_summaries().await?;
        debug!(count = docs.len(), "services listed");
        Ok(docs.into_iter().map(document::to_json).collect())
    }

    /// Look up one service. An unknown id is `Ok(None)`, a malformed one is an error.
    #[instrument(skip(self))]
    pub async fn get(&self, raw_id: &str) -> Result<Option<Value>, ServiceError> {
        let id = document::parse_object_id(raw_id)?;
        Ok(self.repo.find_by_id(id).await?.map(document::to_json))
    }

    #[instrument(skip(self, body))]
    pub async fn add(&self, body: Value) -> Result<InsertResult, ServiceError> {
        let service = catalog::new_service(document::from_json(body)?);
        self.repo.insert(service).await
    }
}
