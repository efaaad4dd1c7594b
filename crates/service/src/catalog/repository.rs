use async_trait::async_trait;
use futures::TryStreamExt;
use models::bson::{doc, oid::ObjectId, Document};
use models::catalog;
use models::results::InsertResult;
use mongodb::{Collection, Database};

use crate::errors::ServiceError;

/// Persistence for the `services` collection.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Every service, projected to the listing fields.
    async fn list_summaries(&self) -> Result<Vec<Document>, ServiceError>;
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, ServiceError>;
    async fn insert(&self, service: Document) -> Result<InsertResult, ServiceError>;
}

/// MongoDB-backed repository implementation.
#[derive(Clone)]
pub struct MongoCatalogRepository {
    collection: Collection<Document>,
}

impl MongoCatalogRepository {
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection(catalog::COLLECTION) }
    }
}

#[async_trait]
impl CatalogRepository for MongoCatalogRepository {
    async fn list_summaries(&self) -> Result<Vec<Document>, ServiceError> {
        let cursor = self
            .collection
            .find(doc! {})
            .projection(catalog::summary_projection())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, ServiceError> {
        Ok(self.collection.find_one(catalog::by_id(id)).await?)
    }

    async fn insert(&self, service: Document) -> Result<InsertResult, ServiceError> {
        Ok(self.collection.insert_one(service).await?.into())
    }
}

/// In-memory repository for tests and local runs without a deployment.
pub mod mock {
    use super::*;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct InMemoryCatalogRepository {
        docs: RwLock<Vec<Document>>,
    }

    impl InMemoryCatalogRepository {
        /// Seed with full documents; missing `_id`s are generated.
        pub fn with_documents(docs: Vec<Document>) -> Self {
            let docs = docs
                .into_iter()
                .map(|mut d| {
                    if !d.contains_key("_id") {
                        d.insert("_id", ObjectId::new());
                    }
                    d
                })
                .collect();
            Self { docs: RwLock::new(docs) }
        }
    }

    #[async_trait]
    impl CatalogRepository for InMemoryCatalogRepository {
        async fn list_summaries(&self) -> Result<Vec<Document>, ServiceError> {
            let docs = self.docs.read().await;
            Ok(docs.iter().map(catalog::project_summary).collect())
        }

        async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, ServiceError> {
            let docs = self.docs.read().await;
            Ok(docs.iter().find(|d| d.get_object_id("_id").ok() == Some(id)).cloned())
        }

        async fn insert(&self, mut service: Document) -> Result<InsertResult, ServiceError> {
            let id = ObjectId::new();
            service.insert("_id", id);
            self.docs.write().await.push(service);
            Ok(InsertResult::new(id.into()))
        }
    }
}
