use async_trait::async_trait;
use futures::TryStreamExt;
use models::bson::{oid::ObjectId, Bson, Document};
use models::booking;
use models::results::{DeleteResult, InsertResult, UpdateResult};
use mongodb::{Collection, Database};

use crate::errors::ServiceError;

/// Persistence for the `bookings` collection.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: Document) -> Result<InsertResult, ServiceError>;
    /// Bookings owned by `email`, or every booking when `None`.
    async fn find(&self, email: Option<&str>) -> Result<Vec<Document>, ServiceError>;
    async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteResult, ServiceError>;
    /// Set `status` on the booking, inserting `{_id, status}` when it does not exist.
    async fn upsert_status(&self, id: ObjectId, status: Option<&str>) -> Result<UpdateResult, ServiceError>;
}

/// MongoDB-backed repository implementation.
#[derive(Clone)]
pub struct MongoBookingRepository {
    collection: Collection<Document>,
}

impl MongoBookingRepository {
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection(booking::COLLECTION) }
    }
}

#[async_trait]
impl BookingRepository for MongoBookingRepository {
    async fn insert(&self, booking: Document) -> Result<InsertResult, ServiceError> {
        Ok(self.collection.insert_one(booking).await?.into())
    }

    async fn find(&self, email: Option<&str>) -> Result<Vec<Document>, ServiceError> {
        let cursor = self.collection.find(booking::owner_filter(email)).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteResult, ServiceError> {
        Ok(self.collection.delete_one(booking::by_id(id)).await?.into())
    }

    async fn upsert_status(&self, id: ObjectId, status: Option<&str>) -> Result<UpdateResult, ServiceError> {
        let res = self
            .collection
            .update_one(booking::by_id(id), booking::status_update(status))
            .upsert(true)
            .await?;
        Ok(res.into())
    }
}

/// In-memory repository mirroring the MongoDB semantics the handlers rely on.
pub mod mock {
    use super::*;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct InMemoryBookingRepository {
        docs: RwLock<Vec<Document>>,
    }

    impl InMemoryBookingRepository {
        /// Raw view of a stored booking, for assertions.
        pub async fn get(&self, id: ObjectId) -> Option<Document> {
            let docs = self.docs.read().await;
            docs.iter().find(|d| has_id(d, id)).cloned()
        }

        pub async fn len(&self) -> usize {
            self.docs.read().await.len()
        }
    }

    fn has_id(doc: &Document, id: ObjectId) -> bool {
        doc.get_object_id("_id").ok() == Some(id)
    }

    #[async_trait]
    impl BookingRepository for InMemoryBookingRepository {
        async fn insert(&self, mut booking: Document) -> Result<InsertResult, ServiceError> {
            let id = ObjectId::new();
            booking.insert("_id", id);
            self.docs.write().await.push(booking);
            Ok(InsertResult::new(id.into()))
        }

        async fn find(&self, email: Option<&str>) -> Result<Vec<Document>, ServiceError> {
            let docs = self.docs.read().await;
            Ok(docs
                .iter()
                .filter(|d| email.map_or(true, |e| d.get_str("email").ok() == Some(e)))
                .cloned()
                .collect())
        }

        async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteResult, ServiceError> {
            let mut docs = self.docs.write().await;
            let before = docs.len();
            if let Some(pos) = docs.iter().position(|d| has_id(d, id)) {
                docs.remove(pos);
            }
            Ok(DeleteResult { acknowledged: true, deleted_count: (before - docs.len()) as u64 })
        }

        async fn upsert_status(&self, id: ObjectId, status: Option<&str>) -> Result<UpdateResult, ServiceError> {
            let value = status.map(Bson::from).unwrap_or(Bson::Null);
            let mut docs = self.docs.write().await;
            match docs.iter_mut().find(|d| has_id(d, id)) {
                Some(existing) => {
                    let modified = existing.get("status") != Some(&value);
                    existing.insert("status", value);
                    Ok(UpdateResult::new(1, u64::from(modified), None))
                }
                None => {
                    let mut created = Document::new();
                    created.insert("_id", id);
                    created.insert("status", value);
                    docs.push(created);
                    Ok(UpdateResult::new(0, 0, Some(id.into())))
                }
            }
        }
    }
}
