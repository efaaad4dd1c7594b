use async_trait::async_trait;
use models::bson::{oid::ObjectId, Document};
use models::results::{DeleteResult, InsertResult, UpdateResult};

use crate::bookings::repository::BookingRepository;
use crate::catalog::repository::CatalogRepository;
use crate::errors::ServiceError;

/// Stand-in for both collections when the store client could not be built at
/// startup. Every call fails with the recorded reason so handlers answer 500
/// while the rest of the server keeps running.
#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    fn fail<T>(&self) -> Result<T, ServiceError> {
        Err(ServiceError::Db(format!("store unavailable: {}", self.reason)))
    }
}

#[async_trait]
impl CatalogRepository for UnavailableStore {
    async fn list_summaries(&self) -> Result<Vec<Document>, ServiceError> { self.fail() }
    async fn find_by_id(&self, _id: ObjectId) -> Result<Option<Document>, ServiceError> { self.fail() }
    async fn insert(&self, _service: Document) -> Result<InsertResult, ServiceError> { self.fail() }
}

#[async_trait]
impl BookingRepository for UnavailableStore {
    async fn insert(&self, _booking: Document) -> Result<InsertResult, ServiceError> { self.fail() }
    async fn find(&self, _email: Option<&str>) -> Result<Vec<Document>, ServiceError> { self.fail() }
    async fn delete_by_id(&self, _id: ObjectId) -> Result<DeleteResult, ServiceError> { self.fail() }
    async fn upsert_status(&self, _id: ObjectId, _status: Option<&str>) -> Result<UpdateResult, ServiceError> {
        self.fail()
    }
}
