use std::sync::Arc;

use models::results::{DeleteResult, InsertResult, UpdateResult};
use models::{booking, document};
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::repository::BookingRepository;
use crate::errors::ServiceError;

/// Booking operations behind `/bookings` and `/allOrders`.
#[derive(Clone)]
pub struct BookingService {
    repo: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(repo: Arc<dyn BookingRepository>) -> Self { Self { repo } }

    /// Store a new booking. Any caller-supplied status is replaced by `pending`.
    #[instrument(skip(self, body))]
    pub async fn create(&self, body: Value) -> Result<InsertResult, ServiceError> {
        let doc = booking::new_booking(document::from_json(body)?);
        let res = self.repo.insert(doc).await?;
        info!(id = %res.inserted_id, "booking_created");
        Ok(res)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, email: Option<&str>) -> Result<Vec<Value>, ServiceError> {
        let docs = self.repo.find(email).await?;
        debug!(count = docs.len(), "bookings listed");
        Ok(docs.into_iter().map(document::to_json).collect())
    }

    pub async fn list_all(&self) -> Result<Vec<Value>, ServiceError> {
        self.list(None).await
    }

    /// Deleting an unknown id reports zero deletions rather than failing.
    #[instrument(skip(self))]
    pub async fn delete(&self, raw_id: &str) -> Result<DeleteResult, ServiceError> {
        let id = document::parse_object_id(raw_id)?;
        self.repo.delete_by_id(id).await
    }

    /// Update the status, creating `{_id, status}` when the booking is missing.
    #[instrument(skip(self))]
    pub async fn update_status(&self, raw_id: &str, status: Option<&str>) -> Result<UpdateResult, ServiceError> {
        let id = document::parse_object_id(raw_id)?;
        let res = self.repo.upsert_status(id, status).await?;
        if res.upserted_count > 0 {
            info!(%id, "booking_upserted_by_status_update");
        }
        Ok(res)
    }
}
