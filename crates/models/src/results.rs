use mongodb::bson::Bson;
use serde::Serialize;
use serde_json::Value;

use crate::document::bson_to_json;

/// Outcome of an insert, shaped like the driver's JSON result.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: Value,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<Value>,
}

impl InsertResult {
    pub fn new(inserted_id: Bson) -> Self {
        Self { acknowledged: true, inserted_id: bson_to_json(inserted_id) }
    }
}

impl UpdateResult {
    pub fn new(matched_count: u64, modified_count: u64, upserted_id: Option<Bson>) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_count: u64::from(upserted_id.is_some()),
            upserted_id: upserted_id.map(bson_to_json),
        }
    }
}

impl From<mongodb::results::InsertOneResult> for InsertResult {
    fn from(r: mongodb::results::InsertOneResult) -> Self {
        Self::new(r.inserted_id)
    }
}

impl From<mongodb::results::DeleteResult> for DeleteResult {
    fn from(r: mongodb::results::DeleteResult) -> Self {
        Self { acknowledged: true, deleted_count: r.deleted_count }
    }
}

impl From<mongodb::results::UpdateResult> for UpdateResult {
    fn from(r: mongodb::results::UpdateResult) -> Self {
        Self::new(r.matched_count, r.modified_count, r.upserted_id)
    }
}
