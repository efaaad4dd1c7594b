use mongodb::bson::{self, oid::ObjectId, Bson, Document};
use serde_json::Value;

use crate::errors::ModelError;

/// Parse a path segment into an `ObjectId`, rejecting anything that is not 24 hex chars.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, ModelError> {
    ObjectId::parse_str(raw).map_err(|_| ModelError::InvalidId(raw.to_string()))
}

/// Convert a JSON request body into a BSON document. Only objects are accepted.
pub fn from_json(value: Value) -> Result<Document, ModelError> {
    match value {
        Value::Object(map) => bson::to_document(&map).map_err(|e| ModelError::Validation(e.to_string())),
        other => Err(ModelError::Validation(format!("expected a JSON object, got {}", kind(&other)))),
    }
}

/// Render a stored document as plain JSON. Object ids become hex strings and
/// dates become RFC 3339 strings; other values use relaxed extended JSON.
pub fn to_json(doc: Document) -> Value {
    bson_to_json(Bson::Document(doc))
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => Value::String(
            dt.try_to_rfc3339_string().unwrap_or_else(|_| dt.timestamp_millis().to_string()),
        ),
        Bson::Document(doc) => Value::Object(
            doc.into_iter().map(|(k, v)| (k, bson_to_json(v))).collect(),
        ),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
