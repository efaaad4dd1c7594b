use mongodb::bson::{doc, oid::ObjectId, Bson, Document};

pub const COLLECTION: &str = "bookings";

/// Status every booking starts with. Later values are free-form.
pub const STATUS_PENDING: &str = "pending";

/// Prepare a caller-supplied booking for insertion: drop any `_id` and force
/// the initial status regardless of what the body carried.
pub fn new_booking(mut body: Document) -> Document {
    body.remove("_id");
    body.insert("status", STATUS_PENDING);
    body
}

/// Filter for the owner listing; no email means every booking.
pub fn owner_filter(email: Option<&str>) -> Document {
    match email {
        Some(email) => doc! { "email": email },
        None => Document::new(),
    }
}

pub fn by_id(id: ObjectId) -> Document {
    doc! { "_id": id }
}

/// `$set` update for the status field. A missing status is stored as null.
pub fn status_update(status: Option<&str>) -> Document {
    let value = status.map(Bson::from).unwrap_or(Bson::Null);
    doc! { "$set": { "status": value } }
}
