use mongodb::bson::{doc, oid::ObjectId, Document};

pub const COLLECTION: &str = "services";

/// Fields returned by the catalog listing.
pub const SUMMARY_FIELDS: [&str; 4] = ["_id", "title", "img", "price"];

pub fn summary_projection() -> Document {
    doc! { "_id": 1, "title": 1, "img": 1, "price": 1 }
}

pub fn by_id(id: ObjectId) -> Document {
    doc! { "_id": id }
}

/// Prepare a caller-supplied service for insertion; ids are always store-generated.
pub fn new_service(mut body: Document) -> Document {
    body.remove("_id");
    body
}

/// Keep only the listing fields of a full service document.
pub fn project_summary(doc: &Document) -> Document {
    let mut out = Document::new();
    for key in SUMMARY_FIELDS {
        if let Some(v) = doc.get(key) {
            out.insert(key, v.clone());
        }
    }
    out
}
