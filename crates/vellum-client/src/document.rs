use serde_json::{Map, Value};

/// A stored document: a flat, dynamically shaped JSON object.
///
/// The backend guarantees a string `id` member on every persisted
/// document; nothing else about the shape is assumed anywhere in this
/// crate.
pub type Document = Map<String, Value>;

/// Creation-timestamp field the backend stamps on insert. Latest-mode
/// queries sort on it, so documents they target must carry it.
pub const CREATED_AT_FIELD: &str = "created_at";

/// The document's `id`, if present as a string.
pub fn document_id(document: &Document) -> Option<&str> {
    document.get("id").and_then(Value::as_str)
}
