pub mod catalog;
pub mod diagnostics;
pub mod leaderboard;
pub mod races;
pub mod seed;

use crate::db::{Document, StoreError};
use serde::Serialize;

/// Serializes an entity into a store document.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        _ => Err(StoreError::NotAnObject),
    }
}
