use crate::db::{Document, DocumentStore, Filter, FindOptions};
use crate::error::AppError;
use crate::models::map::Map;
use crate::models::vehicle::Vehicle;
use crate::models::Entity;

fn list_enabled(store: &dyn DocumentStore, collection: &str) -> Result<Vec<Document>, AppError> {
    let docs = store.find(
        collection,
        &Filter::all().eq("is_enabled", true),
        &FindOptions::default(),
    )?;
    Ok(docs.into_iter().map(|d| d.into_public()).collect())
}

pub fn list_maps(store: &dyn DocumentStore) -> Result<Vec<Document>, AppError> {
    list_enabled(store, Map::COLLECTION)
}

pub fn list_vehicles(store: &dyn DocumentStore) -> Result<Vec<Document>, AppError> {
    list_enabled(store, Vehicle::COLLECTION)
}
