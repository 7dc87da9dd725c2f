use crate::db::{Document, DocumentStore, Filter, FindOptions};
use crate::error::AppError;
use crate::models::race::{Race, RaceCreate, RaceCreated};
use crate::models::Entity;
use crate::services::to_document;
use crate::validation;

pub const RECENT_RACES_LIMIT: u32 = 50;

pub fn create_race(store: &dyn DocumentStore, req: RaceCreate) -> Result<RaceCreated, AppError> {
    validation::validate_race_create(&req)?;

    let race = Race::from(req);
    let mut doc = to_document(&race)?;
    // starts_at is never set at creation
    doc.remove("starts_at");

    let id = store.insert_one(Race::COLLECTION, doc)?;
    log::info!("created race {} on map {}", id, race.map_code);
    Ok(RaceCreated { id: id.to_string() })
}

/// Most recent races, newest first.
pub fn list_races(store: &dyn DocumentStore) -> Result<Vec<Document>, AppError> {
    let docs = store.find(
        Race::COLLECTION,
        &Filter::all(),
        &FindOptions::newest_first(RECENT_RACES_LIMIT),
    )?;
    Ok(docs.into_iter().map(|d| d.into_public()).collect())
}
