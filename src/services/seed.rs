use crate::db::{Document, DocumentStore, Filter};
use crate::error::AppError;
use crate::models::map::Map;
use crate::models::vehicle::Vehicle;
use crate::models::Entity;
use crate::services::to_document;
use serde::Serialize;

const DEFAULT_VEHICLES: &[(&str, &str, &str)] = &[
    ("Zentorno", "zentorno", "Super"),
    ("Elegy Retro", "elegy", "Sports"),
    ("Comet SR", "comet5", "Sports"),
];

const DEFAULT_MAPS: &[(&str, &str)] = &[
    ("Downtown Dash", "downtown_dash"),
    ("Vinewood Loop", "vinewood_loop"),
    ("Airport Circuit", "airport_circuit"),
];

const DEFAULT_AUTHOR: &str = "Flames";

#[derive(Debug, Serialize)]
pub struct SeedResult {
    pub status: &'static str,
    pub seeded: bool,
}

fn default_vehicles() -> Vec<Vehicle> {
    DEFAULT_VEHICLES
        .iter()
        .map(|(name, code, class)| Vehicle {
            name: name.to_string(),
            code: code.to_string(),
            class_name: Some(class.to_string()),
            is_enabled: true,
        })
        .collect()
}

fn default_maps() -> Vec<Map> {
    DEFAULT_MAPS
        .iter()
        .map(|(name, code)| Map {
            name: name.to_string(),
            code: code.to_string(),
            author: Some(DEFAULT_AUTHOR.to_string()),
            lap_length_m: None,
            checkpoints: None,
            is_enabled: true,
        })
        .collect()
}

fn seed_collection<T: Entity + Serialize>(
    store: &dyn DocumentStore,
    defaults: Vec<T>,
) -> Result<(), AppError> {
    if store.count_documents(T::COLLECTION, &Filter::all())? > 0 {
        return Ok(());
    }

    let docs = defaults
        .iter()
        .map(|item| {
            // optional fields are left out of seeded documents
            to_document(item).map(|doc| doc.into_iter().filter(|(_, v)| !v.is_null()).collect::<Document>())
        })
        .collect::<Result<Vec<_>, _>>()?;
    let ids = store.insert_many(T::COLLECTION, docs)?;
    log::info!("seeded {} {} documents", ids.len(), T::COLLECTION);
    Ok(())
}

/// Inserts the default vehicles and maps into whichever of the two
/// collections is empty.
pub fn seed(store: &dyn DocumentStore) -> Result<SeedResult, AppError> {
    seed_collection(store, default_vehicles())?;
    seed_collection(store, default_maps())?;
    Ok(SeedResult {
        status: "ok",
        seeded: true,
    })
}
