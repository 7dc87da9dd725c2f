use crate::error::AppError;
use crate::models::race::RaceCreate;
use crate::services::races as service;
use crate::state::AppState;
use ntex::util::Bytes;
use ntex::web::{self, HttpResponse};
use std::sync::Arc;

/// Parsed by hand so malformed bodies get the same `{"error": ...}` shape
/// as every other rejection.
fn parse_race_create(body: &[u8]) -> Result<RaceCreate, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::Validation(format!("Invalid race body: {}", e)))
}

pub async fn create_race(
    state: web::types::State<Arc<AppState>>,
    body: Bytes,
) -> Result<HttpResponse, AppError> {
    let req = parse_race_create(&body)?;
    let created = service::create_race(state.store()?, req)?;
    Ok(HttpResponse::Ok().json(&created))
}

pub async fn list_races(state: web::types::State<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let races = service::list_races(state.store()?)?;
    Ok(HttpResponse::Ok().json(&races))
}
