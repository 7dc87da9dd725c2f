use crate::error::AppError;
use crate::services::catalog as service;
use crate::state::AppState;
use ntex::web::{self, HttpResponse};
use std::sync::Arc;

pub async fn get_maps(state: web::types::State<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let maps = service::list_maps(state.store()?)?;
    Ok(HttpResponse::Ok().json(&maps))
}

pub async fn get_vehicles(
    state: web::types::State<Arc<AppState>>,
) -> Result<HttpResponse, AppError> {
    let vehicles = service::list_vehicles(state.store()?)?;
    Ok(HttpResponse::Ok().json(&vehicles))
}
