use crate::error::AppError;
use crate::services::leaderboard as service;
use crate::state::AppState;
use ntex::web::{self, HttpResponse};
use std::sync::Arc;

pub async fn get_leaderboard(
    state: web::types::State<Arc<AppState>>,
    path: web::types::Path<String>,
) -> Result<HttpResponse, AppError> {
    let store = state.store()?;
    let race_id = path.into_inner();
    let entries = service::rank(store, &race_id)?;
    Ok(HttpResponse::Ok().json(&entries))
}
