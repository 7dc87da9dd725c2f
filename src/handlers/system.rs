use crate::error::AppError;
use crate::models::{SchemaInfo, REGISTRY};
use crate::services::{diagnostics, seed as seed_service};
use crate::state::AppState;
use ntex::web::{self, HttpResponse};
use std::sync::Arc;

pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(&diagnostics::root())
}

pub async fn check_environment(state: web::types::State<Arc<AppState>>) -> HttpResponse {
    let report = diagnostics::check_environment(state.try_store(), &state.config);
    HttpResponse::Ok().json(&report)
}

pub async fn schema_info() -> HttpResponse {
    HttpResponse::Ok().json(&SchemaInfo { models: REGISTRY })
}

pub async fn seed(state: web::types::State<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let result = seed_service::seed(state.store()?)?;
    Ok(HttpResponse::Ok().json(&result))
}
