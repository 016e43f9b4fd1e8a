use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::models::header::{HeaderConfigForm, HeaderConfigPatch};
use crate::AppState;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(get_header_config))
            .route(web::post().to(create_header_config)),
    )
    .service(web::resource("/{id}").route(web::patch().to(update_header_config)));
}

/// GET / - the active configuration, or an empty object when none exists yet
/// (the navigation chrome falls back to its hard-coded defaults).
async fn get_header_config(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    match state.storage.get_header_config().await? {
        Some(config) => Ok(HttpResponse::Ok().json(config)),
        None => Ok(HttpResponse::Ok().json(json!({}))),
    }
}

/// POST / - creates a configuration; an active one deactivates all others.
async fn create_header_config(
    state: web::Data<AppState>,
    form: web::Json<HeaderConfigForm>,
) -> AppResult<HttpResponse> {
    let config = state.storage.create_header_config(form.into_inner()).await?;
    Ok(HttpResponse::Created().json(config))
}

/// PATCH /{id}
async fn update_header_config(
    state: web::Data<AppState>,
    path: web::Path<String>,
    patch: web::Json<HeaderConfigPatch>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let config = state
        .storage
        .update_header_config(&id, patch.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Header config not found".to_string()))?;
    Ok(HttpResponse::Ok().json(config))
}
