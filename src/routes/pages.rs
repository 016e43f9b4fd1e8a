use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::page::{PageForm, PagePatch};
use crate::AppState;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_page)))
        .service(
            web::resource("/{slug}")
                .route(web::get().to(get_page_by_slug))
                .route(web::patch().to(update_page)),
        );
}

/// GET /{slug}
async fn get_page_by_slug(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let page = state
        .storage
        .get_page_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Page not found".to_string()))?;
    Ok(HttpResponse::Ok().json(page))
}

/// POST /
async fn create_page(
    state: web::Data<AppState>,
    form: web::Json<PageForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    form.validate()?;
    let page = state.storage.create_page(form).await?;
    Ok(HttpResponse::Created().json(page))
}

/// PATCH /{id} - partial update; never creates.
async fn update_page(
    state: web::Data<AppState>,
    path: web::Path<String>,
    patch: web::Json<PagePatch>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let page = state
        .storage
        .update_page(&id, patch.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Page not found".to_string()))?;
    Ok(HttpResponse::Ok().json(page))
}
