use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::gallery::{GalleryImageForm, GalleryImagePatch};
use crate::AppState;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(get_gallery_images))
            .route(web::post().to(create_gallery_image)),
    )
    .service(
        web::resource("/{id}")
            .route(web::patch().to(update_gallery_image))
            .route(web::delete().to(delete_gallery_image)),
    );
}

/// GET /
async fn get_gallery_images(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let images = state.storage.get_gallery_images().await?;
    Ok(HttpResponse::Ok().json(images))
}

/// POST /
async fn create_gallery_image(
    state: web::Data<AppState>,
    form: web::Json<GalleryImageForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    form.validate()?;
    let image = state.storage.create_gallery_image(form).await?;
    Ok(HttpResponse::Created().json(image))
}

/// PATCH /{id}
async fn update_gallery_image(
    state: web::Data<AppState>,
    path: web::Path<String>,
    patch: web::Json<GalleryImagePatch>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let image = state
        .storage
        .update_gallery_image(&id, patch.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Gallery image not found".to_string()))?;
    Ok(HttpResponse::Ok().json(image))
}

/// DELETE /{id}
async fn delete_gallery_image(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let deleted = state.storage.delete_gallery_image(&id).await?;
    if !deleted {
        return Err(AppError::NotFound("Gallery image not found".to_string()));
    }
    Ok(HttpResponse::Ok().json(json!({ "message": "Gallery image deleted successfully" })))
}
