use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::testimonial::{TestimonialForm, TestimonialPatch};
use crate::AppState;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(get_testimonials))
            .route(web::post().to(create_testimonial)),
    )
    .service(
        web::resource("/{id}")
            .route(web::patch().to(update_testimonial))
            .route(web::delete().to(delete_testimonial)),
    );
}

/// GET /
async fn get_testimonials(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let testimonials = state.storage.get_testimonials().await?;
    Ok(HttpResponse::Ok().json(testimonials))
}

/// POST /
async fn create_testimonial(
    state: web::Data<AppState>,
    form: web::Json<TestimonialForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    form.validate()?;
    let testimonial = state.storage.create_testimonial(form).await?;
    Ok(HttpResponse::Created().json(testimonial))
}

/// PATCH /{id}
async fn update_testimonial(
    state: web::Data<AppState>,
    path: web::Path<String>,
    patch: web::Json<TestimonialPatch>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let patch = patch.into_inner();
    patch.validate()?;
    let testimonial = state
        .storage
        .update_testimonial(&id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Testimonial not found".to_string()))?;
    Ok(HttpResponse::Ok().json(testimonial))
}

/// DELETE /{id}
async fn delete_testimonial(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let deleted = state.storage.delete_testimonial(&id).await?;
    if !deleted {
        return Err(AppError::NotFound("Testimonial not found".to_string()));
    }
    Ok(HttpResponse::Ok().json(json!({ "message": "Testimonial deleted successfully" })))
}
