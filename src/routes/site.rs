use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppResult;
use crate::render::{self, HeaderStyles, Section};
use crate::AppState;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/{slug}").route(web::get().to(get_render_plan)));
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderPlanResponse {
    sections: Vec<Section>,
    header_styles: HeaderStyles,
}

/// GET /{slug} - the computed section sequence for the public page plus the
/// header styling derived from the active configuration.
async fn get_render_plan(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let blocks = state.storage.get_layout_blocks_by_page_slug(&slug).await?;
    let header_config = state.storage.get_header_config().await?;

    Ok(HttpResponse::Ok().json(RenderPlanResponse {
        sections: render::page_render_plan(&blocks),
        header_styles: render::header_styles(header_config.as_ref()),
    }))
}
