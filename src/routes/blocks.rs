use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::models::block::{
    BlockContent, BlockOrder, LayoutBlockForm, LayoutBlockPatch, LayoutBlockUpdateForm,
    NewLayoutBlock, ReorderRequest,
};
use crate::registry;
use crate::AppState;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    // "/reorder" must precede the dynamic segment, otherwise it would be
    // captured as an id.
    cfg.service(web::resource("").route(web::post().to(create_block)))
        .service(web::resource("/reorder").route(web::put().to(reorder_blocks)))
        .service(
            web::resource("/{key}")
                .route(web::get().to(get_blocks_by_slug))
                .route(web::patch().to(update_block))
                .route(web::delete().to(delete_block)),
        );
}

/// GET /{slug} - all blocks of the page, ordered. Unknown slugs yield an
/// empty list so a fresh site renders its fallback sections.
async fn get_blocks_by_slug(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let blocks = state.storage.get_layout_blocks_by_page_slug(&slug).await?;
    Ok(HttpResponse::Ok().json(blocks))
}

/// POST / - create a block. The content payload is validated against the
/// declared type before anything is stored.
async fn create_block(
    state: web::Data<AppState>,
    form: web::Json<LayoutBlockForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    let content = BlockContent::from_value(form.block_type, form.content).map_err(|e| {
        AppError::BadRequest(format!(
            "content does not match block type '{}': {}",
            form.block_type, e
        ))
    })?;

    // The admin UI sends either a page id or a slug; resolve to the id so
    // both backends see a real foreign key.
    let page_id = match state.storage.get_page(&form.page_id).await? {
        Some(page) => page.id,
        None => state
            .storage
            .get_page_by_slug(&form.page_id)
            .await?
            .map(|p| p.id)
            .ok_or_else(|| {
                AppError::BadRequest(format!("unknown page '{}'", form.page_id))
            })?,
    };

    let block = state
        .storage
        .create_layout_block(NewLayoutBlock {
            page_id,
            content,
            order: form.order.unwrap_or(0),
            is_visible: form.is_visible.unwrap_or(true),
        })
        .await?;
    Ok(HttpResponse::Created().json(block))
}

/// PATCH /{id} - partial update. A type change revalidates the content
/// (incoming or existing) against the new type.
async fn update_block(
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Json<LayoutBlockUpdateForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let form = form.into_inner();

    let existing = state
        .storage
        .get_layout_block(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Block not found".to_string()))?;

    let effective_type = form.block_type.unwrap_or(existing.block_type);
    let content = match form.content {
        Some(value) => Some(BlockContent::from_value(effective_type, value).map_err(|e| {
            AppError::BadRequest(format!(
                "content does not match block type '{}': {}",
                effective_type, e
            ))
        })?),
        None if effective_type != existing.block_type => {
            // Retag the existing payload; reject if it cannot satisfy the
            // new type's schema.
            Some(
                BlockContent::from_value(effective_type, existing.content.to_value()).map_err(
                    |e| {
                        AppError::BadRequest(format!(
                            "existing content does not match block type '{}': {}",
                            effective_type, e
                        ))
                    },
                )?,
            )
        }
        None => None,
    };

    let block = state
        .storage
        .update_layout_block(
            &id,
            LayoutBlockPatch {
                content,
                order: form.order,
                is_visible: form.is_visible,
            },
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Block not found".to_string()))?;
    Ok(HttpResponse::Ok().json(block))
}

/// DELETE /{id}
async fn delete_block(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let deleted = state.storage.delete_layout_block(&id).await?;
    if !deleted {
        return Err(AppError::NotFound("Block not found".to_string()));
    }
    Ok(HttpResponse::Ok().json(json!({ "message": "Block deleted successfully" })))
}

/// PUT /reorder - rewrites every submitted block's order to its 1-based
/// array position; client-supplied order values are ignored. Unknown ids are
/// skipped by the storage layer.
async fn reorder_blocks(
    state: web::Data<AppState>,
    body: web::Json<ReorderRequest>,
) -> AppResult<HttpResponse> {
    let entries: Vec<BlockOrder> = body
        .blocks
        .iter()
        .enumerate()
        .map(|(index, entry)| BlockOrder {
            id: entry.id.clone(),
            order: (index + 1) as i64,
        })
        .collect();

    state.storage.reorder_layout_blocks(&entries).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Blocks reordered successfully" })))
}

/// GET /block-types - the registry the admin UI builds its pickers from.
pub async fn get_block_types() -> HttpResponse {
    HttpResponse::Ok().json(registry::catalog())
}
