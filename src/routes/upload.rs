use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;
use rand::Rng;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::models::upload::{UploadResponse, UploadedFileForm};
use crate::utils::time::current_timestamp_millis;
use crate::AppState;

const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/upload").route(web::post().to(upload_file)))
        .service(web::resource("/uploads").route(web::get().to(get_uploaded_files)))
        .service(web::resource("/uploads/{id}").route(web::delete().to(delete_uploaded_file)));
}

/// POST /upload - accepts one image or video file (<= 10MB), writes it under
/// the upload directory and records its metadata. Size and type checks
/// happen while the multipart stream is parsed, before anything is stored.
async fn upload_file(state: web::Data<AppState>, mut payload: Multipart) -> AppResult<HttpResponse> {
    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {}", e)))?;

        // Form values carry no filename; the first file field wins.
        let original_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(|name| name.to_string());
        let Some(original_name) = original_name else {
            continue;
        };

        let mime_type = field
            .content_type()
            .cloned()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM);
        if mime_type.type_() != mime::IMAGE && mime_type.type_() != mime::VIDEO {
            return Err(AppError::BadRequest(
                "Only image and video files are allowed".to_string(),
            ));
        }

        let mut data: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk
                .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;
            if data.len() + chunk.len() > MAX_UPLOAD_SIZE {
                return Err(AppError::BadRequest(
                    "File exceeds the 10MB upload limit".to_string(),
                ));
            }
            data.extend_from_slice(&chunk);
        }

        let extension = std::path::Path::new(&original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .or_else(|| {
                mime_guess::get_mime_extensions(&mime_type)
                    .and_then(|exts| exts.first())
                    .map(|e| format!(".{}", e))
            })
            .unwrap_or_default();
        let suffix: u32 = rand::rng().random_range(0..1_000_000_000);
        let filename = format!("file-{}-{}{}", current_timestamp_millis(), suffix, extension);

        let dir = std::path::Path::new(&state.config.upload_dir);
        tokio::fs::create_dir_all(dir).await?;
        let disk_path = dir.join(&filename);
        tokio::fs::write(&disk_path, &data).await?;

        let file = state
            .storage
            .create_uploaded_file(UploadedFileForm {
                filename: filename.clone(),
                original_name,
                mime_type: mime_type.to_string(),
                size: data.len() as i64,
                path: disk_path.to_string_lossy().into_owned(),
                url: format!("/uploads/{}", filename),
                uploaded_by: None,
            })
            .await?;

        tracing::info!(filename = %file.filename, size = file.size, "File uploaded");
        return Ok(HttpResponse::Ok().json(UploadResponse {
            url: file.url,
            id: file.id,
            filename: file.filename,
        }));
    }

    Err(AppError::BadRequest("No file uploaded".to_string()))
}

/// GET /uploads - metadata for everything uploaded, newest first.
async fn get_uploaded_files(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let files = state.storage.get_uploaded_files().await?;
    Ok(HttpResponse::Ok().json(files))
}

/// DELETE /uploads/{id} - removes the record and best-effort removes the
/// bytes on disk.
async fn delete_uploaded_file(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let Some(file) = state.storage.get_uploaded_file(&id).await? else {
        return Err(AppError::NotFound("File not found".to_string()));
    };

    state.storage.delete_uploaded_file(&id).await?;
    if let Err(e) = tokio::fs::remove_file(&file.path).await {
        tracing::warn!("Failed to remove {} from disk: {}", file.path, e);
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "File deleted successfully" })))
}
