use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::models::user::{LoginForm, UserResponse};
use crate::AppState;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/login").route(web::post().to(login)));
}

/// POST /login - single hard-coded admin credential check. The user record
/// must exist and the password must match the configured admin password;
/// nothing resembling real session management happens here.
async fn login(state: web::Data<AppState>, form: web::Json<LoginForm>) -> AppResult<HttpResponse> {
    let user = state
        .storage
        .get_user_by_email(&form.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if form.password != state.config.admin_password {
        return Err(AppError::InvalidCredentials);
    }

    Ok(HttpResponse::Ok().json(json!({ "user": UserResponse::from(&user) })))
}
