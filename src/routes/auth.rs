use axum::{
    extract::{Extension, State},
    response::Json,
};
use validator::Validate;

use crate::{
    dto::auth_dto::{LoginPayload, LoginResponse},
    error::Result,
    middleware::auth::CurrentUser,
    routes::extract::ApiJson,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 401, description = "Wrong password"),
        (status = 403, description = "E-mail is not allowed to use the editor")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginPayload>,
) -> Result<Json<LoginResponse>> {
    payload.validate()?;
    let response = state.auth_service.sign_in(&payload)?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current editor", body = CurrentUser),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn me(Extension(user): Extension<CurrentUser>) -> Result<Json<CurrentUser>> {
    Ok(Json(user))
}
