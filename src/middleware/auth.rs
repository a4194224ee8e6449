use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::AppState;

pub const EDITOR_ROLE: &str = "editor";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub role: String,
}

/// Signed-in editor, resolved per request and passed to handlers as an
/// extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CurrentUser {
    pub email: String,
    pub role: String,
}

fn reject(status: StatusCode, code: &str) -> Response {
    (status, Json(json!({ "success": false, "error": code }))).into_response()
}

/// Extracts the token of an `Authorization: Bearer` header.
pub fn bearer_token(headers: &HeaderMap) -> std::result::Result<&str, &'static str> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or("missing_authorization")?;
    let value = header.to_str().map_err(|_| "bad_authorization")?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or("unsupported_scheme")
}

pub async fn require_editor(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(req.headers()) {
        Ok(token) => token.to_string(),
        Err(code) => return reject(StatusCode::UNAUTHORIZED, code),
    };

    match state.auth_service.verify_token(&token) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}
