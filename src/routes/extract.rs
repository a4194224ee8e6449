use axum::extract::FromRequest;

use crate::error::Error;

/// `axum::Json` whose rejections answer with the API error body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);
