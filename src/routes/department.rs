use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        department_dto::{DepartmentListResponse, SaveDepartmentPayload},
        MutationResponse,
    },
    error::Result,
    routes::extract::ApiJson,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/cms/departments",
    responses(
        (status = 200, description = "Active departments", body = DepartmentListResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_departments(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.department_service.list_active().await?;
    Ok(Json(DepartmentListResponse { items }))
}

#[utoipa::path(
    post,
    path = "/api/cms/departments",
    request_body = SaveDepartmentPayload,
    responses(
        (status = 201, description = "Department created, departments re-listed"),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Slug already in use")
    )
)]
#[axum::debug_handler]
pub async fn create_department(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SaveDepartmentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let items = state.department_service.save(None, payload).await?;
    Ok((StatusCode::CREATED, Json(MutationResponse::relisted(items))))
}

#[utoipa::path(
    put,
    path = "/api/cms/departments/{id}",
    params(
        ("id" = Uuid, Path, description = "Department ID")
    ),
    request_body = SaveDepartmentPayload,
    responses(
        (status = 200, description = "Department updated, departments re-listed"),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Slug already in use")
    )
)]
#[axum::debug_handler]
pub async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<SaveDepartmentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let items = state.department_service.save(Some(id), payload).await?;
    Ok(Json(MutationResponse::relisted(items)))
}

#[utoipa::path(
    delete,
    path = "/api/cms/departments/{id}",
    params(
        ("id" = Uuid, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Department deleted, departments re-listed"),
        (status = 404, description = "Department not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let items = state.department_service.delete(id).await?;
    Ok(Json(MutationResponse::relisted(items)))
}
