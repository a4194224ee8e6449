use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        job_posting_dto::{
            DashboardResponse, JobPostingExport, JobPostingListResponse, MoveSectionPayload,
            SaveJobPostingPayload,
        },
        MutationResponse,
    },
    error::Result,
    models::job_posting::JobPosting,
    routes::extract::ApiJson,
    AppState,
};

const EXPORT_FILENAME: &str = "job-posting-data.json";

#[utoipa::path(
    get,
    path = "/api/cms/dashboard",
    responses(
        (status = 200, description = "Departments with counts and every posting", body = DashboardResponse)
    )
)]
#[axum::debug_handler]
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>> {
    let dashboard = state.job_posting_service.dashboard().await?;
    Ok(Json(dashboard))
}

#[utoipa::path(
    get,
    path = "/api/cms/jobs",
    responses(
        (status = 200, description = "All postings including inactive ones", body = JobPostingListResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.job_posting_service.list_all().await?;
    Ok(Json(JobPostingListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/api/cms/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job posting ID")
    ),
    responses(
        (status = 200, description = "Posting loaded into the editor", body = JobPosting),
        (status = 404, description = "Job posting not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobPosting>> {
    let posting = state.job_posting_service.get_by_id(id).await?;
    Ok(Json(posting))
}

#[utoipa::path(
    post,
    path = "/api/cms/jobs",
    request_body = SaveJobPostingPayload,
    responses(
        (status = 201, description = "Posting published, active postings re-listed"),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SaveJobPostingPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let items = state.job_posting_service.save(None, payload).await?;
    Ok((StatusCode::CREATED, Json(MutationResponse::relisted(items))))
}

#[utoipa::path(
    put,
    path = "/api/cms/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job posting ID")
    ),
    request_body = SaveJobPostingPayload,
    responses(
        (status = 200, description = "Posting updated, active postings re-listed"),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Job posting not found"),
        (status = 409, description = "Slug already in use")
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<SaveJobPostingPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let items = state.job_posting_service.save(Some(id), payload).await?;
    Ok(Json(MutationResponse::relisted(items)))
}

#[utoipa::path(
    delete,
    path = "/api/cms/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job posting ID")
    ),
    responses(
        (status = 200, description = "Posting deleted, active postings re-listed"),
        (status = 404, description = "Job posting not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let items = state.job_posting_service.delete(id).await?;
    Ok(Json(MutationResponse::relisted(items)))
}

#[utoipa::path(
    post,
    path = "/api/cms/jobs/{id}/sections/{index}/move",
    params(
        ("id" = Uuid, Path, description = "Job posting ID"),
        ("index" = usize, Path, description = "Zero-based section index")
    ),
    request_body = MoveSectionPayload,
    responses(
        (status = 200, description = "Posting with the new section order", body = JobPosting),
        (status = 404, description = "Job posting not found")
    )
)]
#[axum::debug_handler]
pub async fn move_section(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    ApiJson(payload): ApiJson<MoveSectionPayload>,
) -> Result<Json<JobPosting>> {
    let posting = state
        .job_posting_service
        .move_section(id, index, payload.direction)
        .await?;
    Ok(Json(posting))
}

#[utoipa::path(
    get,
    path = "/api/cms/jobs/{id}/export",
    params(
        ("id" = Uuid, Path, description = "Job posting ID")
    ),
    responses(
        (status = 200, description = "Editor state as a JSON download", body = JobPostingExport),
        (status = 404, description = "Job posting not found")
    )
)]
#[axum::debug_handler]
pub async fn export_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let export: JobPostingExport = state.job_posting_service.export(id).await?;
    let body = serde_json::to_vec_pretty(&export)?;
    let disposition = format!("attachment; filename=\"{}\"", EXPORT_FILENAME);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
