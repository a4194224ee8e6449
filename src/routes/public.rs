use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::{
        application_dto::{ApplicationPayload, ApplicationReceipt},
        department_dto::DepartmentListResponse,
        job_posting_dto::{
            DepartmentJobsResponse, GroupedJobPostingsResponse, JobDetailResponse,
            JobPostingListResponse, JobPostingQuery,
        },
    },
    error::Result,
    routes::extract::ApiJson,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/public/departments",
    responses(
        (status = 200, description = "Active departments in display order", body = DepartmentListResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_departments(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.department_service.list_active().await?;
    Ok(Json(DepartmentListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/api/public/jobs",
    params(
        ("department_slug" = Option<String>, Query, description = "Only postings of this department"),
        ("job_slug" = Option<String>, Query, description = "Only the posting with this slug")
    ),
    responses(
        (status = 200, description = "Active postings, newest first", body = JobPostingListResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobPostingQuery>,
) -> Result<impl IntoResponse> {
    let items = state.job_posting_service.list(query).await?;
    Ok(Json(JobPostingListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/api/public/jobs/grouped",
    responses(
        (status = 200, description = "Active postings grouped by department", body = GroupedJobPostingsResponse)
    )
)]
#[axum::debug_handler]
pub async fn grouped_jobs(
    State(state): State<AppState>,
) -> Result<Json<GroupedJobPostingsResponse>> {
    let grouped = state.job_posting_service.grouped().await?;
    Ok(Json(grouped))
}

#[utoipa::path(
    get,
    path = "/api/public/departments/{department_slug}/jobs",
    params(
        ("department_slug" = String, Path, description = "Department slug")
    ),
    responses(
        (status = 200, description = "Department with its postings", body = DepartmentJobsResponse),
        (status = 404, description = "No active department with that slug")
    )
)]
#[axum::debug_handler]
pub async fn department_jobs(
    State(state): State<AppState>,
    Path(department_slug): Path<String>,
) -> Result<Json<DepartmentJobsResponse>> {
    let department = state
        .department_service
        .find_active_by_slug(&department_slug)
        .await?;
    let page = state.job_posting_service.department_page(department).await?;
    Ok(Json(page))
}

/// The department segment only shapes links; lookup is by job slug.
#[utoipa::path(
    get,
    path = "/api/public/jobs/{department_slug}/{job_slug}",
    params(
        ("department_slug" = String, Path, description = "Department slug, or `job` for uncategorized postings"),
        ("job_slug" = String, Path, description = "Posting slug")
    ),
    responses(
        (status = 200, description = "Posting with table of contents and apply channels", body = JobDetailResponse),
        (status = 404, description = "Posting not found or inactive")
    )
)]
#[axum::debug_handler]
pub async fn job_detail(
    State(state): State<AppState>,
    Path((_department_slug, job_slug)): Path<(String, String)>,
) -> Result<Json<JobDetailResponse>> {
    let detail = state.job_posting_service.detail(&job_slug).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    post,
    path = "/api/public/applications/{job_slug}",
    params(
        ("job_slug" = String, Path, description = "Posting slug")
    ),
    request_body = ApplicationPayload,
    responses(
        (status = 202, description = "Application accepted", body = ApplicationReceipt),
        (status = 400, description = "Invalid payload or form channel not usable"),
        (status = 404, description = "Posting not found or inactive"),
        (status = 502, description = "Spreadsheet endpoint failed")
    )
)]
#[axum::debug_handler]
pub async fn submit_application(
    State(state): State<AppState>,
    Path(job_slug): Path<String>,
    ApiJson(payload): ApiJson<ApplicationPayload>,
) -> Result<(StatusCode, Json<ApplicationReceipt>)> {
    payload.validate()?;
    let posting = state.job_posting_service.get_public(&job_slug).await?;
    let receipt = state
        .application_service
        .submit(&posting, payload)
        .await?;
    Ok((StatusCode::ACCEPTED, Json(receipt)))
}
