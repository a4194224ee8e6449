use axum::response::{IntoResponse, Json};
use utoipa::OpenApi;

use super::{auth, department, health, job_posting, public};
use crate::dto::{
    application_dto::{ApplicationPayload, ApplicationReceipt},
    auth_dto::{LoginPayload, LoginResponse},
    department_dto::{DepartmentListResponse, SaveDepartmentPayload},
    job_posting_dto::{
        DashboardPosting, DashboardResponse, DepartmentGroup, DepartmentJobsResponse,
        DepartmentSummary, GroupedJobPostingsResponse, JobDetailResponse, JobPostingExport,
        JobPostingListResponse, MoveSectionPayload, SaveJobPostingPayload,
    },
};
use crate::middleware::auth::CurrentUser;
use crate::models::{
    channel::{ChannelKind, ChecklistItem, PopupContent},
    department::Department,
    job_posting::{JobInfo, JobPosting, MoveDirection, Section, TocEntry},
};
use crate::services::channel_service::{ChannelAction, ChannelResolution, ResolvedChannel};

#[derive(OpenApi)]
#[openapi(
    info(title = "Job board API", description = "Public job listings and the editor CMS"),
    paths(
        health::health,
        public::list_departments,
        public::list_jobs,
        public::grouped_jobs,
        public::department_jobs,
        public::job_detail,
        public::submit_application,
        auth::login,
        auth::me,
        job_posting::dashboard,
        department::list_departments,
        department::create_department,
        department::update_department,
        department::delete_department,
        job_posting::list_jobs,
        job_posting::get_job,
        job_posting::create_job,
        job_posting::update_job,
        job_posting::delete_job,
        job_posting::move_section,
        job_posting::export_job,
    ),
    components(schemas(
        LoginPayload,
        LoginResponse,
        CurrentUser,
        Department,
        DepartmentListResponse,
        SaveDepartmentPayload,
        JobInfo,
        Section,
        MoveDirection,
        TocEntry,
        JobPosting,
        JobPostingListResponse,
        SaveJobPostingPayload,
        MoveSectionPayload,
        JobPostingExport,
        JobDetailResponse,
        DepartmentGroup,
        GroupedJobPostingsResponse,
        DepartmentJobsResponse,
        DepartmentSummary,
        DashboardPosting,
        DashboardResponse,
        ChannelKind,
        ChecklistItem,
        PopupContent,
        ChannelAction,
        ResolvedChannel,
        ChannelResolution,
        ApplicationPayload,
        ApplicationReceipt,
    ))
)]
pub struct ApiDoc;

#[axum::debug_handler]
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
