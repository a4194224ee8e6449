use async_trait::async_trait;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::error::Result;
use crate::models::department::Department;
use crate::models::job_posting::JobPostingRow;

/// Department columns written on insert/update.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentWrite {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
}

/// Posting columns written on insert/update.
///
/// `channels: None` leaves the stored configuration untouched on update and
/// stores an empty document on insert. `is_active: None` keeps the stored
/// flag (insert: active).
#[derive(Debug, Clone, PartialEq)]
pub struct JobPostingWrite {
    pub slug: String,
    pub department_id: Option<Uuid>,
    pub title: String,
    pub company: String,
    pub salary: String,
    pub work_type: String,
    pub reports_to: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub sections: JsonValue,
    pub channels: Option<JsonValue>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPostingFilter {
    pub job_slug: Option<String>,
    pub include_inactive: bool,
}

/// Persistence seam for departments and postings.
///
/// Posting rows come back joined with their department (slug, name) and
/// ordered newest-created first; a dangling `department_id` joins to nothing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobBoardStore: Send + Sync {
    /// Active departments ordered by `display_order`.
    async fn list_active_departments(&self) -> Result<Vec<Department>>;
    async fn find_department(&self, id: Uuid) -> Result<Option<Department>>;
    async fn department_slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool>;
    async fn insert_department(&self, data: DepartmentWrite) -> Result<Department>;
    async fn update_department(&self, id: Uuid, data: DepartmentWrite) -> Result<Department>;
    /// Returns false when nothing was deleted.
    async fn delete_department(&self, id: Uuid) -> Result<bool>;

    async fn list_job_posting_rows(&self, filter: JobPostingFilter) -> Result<Vec<JobPostingRow>>;
    async fn find_job_posting_row(&self, id: Uuid) -> Result<Option<JobPostingRow>>;
    async fn job_slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool>;
    async fn insert_job_posting(&self, data: JobPostingWrite) -> Result<Uuid>;
    async fn update_job_posting(&self, id: Uuid, data: JobPostingWrite) -> Result<()>;
    async fn delete_job_posting(&self, id: Uuid) -> Result<bool>;
}
