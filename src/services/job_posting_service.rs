use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::database::store::{JobBoardStore, JobPostingFilter, JobPostingWrite};
use crate::dto::job_posting_dto::{
    DashboardPosting, DashboardResponse, DepartmentGroup, DepartmentJobsResponse,
    DepartmentSummary, GroupedJobPostingsResponse, JobDetailResponse, JobPostingExport,
    JobPostingQuery, SaveJobPostingPayload,
};
use crate::error::{Error, Result};
use crate::models::department::{Department, UNCATEGORIZED_KEY, UNCATEGORIZED_LABEL};
use crate::models::job_posting::{
    move_section, sections_to_json, table_of_contents, JobPosting, MoveDirection,
};
use crate::services::channel_service::resolve_channels;
use crate::utils::slug::{disambiguate, fallback_job_slug, slugify};
use crate::utils::time::now_millis;

#[derive(Clone)]
pub struct JobPostingService {
    store: Arc<dyn JobBoardStore>,
    company_name: String,
}

impl JobPostingService {
    pub fn new(store: Arc<dyn JobBoardStore>, company_name: String) -> Self {
        Self {
            store,
            company_name,
        }
    }

    async fn fetch(&self, filter: JobPostingFilter) -> Result<Vec<JobPosting>> {
        let rows = self.store.list_job_posting_rows(filter).await?;
        Ok(rows.into_iter().map(JobPosting::from).collect())
    }

    /// Active postings, newest first. `job_slug` narrows in the store, the
    /// department slug is matched against the joined department.
    pub async fn list(&self, query: JobPostingQuery) -> Result<Vec<JobPosting>> {
        let postings = self
            .fetch(JobPostingFilter {
                job_slug: query.job_slug.filter(|s| !s.is_empty()),
                include_inactive: false,
            })
            .await?;
        Ok(match query.department_slug.filter(|s| !s.is_empty()) {
            Some(department_slug) => postings
                .into_iter()
                .filter(|p| p.department_slug.as_deref() == Some(department_slug.as_str()))
                .collect(),
            None => postings,
        })
    }

    /// Every posting, inactive ones included.
    pub async fn list_all(&self) -> Result<Vec<JobPosting>> {
        self.fetch(JobPostingFilter {
            job_slug: None,
            include_inactive: true,
        })
        .await
    }

    pub async fn get_public(&self, job_slug: &str) -> Result<JobPosting> {
        self.list(JobPostingQuery {
            department_slug: None,
            job_slug: Some(job_slug.to_string()),
        })
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| Error::NotFound(format!("Job posting '{}' not found", job_slug)))
    }

    pub async fn detail(&self, job_slug: &str) -> Result<JobDetailResponse> {
        let posting = self.get_public(job_slug).await?;
        let channels = resolve_channels(&posting.job_info, &posting.channels, &self.company_name);
        Ok(JobDetailResponse {
            public_path: posting.public_path(),
            table_of_contents: table_of_contents(&posting.sections),
            channels,
            posting,
        })
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<JobPosting> {
        self.store
            .find_job_posting_row(id)
            .await?
            .map(JobPosting::from)
            .ok_or_else(|| Error::NotFound(format!("Job posting {} not found", id)))
    }

    /// Inserts when `existing_id` is `None`, updates otherwise. Answers the
    /// re-listed active postings.
    pub async fn save(
        &self,
        existing_id: Option<Uuid>,
        payload: SaveJobPostingPayload,
    ) -> Result<Vec<JobPosting>> {
        if let Some(department_id) = payload.department_id {
            if self.store.find_department(department_id).await?.is_none() {
                return Err(Error::BadRequest(format!(
                    "Department {} does not exist",
                    department_id
                )));
            }
        }

        let requested = payload
            .slug
            .as_deref()
            .map(slugify)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slugify(&payload.job_info.title));

        let slug = match existing_id {
            Some(id) => {
                if requested.is_empty() {
                    return Err(Error::BadRequest(
                        "Job slug must contain letters or digits".to_string(),
                    ));
                }
                if self.store.job_slug_taken(&requested, Some(id)).await? {
                    return Err(Error::Conflict(format!(
                        "Slug '{}' is already in use",
                        requested
                    )));
                }
                requested
            }
            None => self.unique_new_slug(requested).await?,
        };

        let mut job_info = payload.job_info;
        if job_info.company.trim().is_empty() {
            job_info.company = self.company_name.clone();
        }

        let data = JobPostingWrite {
            slug,
            department_id: payload.department_id,
            title: job_info.title.trim().to_string(),
            company: job_info.company,
            salary: job_info.salary,
            work_type: job_info.work_type,
            reports_to: job_info.reports_to,
            email: job_info.email.trim().to_string(),
            phone: job_info.phone,
            linkedin: job_info.linkedin.trim().to_string(),
            sections: sections_to_json(&payload.sections),
            channels: payload.channels.as_ref().map(|c| c.to_json()),
            is_active: payload.is_active,
        };

        match existing_id {
            Some(id) => {
                self.store.update_job_posting(id, data).await?;
                info!(job_posting_id = %id, "job posting updated");
            }
            None => {
                let slug = data.slug.clone();
                let id = self.store.insert_job_posting(data).await?;
                info!(job_posting_id = %id, slug = %slug, "job posting created");
            }
        }

        self.list(JobPostingQuery::default()).await
    }

    async fn unique_new_slug(&self, requested: String) -> Result<String> {
        if requested.is_empty() {
            return Ok(fallback_job_slug(now_millis()));
        }
        if self.store.job_slug_taken(&requested, None).await? {
            let slug = disambiguate(&requested, now_millis());
            warn!(requested = %requested, slug = %slug, "job slug taken, using fallback");
            return Ok(slug);
        }
        Ok(requested)
    }

    pub async fn delete(&self, id: Uuid) -> Result<Vec<JobPosting>> {
        if !self.store.delete_job_posting(id).await? {
            return Err(Error::NotFound(format!("Job posting {} not found", id)));
        }
        info!(job_posting_id = %id, "job posting deleted");
        self.list(JobPostingQuery::default()).await
    }

    /// Swaps a section with its neighbour and persists the new order.
    /// Moves past either end leave the posting untouched.
    pub async fn move_section(
        &self,
        id: Uuid,
        index: usize,
        direction: MoveDirection,
    ) -> Result<JobPosting> {
        let mut posting = self.get_by_id(id).await?;
        if !move_section(&mut posting.sections, index, direction) {
            return Ok(posting);
        }

        let info = &posting.job_info;
        let data = JobPostingWrite {
            slug: posting.slug.clone(),
            department_id: posting.department_id,
            title: info.title.clone(),
            company: info.company.clone(),
            salary: info.salary.clone(),
            work_type: info.work_type.clone(),
            reports_to: info.reports_to.clone(),
            email: info.email.clone(),
            phone: info.phone.clone(),
            linkedin: info.linkedin.clone(),
            sections: sections_to_json(&posting.sections),
            channels: None,
            is_active: None,
        };
        self.store.update_job_posting(id, data).await?;
        self.get_by_id(id).await
    }

    /// One group per active department in display order, then the
    /// uncategorized group for null or dangling references.
    pub async fn grouped(&self) -> Result<GroupedJobPostingsResponse> {
        let departments = self.store.list_active_departments().await?;
        let postings = self.list(JobPostingQuery::default()).await?;
        let total = postings.len();

        let mut groups: Vec<DepartmentGroup> = departments
            .into_iter()
            .map(|department| DepartmentGroup {
                key: department.slug.clone(),
                name: department.name.clone(),
                department: Some(department),
                postings: Vec::new(),
            })
            .collect();
        let mut uncategorized = Vec::new();

        for posting in postings {
            let group = posting.department_id.and_then(|id| {
                groups
                    .iter_mut()
                    .find(|g| g.department.as_ref().map(|d| d.id) == Some(id))
            });
            match group {
                Some(group) => group.postings.push(posting),
                None => uncategorized.push(posting),
            }
        }

        if !uncategorized.is_empty() {
            groups.push(DepartmentGroup {
                key: UNCATEGORIZED_KEY.to_string(),
                name: UNCATEGORIZED_LABEL.to_string(),
                department: None,
                postings: uncategorized,
            });
        }

        Ok(GroupedJobPostingsResponse { groups, total })
    }

    /// Postings of an already resolved active department.
    pub async fn department_page(&self, department: Department) -> Result<DepartmentJobsResponse> {
        let items = self
            .list(JobPostingQuery {
                department_slug: Some(department.slug.clone()),
                job_slug: None,
            })
            .await?;
        Ok(DepartmentJobsResponse { department, items })
    }

    pub async fn dashboard(&self) -> Result<DashboardResponse> {
        let departments = self.store.list_active_departments().await?;
        let postings = self.list_all().await?;

        let departments = departments
            .into_iter()
            .map(|department| DepartmentSummary {
                posting_count: postings
                    .iter()
                    .filter(|p| p.is_active && p.department_id == Some(department.id))
                    .count(),
                department,
            })
            .collect();

        let postings = postings
            .into_iter()
            .map(|posting| DashboardPosting {
                department_label: posting
                    .department_name
                    .clone()
                    .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string()),
                public_path: posting.public_path(),
                posting,
            })
            .collect();

        Ok(DashboardResponse {
            departments,
            postings,
        })
    }

    pub async fn export(&self, id: Uuid) -> Result<JobPostingExport> {
        Ok(JobPostingExport::from(self.get_by_id(id).await?))
    }
}
