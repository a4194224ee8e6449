use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value as JsonValue};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::{DepartmentWrite, JobBoardStore, JobPostingFilter, JobPostingWrite};
use crate::error::{Error, Result};
use crate::models::department::Department;
use crate::models::job_posting::JobPostingRow;
use crate::utils::time::now;

/// Process-local store selected with a `memory:` database URL.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    departments: Vec<Department>,
    postings: Vec<StoredPosting>,
    sequence: u64,
}

#[derive(Debug, Clone)]
struct StoredPosting {
    id: Uuid,
    sequence: u64,
    data: JobPostingWrite,
    channels: JsonValue,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Inner {
    fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    fn joined_row(&self, posting: &StoredPosting) -> JobPostingRow {
        let department = posting
            .data
            .department_id
            .and_then(|id| self.departments.iter().find(|d| d.id == id));
        let data = &posting.data;
        JobPostingRow {
            id: posting.id,
            slug: data.slug.clone(),
            department_id: data.department_id,
            department_slug: department.map(|d| d.slug.clone()),
            department_name: department.map(|d| d.name.clone()),
            title: data.title.clone(),
            company: data.company.clone(),
            salary: Some(data.salary.clone()),
            work_type: Some(data.work_type.clone()),
            reports_to: Some(data.reports_to.clone()),
            email: Some(data.email.clone()),
            phone: Some(data.phone.clone()),
            linkedin: Some(data.linkedin.clone()),
            sections: Some(data.sections.clone()),
            channels: Some(posting.channels.clone()),
            is_active: posting.is_active,
            created_at: posting.created_at,
            updated_at: posting.updated_at,
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobBoardStore for MemoryStore {
    async fn list_active_departments(&self) -> Result<Vec<Department>> {
        let inner = self.inner.read().await;
        let mut items: Vec<Department> = inner
            .departments
            .iter()
            .filter(|d| d.is_active)
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(items)
    }

    async fn find_department(&self, id: Uuid) -> Result<Option<Department>> {
        let inner = self.inner.read().await;
        Ok(inner.departments.iter().find(|d| d.id == id).cloned())
    }

    async fn department_slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool> {
        let inner = self.inner.read().await;
        Ok(inner
            .departments
            .iter()
            .any(|d| d.slug == slug && Some(d.id) != exclude))
    }

    async fn insert_department(&self, data: DepartmentWrite) -> Result<Department> {
        let mut inner = self.inner.write().await;
        if inner.departments.iter().any(|d| d.slug == data.slug) {
            return Err(Error::Conflict("Slug is already in use".to_string()));
        }
        let department = Department {
            id: Uuid::new_v4(),
            name: data.name,
            slug: data.slug,
            description: data.description,
            is_active: data.is_active,
            display_order: data.display_order,
        };
        inner.departments.push(department.clone());
        Ok(department)
    }

    async fn update_department(&self, id: Uuid, data: DepartmentWrite) -> Result<Department> {
        let mut inner = self.inner.write().await;
        if inner
            .departments
            .iter()
            .any(|d| d.slug == data.slug && d.id != id)
        {
            return Err(Error::Conflict("Slug is already in use".to_string()));
        }
        let department = inner
            .departments
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| Error::NotFound(format!("Department {} not found", id)))?;
        department.name = data.name;
        department.slug = data.slug;
        department.description = data.description;
        department.is_active = data.is_active;
        department.display_order = data.display_order;
        Ok(department.clone())
    }

    async fn delete_department(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.departments.len();
        inner.departments.retain(|d| d.id != id);
        Ok(inner.departments.len() < before)
    }

    async fn list_job_posting_rows(&self, filter: JobPostingFilter) -> Result<Vec<JobPostingRow>> {
        let inner = self.inner.read().await;
        let mut matching: Vec<&StoredPosting> = inner
            .postings
            .iter()
            .filter(|p| filter.include_inactive || p.is_active)
            .filter(|p| {
                filter
                    .job_slug
                    .as_deref()
                    .map_or(true, |slug| p.data.slug == slug)
            })
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.sequence.cmp(&a.sequence))
        });
        Ok(matching.into_iter().map(|p| inner.joined_row(p)).collect())
    }

    async fn find_job_posting_row(&self, id: Uuid) -> Result<Option<JobPostingRow>> {
        let inner = self.inner.read().await;
        Ok(inner
            .postings
            .iter()
            .find(|p| p.id == id)
            .map(|p| inner.joined_row(p)))
    }

    async fn job_slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool> {
        let inner = self.inner.read().await;
        Ok(inner
            .postings
            .iter()
            .any(|p| p.data.slug == slug && Some(p.id) != exclude))
    }

    async fn insert_job_posting(&self, data: JobPostingWrite) -> Result<Uuid> {
        let mut inner = self.inner.write().await;
        if inner.postings.iter().any(|p| p.data.slug == data.slug) {
            return Err(Error::Conflict("Slug is already in use".to_string()));
        }
        let sequence = inner.next_sequence();
        let timestamp = now();
        let id = Uuid::new_v4();
        inner.postings.push(StoredPosting {
            id,
            sequence,
            channels: data.channels.clone().unwrap_or_else(|| json!({})),
            is_active: data.is_active.unwrap_or(true),
            data,
            created_at: timestamp,
            updated_at: timestamp,
        });
        Ok(id)
    }

    async fn update_job_posting(&self, id: Uuid, data: JobPostingWrite) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner
            .postings
            .iter()
            .any(|p| p.data.slug == data.slug && p.id != id)
        {
            return Err(Error::Conflict("Slug is already in use".to_string()));
        }
        let posting = inner
            .postings
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(format!("Job posting {} not found", id)))?;
        if let Some(channels) = data.channels.clone() {
            posting.channels = channels;
        }
        if let Some(is_active) = data.is_active {
            posting.is_active = is_active;
        }
        posting.data = data;
        posting.updated_at = now();
        Ok(())
    }

    async fn delete_job_posting(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.postings.len();
        inner.postings.retain(|p| p.id != id);
        Ok(inner.postings.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(slug: &str, department_id: Option<Uuid>) -> JobPostingWrite {
        JobPostingWrite {
            slug: slug.into(),
            department_id,
            title: slug.to_uppercase(),
            company: "BIVA".into(),
            salary: String::new(),
            work_type: String::new(),
            reports_to: String::new(),
            email: String::new(),
            phone: String::new(),
            linkedin: String::new(),
            sections: json!([]),
            channels: None,
            is_active: None,
        }
    }

    #[tokio::test]
    async fn rows_are_newest_first_and_joined() {
        let store = MemoryStore::new();
        let dept = store
            .insert_department(DepartmentWrite {
                name: "Marketing".into(),
                slug: "marketing".into(),
                description: None,
                is_active: true,
                display_order: 1,
            })
            .await
            .unwrap();
        store.insert_job_posting(posting("first", Some(dept.id))).await.unwrap();
        store.insert_job_posting(posting("second", None)).await.unwrap();

        let rows = store
            .list_job_posting_rows(JobPostingFilter::default())
            .await
            .unwrap();
        let slugs: Vec<_> = rows.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, ["second", "first"]);
        assert_eq!(rows[1].department_slug.as_deref(), Some("marketing"));
        assert_eq!(rows[0].department_slug, None);
        assert_eq!(rows[0].channels, Some(json!({})));
    }

    #[tokio::test]
    async fn update_without_channels_keeps_stored_channels() {
        let store = MemoryStore::new();
        let mut write = posting("keep", None);
        write.channels = Some(json!({ "zalo": { "enabled": true } }));
        let id = store.insert_job_posting(write.clone()).await.unwrap();

        write.channels = None;
        write.title = "Renamed".into();
        store.update_job_posting(id, write).await.unwrap();

        let row = store.find_job_posting_row(id).await.unwrap().unwrap();
        assert_eq!(row.title, "Renamed");
        assert_eq!(row.channels, Some(json!({ "zalo": { "enabled": true } })));
    }

    #[tokio::test]
    async fn updating_a_missing_posting_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_job_posting(Uuid::new_v4(), posting("ghost", None))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
