use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::database::store::{DepartmentWrite, JobBoardStore};
use crate::dto::department_dto::SaveDepartmentPayload;
use crate::error::{Error, Result};
use crate::models::department::Department;
use crate::utils::slug::slugify;

#[derive(Clone)]
pub struct DepartmentService {
    store: Arc<dyn JobBoardStore>,
}

impl DepartmentService {
    pub fn new(store: Arc<dyn JobBoardStore>) -> Self {
        Self { store }
    }

    pub async fn list_active(&self) -> Result<Vec<Department>> {
        self.store.list_active_departments().await
    }

    pub async fn find_active_by_slug(&self, slug: &str) -> Result<Department> {
        self.store
            .list_active_departments()
            .await?
            .into_iter()
            .find(|d| d.slug == slug)
            .ok_or_else(|| Error::NotFound(format!("Department '{}' not found", slug)))
    }

    /// Inserts when `id` is `None`, updates otherwise. Answers the re-listed
    /// active departments.
    pub async fn save(
        &self,
        id: Option<Uuid>,
        payload: SaveDepartmentPayload,
    ) -> Result<Vec<Department>> {
        let slug = department_slug(&payload);
        if slug.is_empty() {
            return Err(Error::BadRequest(
                "Department slug must contain letters or digits".to_string(),
            ));
        }
        if self.store.department_slug_taken(&slug, id).await? {
            return Err(Error::Conflict(format!("Slug '{}' is already in use", slug)));
        }

        let data = DepartmentWrite {
            name: payload.name.trim().to_string(),
            slug,
            description: payload
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            is_active: payload.is_active,
            display_order: payload.display_order,
        };

        let department = match id {
            Some(id) => self.store.update_department(id, data).await?,
            None => self.store.insert_department(data).await?,
        };
        info!(department_id = %department.id, slug = %department.slug, "department saved");

        self.list_active().await
    }

    /// Postings that referenced the department keep their dangling id.
    pub async fn delete(&self, id: Uuid) -> Result<Vec<Department>> {
        if !self.store.delete_department(id).await? {
            return Err(Error::NotFound(format!("Department {} not found", id)));
        }
        info!(department_id = %id, "department deleted");
        self.list_active().await
    }
}

fn department_slug(payload: &SaveDepartmentPayload) -> String {
    payload
        .slug
        .as_deref()
        .map(slugify)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| slugify(&payload.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;

    fn payload(name: &str, slug: Option<&str>) -> SaveDepartmentPayload {
        SaveDepartmentPayload {
            name: name.into(),
            slug: slug.map(Into::into),
            description: Some("  ".into()),
            is_active: true,
            display_order: 0,
        }
    }

    #[tokio::test]
    async fn slug_is_derived_from_name_when_missing() {
        let service = DepartmentService::new(Arc::new(MemoryStore::new()));
        let items = service
            .save(None, payload("Phòng Marketing", Some("")))
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].slug, "phong-marketing");
        assert_eq!(items[0].description, None);
    }

    #[tokio::test]
    async fn taken_slug_is_a_conflict() {
        let service = DepartmentService::new(Arc::new(MemoryStore::new()));
        service.save(None, payload("Sales", None)).await.unwrap();
        let err = service
            .save(None, payload("Other", Some("SALES")))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn inactive_departments_drop_out_of_the_listing() {
        let service = DepartmentService::new(Arc::new(MemoryStore::new()));
        let items = service.save(None, payload("Sales", None)).await.unwrap();
        let id = items[0].id;

        let mut hidden = payload("Sales", None);
        hidden.is_active = false;
        let items = service.save(Some(id), hidden).await.unwrap();
        assert!(items.is_empty());

        let err = service.find_active_by_slug("sales").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn deleting_twice_is_not_found() {
        let service = DepartmentService::new(Arc::new(MemoryStore::new()));
        let items = service.save(None, payload("Ops", None)).await.unwrap();
        service.delete(items[0].id).await.unwrap();
        let err = service.delete(items[0].id).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
