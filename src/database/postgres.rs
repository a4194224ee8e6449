use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::store::{DepartmentWrite, JobBoardStore, JobPostingFilter, JobPostingWrite};
use crate::error::{Error, Result};
use crate::models::department::Department;
use crate::models::job_posting::JobPostingRow;

const DEPARTMENT_COLUMNS: &str = "id, name, slug, description, is_active, display_order";

const JOB_POSTING_SELECT: &str = r#"
    SELECT
        jp.id,
        jp.slug,
        jp.department_id,
        d.slug AS department_slug,
        d.name AS department_name,
        jp.title,
        jp.company,
        jp.salary,
        jp.work_type,
        jp.reports_to,
        jp.email,
        jp.phone,
        jp.linkedin,
        jp.sections,
        jp.channels,
        jp.is_active,
        jp.created_at,
        jp.updated_at
    FROM job_postings jp
    LEFT JOIN departments d ON d.id = jp.department_id
"#;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobBoardStore for PgStore {
    async fn list_active_departments(&self) -> Result<Vec<Department>> {
        let query = format!(
            "SELECT {} FROM departments WHERE is_active = TRUE ORDER BY display_order ASC, name ASC",
            DEPARTMENT_COLUMNS
        );
        let items = sqlx::query_as::<_, Department>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn find_department(&self, id: Uuid) -> Result<Option<Department>> {
        let query = format!("SELECT {} FROM departments WHERE id = $1", DEPARTMENT_COLUMNS);
        let item = sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    async fn department_slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM departments WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn insert_department(&self, data: DepartmentWrite) -> Result<Department> {
        let query = format!(
            r#"
            INSERT INTO departments (name, slug, description, is_active, display_order)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            DEPARTMENT_COLUMNS
        );
        let department = sqlx::query_as::<_, Department>(&query)
            .bind(data.name)
            .bind(data.slug)
            .bind(data.description)
            .bind(data.is_active)
            .bind(data.display_order)
            .fetch_one(&self.pool)
            .await?;
        Ok(department)
    }

    async fn update_department(&self, id: Uuid, data: DepartmentWrite) -> Result<Department> {
        let query = format!(
            r#"
            UPDATE departments
            SET
                name = $2,
                slug = $3,
                description = $4,
                is_active = $5,
                display_order = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            DEPARTMENT_COLUMNS
        );
        let department = sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .bind(data.name)
            .bind(data.slug)
            .bind(data.description)
            .bind(data.is_active)
            .bind(data.display_order)
            .fetch_optional(&self.pool)
            .await?;
        department.ok_or_else(|| Error::NotFound(format!("Department {} not found", id)))
    }

    async fn delete_department(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_job_posting_rows(&self, filter: JobPostingFilter) -> Result<Vec<JobPostingRow>> {
        let query = format!(
            r#"
            {}
            WHERE ($1::text IS NULL OR jp.slug = $1)
              AND ($2 OR jp.is_active = TRUE)
            ORDER BY jp.created_at DESC
            "#,
            JOB_POSTING_SELECT
        );
        let rows = sqlx::query_as::<_, JobPostingRow>(&query)
            .bind(filter.job_slug)
            .bind(filter.include_inactive)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_job_posting_row(&self, id: Uuid) -> Result<Option<JobPostingRow>> {
        let query = format!("{} WHERE jp.id = $1", JOB_POSTING_SELECT);
        let row = sqlx::query_as::<_, JobPostingRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn job_slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM job_postings WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn insert_job_posting(&self, data: JobPostingWrite) -> Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO job_postings (
                slug, department_id, title, company, salary, work_type,
                reports_to, email, phone, linkedin, sections, channels, is_active
            ) VALUES (
                $1, $2, $3, $4, $5, $6,
                $7, $8, $9, $10, $11, COALESCE($12, '{}'::jsonb), COALESCE($13, TRUE)
            )
            RETURNING id
            "#,
        )
        .bind(data.slug)
        .bind(data.department_id)
        .bind(data.title)
        .bind(data.company)
        .bind(data.salary)
        .bind(data.work_type)
        .bind(data.reports_to)
        .bind(data.email)
        .bind(data.phone)
        .bind(data.linkedin)
        .bind(data.sections)
        .bind(data.channels)
        .bind(data.is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update_job_posting(&self, id: Uuid, data: JobPostingWrite) -> Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE job_postings
            SET
                slug = $2,
                department_id = $3,
                title = $4,
                company = $5,
                salary = $6,
                work_type = $7,
                reports_to = $8,
                email = $9,
                phone = $10,
                linkedin = $11,
                sections = $12,
                channels = COALESCE($13, channels),
                is_active = COALESCE($14, is_active),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(data.slug)
        .bind(data.department_id)
        .bind(data.title)
        .bind(data.company)
        .bind(data.salary)
        .bind(data.work_type)
        .bind(data.reports_to)
        .bind(data.email)
        .bind(data.phone)
        .bind(data.linkedin)
        .bind(data.sections)
        .bind(data.channels)
        .bind(data.is_active)
        .execute(&self.pool)
        .await?;

        if res.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Job posting {} not found", id)));
        }
        Ok(())
    }

    async fn delete_job_posting(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM job_postings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
