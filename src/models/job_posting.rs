use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::channel::ChannelConfig;
use super::department::UNCATEGORIZED_SEGMENT;

/// Anchor of the apply block appended to every table of contents.
pub const APPLY_ANCHOR: &str = "ung-tuyen";
pub const APPLY_ANCHOR_TITLE: &str = "Ứng tuyển";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct JobInfo {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub company: String,
    pub salary: String,
    pub work_type: String,
    pub reports_to: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
}

/// One chapter of a posting. `id` doubles as the in-page anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub content: String,
    pub is_collapsible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Swaps the section at `index` with its neighbour. Returns false (and leaves
/// the slice untouched) when there is no neighbour in that direction.
pub fn move_section(sections: &mut [Section], index: usize, direction: MoveDirection) -> bool {
    let target = match direction {
        MoveDirection::Up => index.checked_sub(1),
        MoveDirection::Down => index.checked_add(1),
    };
    match target {
        Some(target) if index < sections.len() && target < sections.len() => {
            sections.swap(index, target);
            true
        }
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TocEntry {
    pub id: String,
    pub title: String,
    pub level: u8,
}

/// One entry per section in order, then the apply anchor.
pub fn table_of_contents(sections: &[Section]) -> Vec<TocEntry> {
    sections
        .iter()
        .map(|s| TocEntry {
            id: s.id.clone(),
            title: s.title.clone(),
            level: 2,
        })
        .chain(std::iter::once(TocEntry {
            id: APPLY_ANCHOR.to_string(),
            title: APPLY_ANCHOR_TITLE.to_string(),
            level: 2,
        }))
        .collect()
}

/// Storage shape of a posting joined with its department.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct JobPostingRow {
    pub id: Uuid,
    pub slug: String,
    pub department_id: Option<Uuid>,
    pub department_slug: Option<String>,
    pub department_name: Option<String>,
    pub title: String,
    pub company: String,
    pub salary: Option<String>,
    pub work_type: Option<String>,
    pub reports_to: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub sections: Option<JsonValue>,
    pub channels: Option<JsonValue>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: Uuid,
    pub slug: String,
    pub department_id: Option<Uuid>,
    pub department_slug: Option<String>,
    pub department_name: Option<String>,
    pub job_info: JobInfo,
    pub sections: Vec<Section>,
    /// Keyed by channel name, plus `primaryChannel`.
    #[schema(value_type = Object)]
    pub channels: ChannelConfig,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobPosting {
    /// Public path of the detail page.
    pub fn public_path(&self) -> String {
        format!(
            "/{}/{}",
            self.department_slug
                .as_deref()
                .unwrap_or(UNCATEGORIZED_SEGMENT),
            self.slug
        )
    }
}

impl From<JobPostingRow> for JobPosting {
    fn from(row: JobPostingRow) -> Self {
        let channels = ChannelConfig::from_stored(row.channels.as_ref());
        let sections = sections_from_stored(row.sections.as_ref());
        Self {
            id: row.id,
            slug: row.slug,
            department_id: row.department_id,
            department_slug: row.department_slug,
            department_name: row.department_name,
            job_info: JobInfo {
                title: row.title,
                company: row.company,
                salary: row.salary.unwrap_or_default(),
                work_type: row.work_type.unwrap_or_default(),
                reports_to: row.reports_to.unwrap_or_default(),
                email: row.email.unwrap_or_default(),
                phone: row.phone.unwrap_or_default(),
                linkedin: row.linkedin.unwrap_or_default(),
            },
            sections,
            channels,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Non-array documents map to no sections; missing fields map to empty
/// values, a missing `isCollapsible` to `false`.
pub fn sections_from_stored(raw: Option<&JsonValue>) -> Vec<Section> {
    let Some(items) = raw.and_then(JsonValue::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| {
            let text = |field: &str| {
                item.get(field)
                    .and_then(JsonValue::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            Section {
                id: text("id"),
                title: text("title"),
                content: text("content"),
                is_collapsible: item
                    .get("isCollapsible")
                    .and_then(JsonValue::as_bool)
                    .unwrap_or(false),
            }
        })
        .collect()
}

pub fn sections_to_json(sections: &[Section]) -> JsonValue {
    serde_json::to_value(sections).unwrap_or_else(|_| JsonValue::Array(Vec::new()))
}
