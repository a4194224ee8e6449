use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Label shown for postings without a (resolvable) department.
pub const UNCATEGORIZED_LABEL: &str = "Chưa phân loại";
pub const UNCATEGORIZED_KEY: &str = "uncategorized";
/// Path segment used in public links of postings without a department.
pub const UNCATEGORIZED_SEGMENT: &str = "job";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
}
