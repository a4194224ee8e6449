use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::department::Department;

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveDepartmentPayload {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// Derived from `name` when absent or empty.
    pub slug: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepartmentListResponse {
    pub items: Vec<Department>,
}
