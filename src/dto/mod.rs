pub mod application_dto;
pub mod auth_dto;
pub mod department_dto;
pub mod job_posting_dto;

use serde::{Deserialize, Serialize};

/// Answer of every CMS mutation: the store-truth list after the change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationResponse<T> {
    pub success: bool,
    pub items: Vec<T>,
}

impl<T> MutationResponse<T> {
    pub fn relisted(items: Vec<T>) -> Self {
        Self {
            success: true,
            items,
        }
    }
}
