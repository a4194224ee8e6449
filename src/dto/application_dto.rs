use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Visitor data collected by the in-page application form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPayload {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub cv_link: String,
    #[serde(default)]
    pub portfolio: String,
    #[serde(default)]
    pub message: String,
}

/// Record appended to the posting's spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSubmission {
    pub timestamp: DateTime<Utc>,
    pub sheet_id: String,
    pub job_title: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cv_link: String,
    pub portfolio: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationReceipt {
    pub submitted: bool,
    /// False when no delivery endpoint is configured and the record was only logged.
    pub delivered: bool,
}
