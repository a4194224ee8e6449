use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::channel::{extract_sheet_id, ChannelConfig, ChannelTarget};
use crate::models::department::Department;
use crate::models::job_posting::{JobInfo, JobPosting, MoveDirection, Section, TocEntry};
use crate::services::channel_service::ChannelResolution;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobPostingQuery {
    pub department_slug: Option<String>,
    pub job_slug: Option<String>,
}

/// Editor form state sent on publish.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveJobPostingPayload {
    #[validate(nested)]
    pub job_info: JobInfo,
    #[serde(default)]
    pub sections: Vec<Section>,
    pub department_id: Option<Uuid>,
    /// Derived from the title when absent or empty.
    pub slug: Option<String>,
    /// Absent on update: the stored configuration is kept.
    #[validate(custom(function = "validate_channels"))]
    #[schema(value_type = Option<Object>)]
    pub channels: Option<ChannelConfig>,
    pub is_active: Option<bool>,
}

fn channel_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Enabled channels must carry a usable target.
pub fn validate_channels(channels: &ChannelConfig) -> Result<(), ValidationError> {
    for channel in channels.iter().filter(|c| c.enabled) {
        match &channel.target {
            ChannelTarget::Zalo { phone } if !phone.chars().any(|c| c.is_ascii_digit()) => {
                return Err(channel_error(
                    "invalid_zalo_phone",
                    "zalo needs a phone number",
                ));
            }
            ChannelTarget::Facebook { url } if !is_web_url(url) => {
                return Err(channel_error(
                    "invalid_facebook_url",
                    "facebook needs an http(s) URL",
                ));
            }
            ChannelTarget::GoogleForm { sheet_url } if extract_sheet_id(sheet_url).is_none() => {
                return Err(channel_error(
                    "invalid_sheet_url",
                    "invalid Google Sheet URL",
                ));
            }
            _ => {}
        }
    }
    Ok(())
}

fn is_web_url(raw: &str) -> bool {
    url::Url::parse(raw.trim())
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobPostingListResponse {
    pub items: Vec<JobPosting>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MoveSectionPayload {
    pub direction: MoveDirection,
}

/// Editor "Export" download.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobPostingExport {
    pub job_info: JobInfo,
    pub sections: Vec<Section>,
    #[schema(value_type = Object)]
    pub channels: ChannelConfig,
    pub department_id: Option<Uuid>,
    pub slug: String,
}

impl From<JobPosting> for JobPostingExport {
    fn from(value: JobPosting) -> Self {
        Self {
            job_info: value.job_info,
            sections: value.sections,
            channels: value.channels,
            department_id: value.department_id,
            slug: value.slug,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobDetailResponse {
    pub posting: JobPosting,
    pub public_path: String,
    pub table_of_contents: Vec<TocEntry>,
    pub channels: ChannelResolution,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentGroup {
    /// Department slug, or `uncategorized`.
    pub key: String,
    pub name: String,
    pub department: Option<Department>,
    pub postings: Vec<JobPosting>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupedJobPostingsResponse {
    pub groups: Vec<DepartmentGroup>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepartmentJobsResponse {
    pub department: Department,
    pub items: Vec<JobPosting>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSummary {
    pub department: Department,
    pub posting_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPosting {
    pub posting: JobPosting,
    pub department_label: String,
    pub public_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub departments: Vec<DepartmentSummary>,
    pub postings: Vec<DashboardPosting>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::channel::ChannelKind;

    #[test]
    fn default_channels_are_valid() {
        assert!(validate_channels(&ChannelConfig::default()).is_ok());
    }

    #[test]
    fn enabled_form_needs_a_sheet_url() {
        let config = ChannelConfig::default().enable(ChannelKind::GoogleForm, true);
        let err = validate_channels(&config).unwrap_err();
        assert_eq!(err.code, "invalid_sheet_url");
    }

    #[test]
    fn disabled_channels_are_not_checked() {
        let config = ChannelConfig::default().enable(ChannelKind::Zalo, false);
        assert!(validate_channels(&config).is_ok());
        let config = ChannelConfig::default().enable(ChannelKind::Zalo, true);
        assert_eq!(validate_channels(&config).unwrap_err().code, "invalid_zalo_phone");
    }

    #[test]
    fn payload_validation_covers_title_and_channels() {
        let mut payload: SaveJobPostingPayload = serde_json::from_value(serde_json::json!({
            "jobInfo": { "title": "" },
            "sections": []
        }))
        .expect("payload");
        assert!(payload.validate().is_err());

        payload.job_info.title = "Designer".into();
        assert!(payload.validate().is_ok());

        payload.channels = Some(ChannelConfig::default().enable(ChannelKind::Facebook, true));
        assert!(payload.validate().is_err());
    }
}
