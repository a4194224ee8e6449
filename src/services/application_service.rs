use reqwest::Client;
use tracing::{error, info};

use crate::dto::application_dto::{ApplicationPayload, ApplicationReceipt, SheetSubmission};
use crate::error::{Error, Result};
use crate::models::channel::{extract_sheet_id, ChannelKind, ChannelTarget};
use crate::models::job_posting::JobPosting;
use crate::utils::time::now;

/// Delivers in-page form applications to the posting's spreadsheet.
#[derive(Clone)]
pub struct ApplicationService {
    http_client: Client,
    webhook_url: Option<String>,
}

impl ApplicationService {
    pub fn new(http_client: Client, webhook_url: Option<String>) -> Self {
        Self {
            http_client,
            webhook_url,
        }
    }

    /// Builds the spreadsheet record; fails when the posting does not accept
    /// form applications.
    pub fn build_submission(
        posting: &JobPosting,
        payload: ApplicationPayload,
    ) -> Result<SheetSubmission> {
        let form = posting.channels.get(ChannelKind::GoogleForm);
        if !form.enabled {
            return Err(Error::BadRequest(
                "This posting does not accept form applications".to_string(),
            ));
        }
        let ChannelTarget::GoogleForm { sheet_url } = &form.target else {
            return Err(Error::Internal("form channel without sheet target".to_string()));
        };
        let sheet_id = extract_sheet_id(sheet_url)
            .ok_or_else(|| Error::BadRequest("invalid Google Sheet URL".to_string()))?;

        Ok(SheetSubmission {
            timestamp: now(),
            sheet_id,
            job_title: posting.job_info.title.clone(),
            name: payload.name.trim().to_string(),
            email: payload.email.trim().to_string(),
            phone: payload.phone.trim().to_string(),
            cv_link: payload.cv_link.trim().to_string(),
            portfolio: payload.portfolio.trim().to_string(),
            message: payload.message,
        })
    }

    pub async fn submit(
        &self,
        posting: &JobPosting,
        payload: ApplicationPayload,
    ) -> Result<ApplicationReceipt> {
        let submission = Self::build_submission(posting, payload)?;

        let Some(url) = &self.webhook_url else {
            info!(
                job_slug = %posting.slug,
                sheet_id = %submission.sheet_id,
                applicant = %submission.email,
                "no sheet webhook configured, application logged only"
            );
            return Ok(ApplicationReceipt {
                submitted: true,
                delivered: false,
            });
        };

        let response = self
            .http_client
            .post(url)
            .json(&submission)
            .send()
            .await?;
        if let Err(err) = response.error_for_status_ref() {
            error!(status = %response.status(), "sheet webhook rejected application");
            return Err(err.into());
        }

        info!(job_slug = %posting.slug, sheet_id = %submission.sheet_id, "application delivered");
        Ok(ApplicationReceipt {
            submitted: true,
            delivered: true,
        })
    }
}
