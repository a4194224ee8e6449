pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::config::Config;
use crate::database::store::JobBoardStore;
use crate::error::Result;
use crate::services::{
    application_service::ApplicationService, auth_service::AuthService,
    department_service::DepartmentService, job_posting_service::JobPostingService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub department_service: DepartmentService,
    pub job_posting_service: JobPostingService,
    pub application_service: ApplicationService,
    pub auth_service: AuthService,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn JobBoardStore>) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        let department_service = DepartmentService::new(store.clone());
        let job_posting_service =
            JobPostingService::new(store, config.company_name.clone());
        let application_service =
            ApplicationService::new(http_client, config.sheet_webhook_url.clone());
        let auth_service = AuthService::new(&config);

        Ok(Self {
            config: Arc::new(config),
            department_service,
            job_posting_service,
            application_service,
            auth_service,
        })
    }
}
