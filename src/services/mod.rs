pub mod application_service;
pub mod auth_service;
pub mod channel_service;
pub mod department_service;
pub mod job_posting_service;
