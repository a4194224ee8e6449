pub mod channel;
pub mod department;
pub mod job_posting;
