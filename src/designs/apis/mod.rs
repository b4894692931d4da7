pub mod job_service;
pub mod replicate;
