use async_trait::async_trait;

use crate::designs::{
    errors::JobServiceError,
    models::{generation_request::GenerationRequest, job_handle::JobHandle, job_result::JobResult},
};

/// An asynchronous prediction API: accepts a job, then reports its status
/// until it reaches a terminal state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobService: Send + Sync {
    async fn submit(&self, request: &GenerationRequest) -> Result<JobHandle, JobServiceError>;
    async fn poll(&self, handle: &JobHandle) -> Result<JobResult, JobServiceError>;
}
