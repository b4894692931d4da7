use serde::Deserialize;
use serde_json::Value;

use crate::designs::models::job_result::JobOutput;

#[derive(Debug, Deserialize)]
pub struct ReplicatePredictionsResponse {
    pub id: String,
    pub urls: Option<ReplicateUrls>,
    pub status: String,
    pub output: Option<JobOutput>,
    pub error: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ReplicateUrls {
    pub get: Option<String>,
}
