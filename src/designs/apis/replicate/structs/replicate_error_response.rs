use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ReplicateErrorResponse {
    pub title: Option<String>,
    pub detail: Option<String>,
}
