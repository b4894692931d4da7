use serde::Deserialize;
use serde_json::Value;

use crate::designs::errors::VariantError;

/// Output of a succeeded job as the vendor sent it. The upstream API is not
/// consistent about the shape, so it is decoded once here and normalized with
/// [`JobOutput::first_url`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum JobOutput {
    SingleUrl(String),
    UrlList(Vec<String>),
    Malformed(Value),
}

impl JobOutput {
    pub fn first_url(self) -> Result<String, VariantError> {
        match self {
            Self::SingleUrl(url) if !url.trim().is_empty() => Ok(url),
            Self::SingleUrl(_) => Err(VariantError::ProtocolViolation(
                "output was an empty string".to_string(),
            )),
            Self::UrlList(urls) => match urls.into_iter().next() {
                Some(url) if !url.trim().is_empty() => Ok(url),
                Some(_) => Err(VariantError::ProtocolViolation(
                    "first output was an empty string".to_string(),
                )),
                None => Err(VariantError::ProtocolViolation(
                    "output list was empty".to_string(),
                )),
            },
            Self::Malformed(value) => Err(VariantError::ProtocolViolation(format!(
                "unexpected output shape: {}",
                value
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobResult {
    Pending,
    Succeeded(JobOutput),
    Failed(String),
}
