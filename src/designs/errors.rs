use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

/// Why a single variant did not produce an image. Recorded per variant and
/// never propagated on its own.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VariantError {
    #[error("upstream request failed: {0}")]
    UpstreamRequest(String),
    #[error("upstream job failed: {0}")]
    UpstreamJobFailure(String),
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),
    #[error("timed out: {0}")]
    Timeout(String),
}

impl VariantError {
    pub fn kind(&self) -> &str {
        match *self {
            Self::UpstreamRequest(_) => "upstream_request",
            Self::UpstreamJobFailure(_) => "upstream_job_failure",
            Self::ProtocolViolation(_) => "protocol_violation",
            Self::Timeout(_) => "timeout",
        }
    }
}

/// Errors raised by a job service adapter on a single submit or poll call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobServiceError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),
}

impl JobServiceError {
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<JobServiceError> for VariantError {
    fn from(e: JobServiceError) -> Self {
        Self::UpstreamRequest(e.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("{0}")]
    Validation(String),
    #[error("All {count} variants failed: {}", .reasons.join("; "))]
    TotalFailure { count: usize, reasons: Vec<String> },
    #[error("{failed} of {count} variants failed: {}", .reasons.join("; "))]
    IncompleteBatch {
        failed: usize,
        count: usize,
        reasons: Vec<String>,
    },
}

impl GenerationError {
    pub fn to_api_error(&self) -> ApiError {
        let code = match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::TotalFailure { .. } | Self::IncompleteBatch { .. } => StatusCode::BAD_GATEWAY,
        };

        ApiError {
            code,
            message: self.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("VARIANT_SEEDS must list at least one seed")]
    NoSeeds,
    #[error("MAX_POLL_ATTEMPTS must be at least 1")]
    NoPollAttempts,
}
