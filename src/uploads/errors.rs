use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("{0}")]
    InvalidImage(String),
    #[error("media host error: {0}")]
    Host(String),
}

impl UploadError {
    pub fn to_api_error(&self) -> ApiError {
        match self {
            Self::InvalidImage(message) => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: message.to_string(),
            },
            Self::Host(_) => UploadsApiError::UploadFailed.value(),
        }
    }
}

#[derive(Debug)]
pub enum UploadsApiError {
    NothingToUpload,
    TooManyFiles,
    UploadFailed,
}

impl UploadsApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::NothingToUpload => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Received nothing to upload.".to_string(),
            },
            Self::TooManyFiles => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Upload one image at a time.".to_string(),
            },
            Self::UploadFailed => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Upload failed.".to_string(),
            },
        }
    }
}
