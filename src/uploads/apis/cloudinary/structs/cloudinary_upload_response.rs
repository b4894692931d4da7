use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CloudinaryUploadResponse {
    pub public_id: String,
    pub secure_url: String,
    pub width: Option<usize>,
    pub height: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CloudinaryErrorResponse {
    pub error: CloudinaryErrorMessage,
}

#[derive(Debug, Deserialize)]
pub struct CloudinaryErrorMessage {
    pub message: String,
}
