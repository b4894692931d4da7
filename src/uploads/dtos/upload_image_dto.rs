use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageDto {
    #[validate(length(min = 1, message = "base64Image must not be empty."))]
    pub base64_image: String,
}
