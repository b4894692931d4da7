use axum::{extract::Multipart, http::StatusCode};
use uuid::Uuid;

use crate::app::models::api_error::ApiError;

use super::models::file_properties::FileProperties;

pub async fn get_files_properties(mut multipart: Multipart) -> Result<Vec<FileProperties>, ApiError> {
    let mut vec = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(%e, "get_files_properties failed next_field");
                return Err(ApiError {
                    code: StatusCode::BAD_REQUEST,
                    message: "Malformed multipart body.".to_string(),
                });
            }
        };

        let file_name = field.file_name().unwrap_or("file-name").to_string();
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let Ok(data) = field.bytes().await else {
            continue;
        };

        let properties = FileProperties {
            id: Uuid::new_v4().to_string(),
            file_name,
            mime_type,
            data,
        };

        vec.push(properties);
    }

    Ok(vec)
}
