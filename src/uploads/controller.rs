use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    app::models::{api_error::ApiError, json_from_request::JsonFromRequest},
    AppState,
};

use super::{dtos::upload_image_dto::UploadImageDto, models::hosted_image::HostedImage, service};

pub async fn upload_image(
    State(state): State<AppState>,
    JsonFromRequest(dto): JsonFromRequest<UploadImageDto>,
) -> Result<Json<HostedImage>, ApiError> {
    match dto.validate() {
        Ok(_) => match service::upload_base64_image(&dto, state.media_host.as_ref()).await {
            Ok(hosted_image) => Ok(Json(hosted_image)),
            Err(e) => Err(e),
        },
        Err(e) => Err(ApiError {
            code: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        }),
    }
}

pub async fn upload_multipart_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<HostedImage>, ApiError> {
    match service::upload_multipart_image(multipart, state.media_host.as_ref()).await {
        Ok(hosted_image) => Ok(Json(hosted_image)),
        Err(e) => Err(e),
    }
}
