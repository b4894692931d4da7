use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    app::models::{api_error::ApiError, json_from_request::JsonFromRequest},
    AppState,
};

use super::{
    dtos::generate_design_dto::GenerateDesignDto,
    models::generate_design_response::GenerateDesignResponse, service,
};

pub async fn generate_design(
    State(state): State<AppState>,
    JsonFromRequest(dto): JsonFromRequest<GenerateDesignDto>,
) -> Result<Json<GenerateDesignResponse>, ApiError> {
    match dto.validate() {
        Ok(_) => match service::generate_design(&dto, &state).await {
            Ok(response) => Ok(Json(response)),
            Err(e) => Err(e),
        },
        Err(e) => Err(ApiError {
            code: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        }),
    }
}
