use crate::{app::models::api_error::ApiError, AppState};

use super::{
    dtos::generate_design_dto::GenerateDesignDto, errors::GenerationError,
    models::generate_design_response::GenerateDesignResponse, orchestrator,
};

pub async fn generate_design(
    dto: &GenerateDesignDto,
    state: &AppState,
) -> Result<GenerateDesignResponse, ApiError> {
    let params = dto.sanitized().to_params();

    match orchestrator::generate_variants(
        state.job_service.as_ref(),
        &params,
        &state.generation_config,
    )
    .await
    {
        Ok(batch) => {
            tracing::info!(
                succeeded = batch.succeeded_count(),
                failed = batch.failed_count(),
                "generate_design completed"
            );
            Ok(GenerateDesignResponse::from(&batch))
        }
        Err(e) => {
            match &e {
                GenerationError::Validation(message) => {
                    tracing::debug!("generate_design rejected: {}", message)
                }
                _ => tracing::error!("generate_design failed: {}", e),
            }
            Err(e.to_api_error())
        }
    }
}
