use serde::Serialize;

use crate::designs::models::generation_request::GenerationRequest;

#[derive(Debug, Serialize)]
pub struct InputSpecInteriorDesign {
    pub image: String,
    pub prompt: String,
    pub seed: i64,
}

impl From<&GenerationRequest> for InputSpecInteriorDesign {
    fn from(request: &GenerationRequest) -> Self {
        Self {
            image: request.source_image_ref.to_string(),
            prompt: request.style_prompt.to_string(),
            seed: request.variant_seed,
        }
    }
}
