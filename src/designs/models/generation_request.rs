/// One variant's job description. Built once per seed and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub source_image_ref: String,
    pub style_prompt: String,
    pub room_type: String,
    pub variant_seed: i64,
}

impl GenerationRequest {
    pub fn new(source_image_ref: &str, style: &str, room_type: &str, variant_seed: i64) -> Self {
        let room_type = room_type.trim().to_lowercase();
        let style = style.trim().to_lowercase();

        Self {
            source_image_ref: source_image_ref.trim().to_string(),
            style_prompt: format!("A {} designed in {} style.", room_type, style),
            room_type,
            variant_seed,
        }
    }
}
