/// Raw caller input for one generation batch. Validated by the orchestrator
/// before any job is submitted.
#[derive(Debug, Clone, Default)]
pub struct DesignParams {
    pub source_image_ref: Option<String>,
    pub style: Option<String>,
    pub room_type: Option<String>,
    pub variant_count: Option<usize>,
}
