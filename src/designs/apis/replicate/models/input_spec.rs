use serde::Serialize;

use super::input_spec_interior_design::InputSpecInteriorDesign;

#[derive(Debug, Serialize)]
pub struct InputSpec {
    pub version: String,
    pub input: InputSpecInteriorDesign,
}
