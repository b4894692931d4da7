use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::designs::models::design_params::DesignParams;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDesignDto {
    #[serde(default, alias = "sourceImageRef")]
    #[validate(length(max = 2048, message = "image must be at most 2048 characters."))]
    pub image: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100, message = "style must be at most 100 characters."))]
    pub style: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100, message = "roomType must be at most 100 characters."))]
    pub room_type: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1, max = 10, message = "number must be between 1 and 10."))]
    pub number: Option<u8>,
}

impl GenerateDesignDto {
    pub fn sanitized(&self) -> Self {
        let clean = |value: &Option<String>| {
            value
                .as_ref()
                .map(|v| v.trim().replace('\n', "").replace('\r', ""))
        };

        Self {
            image: clean(&self.image),
            style: clean(&self.style),
            room_type: clean(&self.room_type),
            number: self.number,
        }
    }

    pub fn to_params(&self) -> DesignParams {
        DesignParams {
            source_image_ref: self.image.clone(),
            style: self.style.clone(),
            room_type: self.room_type.clone(),
            variant_count: self.number.map(usize::from),
        }
    }
}
