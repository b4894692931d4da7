use imagesize::ImageSize;

use super::file_properties::FileProperties;

#[derive(Debug)]
pub struct ImageFileProperties {
    pub file_properties: FileProperties,
    pub image_size: ImageSize,
}

impl ImageFileProperties {
    /// Accepts the file only when its mime type is `image/*` and its
    /// dimensions can be read from the header bytes.
    pub fn from_file(file_properties: FileProperties) -> Option<Self> {
        let Ok(mime_type) = file_properties.mime_type.parse::<mime::Mime>() else {
            return None;
        };

        if mime_type.type_() != mime::IMAGE {
            return None;
        }

        let Ok(image_size) = imagesize::blob_size(&file_properties.data) else {
            return None;
        };

        Some(Self {
            file_properties,
            image_size,
        })
    }
}
