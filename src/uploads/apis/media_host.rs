use async_trait::async_trait;

use crate::{
    app::util::multipart::models::image_file_properties::ImageFileProperties,
    uploads::{errors::UploadError, models::hosted_image::HostedImage},
};

/// Stores raw image data and hands back a durable public URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaHost: Send + Sync {
    async fn upload(&self, image: &ImageFileProperties) -> Result<HostedImage, UploadError>;
}
