use axum::extract::Multipart;
use bytes::Bytes;
use imagesize::ImageType;
use regex::Regex;
use uuid::Uuid;

use crate::app::{
    models::api_error::ApiError,
    util::multipart::{
        models::{file_properties::FileProperties, image_file_properties::ImageFileProperties},
        multipart::get_files_properties,
    },
};

use super::{
    apis::media_host::MediaHost,
    dtos::upload_image_dto::UploadImageDto,
    errors::{UploadError, UploadsApiError},
    models::hosted_image::HostedImage,
};

lazy_static! {
    static ref DATA_URI: Regex =
        Regex::new(r"^data:(?P<mime>[\w.+-]+/[\w.+-]+)(;[\w-]+=[\w.-]+)*;base64,(?P<data>.+)$")
            .expect("data uri pattern");
}

pub async fn upload_base64_image(
    dto: &UploadImageDto,
    media_host: &dyn MediaHost,
) -> Result<HostedImage, ApiError> {
    let file_properties = match decode_base64_image(&dto.base64_image) {
        Ok(file_properties) => file_properties,
        Err(e) => return Err(e.to_api_error()),
    };

    upload_image(file_properties, media_host).await
}

pub async fn upload_multipart_image(
    multipart: Multipart,
    media_host: &dyn MediaHost,
) -> Result<HostedImage, ApiError> {
    let mut files_properties = get_files_properties(multipart).await?;

    if files_properties.is_empty() {
        return Err(UploadsApiError::NothingToUpload.value());
    }

    if files_properties.len() > 1 {
        return Err(UploadsApiError::TooManyFiles.value());
    }

    upload_image(files_properties.remove(0), media_host).await
}

async fn upload_image(
    file_properties: FileProperties,
    media_host: &dyn MediaHost,
) -> Result<HostedImage, ApiError> {
    if file_properties.data.is_empty() {
        return Err(UploadsApiError::NothingToUpload.value());
    }

    let Some(image) = ImageFileProperties::from_file(file_properties) else {
        return Err(
            UploadError::InvalidImage("Files must be of type image.".to_string()).to_api_error(),
        );
    };

    match media_host.upload(&image).await {
        Ok(hosted_image) => {
            tracing::info!(
                url = %hosted_image.url,
                width = hosted_image.width,
                height = hosted_image.height,
                "uploaded source image"
            );
            Ok(hosted_image)
        }
        Err(e) => {
            tracing::error!("upload_image failed: {}", e);
            Err(e.to_api_error())
        }
    }
}

/// Accepts either a `data:<mime>;base64,<data>` URI or bare base64. Bare data
/// gets its mime type from the image header.
fn decode_base64_image(input: &str) -> Result<FileProperties, UploadError> {
    let input = input.trim();

    let (mime_type, encoded) = match DATA_URI.captures(input) {
        Some(captures) => (
            captures.name("mime").map(|m| m.as_str().to_string()),
            captures.name("data").map_or("", |m| m.as_str()),
        ),
        None => (None, input),
    };

    let Ok(bytes) = base64::decode(encoded) else {
        return Err(UploadError::InvalidImage(
            "Could not decode image.".to_string(),
        ));
    };

    let mime_type = match mime_type {
        Some(mime_type) => mime_type,
        None => sniff_mime_type(&bytes).to_string(),
    };

    let id = Uuid::new_v4().to_string();

    Ok(FileProperties {
        id: id.to_string(),
        file_name: id,
        mime_type,
        data: Bytes::from(bytes),
    })
}

fn sniff_mime_type(bytes: &[u8]) -> &'static str {
    match imagesize::image_type(bytes) {
        Ok(ImageType::Png) => "image/png",
        Ok(ImageType::Jpeg) => "image/jpeg",
        Ok(ImageType::Gif) => "image/gif",
        Ok(ImageType::Webp) => "image/webp",
        Ok(ImageType::Bmp) => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uploads::apis::media_host::MockMediaHost;

    const PNG_1X1: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

    #[test]
    fn decodes_data_uri() {
        let file_properties =
            decode_base64_image(&format!("data:image/png;base64,{}", PNG_1X1)).unwrap();

        assert_eq!(file_properties.mime_type, "image/png");
        assert_eq!(&file_properties.data[1..4], b"PNG");
    }

    #[test]
    fn decodes_bare_base64_and_sniffs_mime_type() {
        let file_properties = decode_base64_image(PNG_1X1).unwrap();

        assert_eq!(file_properties.mime_type, "image/png");
    }

    #[test]
    fn rejects_undecodable_input() {
        assert_eq!(
            decode_base64_image("data:image/png;base64,@@@").unwrap_err(),
            UploadError::InvalidImage("Could not decode image.".to_string())
        );
    }

    #[tokio::test]
    async fn rejects_non_image_payloads_without_uploading() {
        let media_host = MockMediaHost::new();
        let dto = UploadImageDto {
            base64_image: format!("data:text/plain;base64,{}", base64::encode("hello")),
        };

        let err = upload_base64_image(&dto, &media_host).await.unwrap_err();

        assert_eq!(err.code, axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Files must be of type image.");
    }

    #[tokio::test]
    async fn uploads_decoded_image_to_media_host() {
        let mut media_host = MockMediaHost::new();
        media_host
            .expect_upload()
            .times(1)
            .withf(|image| {
                image.file_properties.mime_type == "image/png"
                    && image.image_size.width == 1
                    && image.image_size.height == 1
            })
            .returning(|image| {
                Ok(HostedImage {
                    url: format!(
                        "https://res.cloudinary.com/demo/image/upload/interior-ai/{}.png",
                        image.file_properties.id
                    ),
                    public_id: image.file_properties.id.to_string(),
                    width: image.image_size.width,
                    height: image.image_size.height,
                })
            });

        let dto = UploadImageDto {
            base64_image: format!("data:image/png;base64,{}", PNG_1X1),
        };
        let hosted = upload_base64_image(&dto, &media_host).await.unwrap();

        assert!(hosted.url.starts_with("https://res.cloudinary.com/demo/"));
        assert_eq!(hosted.width, 1);
    }

    #[tokio::test]
    async fn media_host_failures_become_upload_failed() {
        let mut media_host = MockMediaHost::new();
        media_host
            .expect_upload()
            .returning(|_| Err(UploadError::Host("401 Unauthorized: Invalid Signature".to_string())));

        let dto = UploadImageDto {
            base64_image: PNG_1X1.to_string(),
        };
        let err = upload_base64_image(&dto, &media_host).await.unwrap_err();

        assert_eq!(err.code, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Upload failed.");
    }
}
