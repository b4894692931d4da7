use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use sha2::{Digest, Sha256};

use crate::{
    app::{
        envy::Envy,
        util::{multipart::models::image_file_properties::ImageFileProperties, time},
    },
    uploads::{apis::media_host::MediaHost, errors::UploadError, models::hosted_image::HostedImage},
};

use super::{
    config::API_URL,
    structs::cloudinary_upload_response::{CloudinaryErrorResponse, CloudinaryUploadResponse},
};

#[derive(Clone)]
pub struct CloudinaryClient {
    client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    folder: String,
}

impl CloudinaryClient {
    pub fn new(envy: &Envy) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(envy.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            cloud_name: envy.cloudinary_cloud_name.to_string(),
            api_key: envy.cloudinary_api_key.to_string(),
            api_secret: envy.cloudinary_api_secret.to_string(),
            folder: envy.cloudinary_folder.to_string(),
        })
    }

    fn provide_form(&self, image: &ImageFileProperties) -> Result<Form, UploadError> {
        let file_properties = &image.file_properties;
        let timestamp = time::current_time_in_secs().to_string();
        let signature = sign(
            &[
                ("folder", &self.folder),
                ("public_id", &file_properties.id),
                ("timestamp", &timestamp),
            ],
            &self.api_secret,
        );

        let part = Part::bytes(file_properties.data.to_vec())
            .file_name(file_properties.file_name.to_string())
            .mime_str(&file_properties.mime_type)
            .map_err(|e| UploadError::InvalidImage(e.to_string()))?;

        Ok(Form::new()
            .part("file", part)
            .text("api_key", self.api_key.to_string())
            .text("timestamp", timestamp)
            .text("folder", self.folder.to_string())
            .text("public_id", file_properties.id.to_string())
            .text("signature", signature)
            .text("signature_algorithm", "sha256"))
    }
}

#[async_trait]
impl MediaHost for CloudinaryClient {
    async fn upload(&self, image: &ImageFileProperties) -> Result<HostedImage, UploadError> {
        let form = self.provide_form(image)?;
        let url = format!("{}/{}/image/upload", API_URL, self.cloud_name);

        let result = self.client.post(url).multipart(form).send().await;

        let res = match result {
            Ok(res) => res,
            Err(e) => {
                tracing::error!("upload (1): {:?}", e);
                return Err(UploadError::Host(e.to_string()));
            }
        };

        let status = res.status();
        let text = match res.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("upload (2): {:?}", e);
                return Err(UploadError::Host(e.to_string()));
            }
        };

        if !status.is_success() {
            let message = match serde_json::from_str::<CloudinaryErrorResponse>(&text) {
                Ok(error_response) => error_response.error.message,
                Err(_) => text,
            };
            tracing::error!("upload (3): {} {}", status, message);
            return Err(UploadError::Host(format!("{}: {}", status, message)));
        }

        match serde_json::from_str::<CloudinaryUploadResponse>(&text) {
            Ok(upload_res) => Ok(to_hosted_image(upload_res, image)),
            Err(e) => {
                tracing::error!("upload (4): {:?}", text);
                Err(UploadError::Host(e.to_string()))
            }
        }
    }
}

/// Cloudinary request signature: parameters sorted by name, joined as a
/// query string, suffixed with the API secret, then hashed.
fn sign(params: &[(&str, &String)], api_secret: &str) -> String {
    let mut params = params.to_vec();
    params.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<String>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());

    hex::encode(hasher.finalize())
}

fn to_hosted_image(upload_res: CloudinaryUploadResponse, image: &ImageFileProperties) -> HostedImage {
    HostedImage {
        url: upload_res.secure_url,
        public_id: upload_res.public_id,
        width: upload_res.width.unwrap_or(image.image_size.width),
        height: upload_res.height.unwrap_or(image.image_size.height),
    }
}
