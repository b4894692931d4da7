pub mod upload_image_dto;
