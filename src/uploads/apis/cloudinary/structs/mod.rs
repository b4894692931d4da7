pub mod cloudinary_upload_response;
