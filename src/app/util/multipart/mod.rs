pub mod models;
pub mod multipart;
