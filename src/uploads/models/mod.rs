pub mod hosted_image;
