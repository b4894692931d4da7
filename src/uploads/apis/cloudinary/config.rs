pub static API_URL: &str = "https://api.cloudinary.com/v1_1";
