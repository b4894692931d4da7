pub mod design_params;
pub mod generate_design_response;
pub mod generation_config;
pub mod generation_request;
pub mod job_handle;
pub mod job_result;
pub mod variant_batch;
