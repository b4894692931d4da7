use serde::Deserialize;

use crate::designs::{
    apis::replicate::enums::replicate_model_version::ReplicateModelVersion,
    enums::{failure_policy::FailurePolicy, variant_mode::VariantMode},
};

#[derive(Debug, Clone, Deserialize)]
pub struct Envy {
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub frontend_url: Option<String>,
    pub port: Option<u16>,

    pub replicate_api_key: String,
    #[serde(default = "default_replicate_api_url")]
    pub replicate_api_url: String,
    #[serde(default = "default_replicate_model_version")]
    pub replicate_model_version: String,

    pub cloudinary_cloud_name: String,
    pub cloudinary_api_key: String,
    pub cloudinary_api_secret: String,
    #[serde(default = "default_cloudinary_folder")]
    pub cloudinary_folder: String,

    #[serde(default = "default_variant_seeds")]
    pub variant_seeds: Vec<i64>,
    #[serde(default)]
    pub variant_policy: VariantMode,
    #[serde(default = "default_sequential_delay_ms")]
    pub sequential_delay_ms: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,
    #[serde(default = "default_max_poll_secs")]
    pub max_poll_secs: u64,
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: usize,
    #[serde(default = "default_retry_base_ms")]
    pub retry_base_ms: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default = "default_rate_limit_per_sec")]
    pub rate_limit_per_sec: u64,
}

fn default_app_env() -> String {
    "development".to_string()
}

fn default_replicate_api_url() -> String {
    "https://api.replicate.com/v1".to_string()
}

fn default_replicate_model_version() -> String {
    ReplicateModelVersion::INTERIOR_DESIGN.to_string()
}

fn default_cloudinary_folder() -> String {
    "interior-ai".to_string()
}

fn default_variant_seeds() -> Vec<i64> {
    vec![111, 222, 333]
}

fn default_sequential_delay_ms() -> u64 {
    11_000
}

fn default_poll_interval_ms() -> u64 {
    2_500
}

fn default_max_poll_attempts() -> u32 {
    240
}

fn default_max_poll_secs() -> u64 {
    600
}

fn default_deadline_secs() -> u64 {
    900
}

fn default_retry_attempts() -> usize {
    3
}

fn default_retry_base_ms() -> u64 {
    500
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_rate_limit_per_sec() -> u64 {
    5
}

#[cfg(test)]
impl Envy {
    pub fn for_tests() -> Self {
        Self {
            app_env: "test".to_string(),
            frontend_url: None,
            port: None,
            replicate_api_key: "r8_test".to_string(),
            replicate_api_url: default_replicate_api_url(),
            replicate_model_version: default_replicate_model_version(),
            cloudinary_cloud_name: "demo".to_string(),
            cloudinary_api_key: "1234".to_string(),
            cloudinary_api_secret: "secret".to_string(),
            cloudinary_folder: default_cloudinary_folder(),
            variant_seeds: default_variant_seeds(),
            variant_policy: VariantMode::Concurrent,
            sequential_delay_ms: 0,
            poll_interval_ms: 1,
            max_poll_attempts: 10,
            max_poll_secs: 5,
            deadline_secs: 5,
            failure_policy: FailurePolicy::AtLeastOne,
            retry_attempts: 0,
            retry_base_ms: 1,
            request_timeout_secs: 5,
            max_upload_bytes: default_max_upload_bytes(),
            rate_limit_per_sec: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_defaults_from_minimal_environment() {
        let vars = vec![
            ("REPLICATE_API_KEY".to_string(), "r8_key".to_string()),
            ("CLOUDINARY_CLOUD_NAME".to_string(), "demo".to_string()),
            ("CLOUDINARY_API_KEY".to_string(), "1234".to_string()),
            ("CLOUDINARY_API_SECRET".to_string(), "secret".to_string()),
        ];

        let envy = envy::from_iter::<_, Envy>(vars).unwrap();

        assert_eq!(envy.app_env, "development");
        assert_eq!(envy.variant_seeds, vec![111, 222, 333]);
        assert_eq!(envy.variant_policy, VariantMode::Concurrent);
        assert_eq!(envy.failure_policy, FailurePolicy::AtLeastOne);
        assert_eq!(envy.poll_interval_ms, 2_500);
        assert_eq!(envy.sequential_delay_ms, 11_000);
    }

    #[test]
    fn reads_seed_list_and_policies() {
        let vars = vec![
            ("REPLICATE_API_KEY".to_string(), "r8_key".to_string()),
            ("CLOUDINARY_CLOUD_NAME".to_string(), "demo".to_string()),
            ("CLOUDINARY_API_KEY".to_string(), "1234".to_string()),
            ("CLOUDINARY_API_SECRET".to_string(), "secret".to_string()),
            ("VARIANT_SEEDS".to_string(), "7,8".to_string()),
            ("VARIANT_POLICY".to_string(), "sequential".to_string()),
            ("FAILURE_POLICY".to_string(), "require_all".to_string()),
        ];

        let envy = envy::from_iter::<_, Envy>(vars).unwrap();

        assert_eq!(envy.variant_seeds, vec![7, 8]);
        assert_eq!(envy.variant_policy, VariantMode::Sequential);
        assert_eq!(envy.failure_policy, FailurePolicy::RequireAll);
    }
}
