pub mod failure_policy;
pub mod variant_mode;
