use std::time::Duration;

use crate::{
    app::envy::Envy,
    designs::{
        enums::{failure_policy::FailurePolicy, variant_mode::VariantMode},
        errors::ConfigError,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantPolicy {
    Concurrent,
    /// Each submission waits `delay` after the previous variant settled,
    /// matching the vendor's rate limit.
    Sequential { delay: Duration },
}

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub seeds: Vec<i64>,
    pub policy: VariantPolicy,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
    pub max_poll_duration: Duration,
    pub deadline: Duration,
    pub failure_policy: FailurePolicy,
    pub retry_attempts: usize,
    pub retry_base: Duration,
}

impl GenerationConfig {
    pub fn from_envy(envy: &Envy) -> Result<Self, ConfigError> {
        if envy.variant_seeds.is_empty() {
            return Err(ConfigError::NoSeeds);
        }

        if envy.max_poll_attempts == 0 {
            return Err(ConfigError::NoPollAttempts);
        }

        let policy = match envy.variant_policy {
            VariantMode::Concurrent => VariantPolicy::Concurrent,
            VariantMode::Sequential => VariantPolicy::Sequential {
                delay: Duration::from_millis(envy.sequential_delay_ms),
            },
        };

        Ok(Self {
            seeds: envy.variant_seeds.clone(),
            policy,
            poll_interval: Duration::from_millis(envy.poll_interval_ms),
            max_poll_attempts: envy.max_poll_attempts,
            max_poll_duration: Duration::from_secs(envy.max_poll_secs),
            deadline: Duration::from_secs(envy.deadline_secs),
            failure_policy: envy.failure_policy,
            retry_attempts: envy.retry_attempts,
            retry_base: Duration::from_millis(envy.retry_base_ms),
        })
    }

    pub fn variant_count(&self) -> usize {
        self.seeds.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_mode_carries_configured_delay() {
        let mut envy = Envy::for_tests();
        envy.variant_policy = VariantMode::Sequential;
        envy.sequential_delay_ms = 11_000;

        let config = GenerationConfig::from_envy(&envy).unwrap();

        assert_eq!(
            config.policy,
            VariantPolicy::Sequential {
                delay: Duration::from_secs(11)
            }
        );
        assert_eq!(config.variant_count(), 3);
    }

    #[test]
    fn rejects_empty_seed_list() {
        let mut envy = Envy::for_tests();
        envy.variant_seeds = vec![];

        assert!(matches!(
            GenerationConfig::from_envy(&envy),
            Err(ConfigError::NoSeeds)
        ));
    }

    #[test]
    fn rejects_zero_poll_attempts() {
        let mut envy = Envy::for_tests();
        envy.max_poll_attempts = 0;

        assert!(matches!(
            GenerationConfig::from_envy(&envy),
            Err(ConfigError::NoPollAttempts)
        ));
    }
}
