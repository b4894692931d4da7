use crate::designs::errors::VariantError;

#[derive(Debug, Clone)]
pub struct VariantOutcome {
    pub index: usize,
    pub seed: i64,
    pub result: Result<String, VariantError>,
}

impl VariantOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Ordered outcomes of one generation batch, one slot per seed.
#[derive(Debug, Clone, Default)]
pub struct VariantBatch {
    outcomes: Vec<VariantOutcome>,
}

impl VariantBatch {
    pub fn new(mut outcomes: Vec<VariantOutcome>) -> Self {
        outcomes.sort_by_key(|outcome| outcome.index);
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[VariantOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.outcomes()
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().ok().cloned())
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&VariantOutcome, &VariantError)> {
        self.outcomes()
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().err().map(|e| (outcome, e)))
    }

    pub fn succeeded_count(&self) -> usize {
        self.outcomes().iter().filter(|o| o.is_success()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.len() - self.succeeded_count()
    }

    pub fn failure_reasons(&self) -> Vec<String> {
        self.failures()
            .map(|(outcome, e)| format!("seed {}: {}", outcome.seed, e))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(index: usize, seed: i64, result: Result<&str, VariantError>) -> VariantOutcome {
        VariantOutcome {
            index,
            seed,
            result: result.map(str::to_string),
        }
    }

    #[test]
    fn reorders_by_index_and_splits_results() {
        let batch = VariantBatch::new(vec![
            outcome(2, 333, Ok("c")),
            outcome(0, 111, Ok("a")),
            outcome(1, 222, Err(VariantError::UpstreamJobFailure("nsfw".to_string()))),
        ]);

        let seeds: Vec<i64> = batch.outcomes().iter().map(|o| o.seed).collect();
        assert_eq!(seeds, vec![111, 222, 333]);
        assert_eq!(batch.urls(), vec!["a".to_string(), "c".to_string()]);
        assert_eq!(batch.succeeded_count(), 2);
        assert_eq!(batch.failed_count(), 1);
        assert_eq!(
            batch.failure_reasons(),
            vec!["seed 222: upstream job failed: nsfw".to_string()]
        );
    }
}
