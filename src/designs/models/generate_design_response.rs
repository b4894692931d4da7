use serde::Serialize;

use super::variant_batch::VariantBatch;

#[derive(Debug, Serialize)]
pub struct VariantFailure {
    pub index: usize,
    pub seed: i64,
    pub kind: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateDesignResponse {
    pub images: Vec<String>,
    pub failures: Vec<VariantFailure>,
}

impl From<&VariantBatch> for GenerateDesignResponse {
    fn from(batch: &VariantBatch) -> Self {
        let failures = batch
            .failures()
            .map(|(outcome, e)| VariantFailure {
                index: outcome.index,
                seed: outcome.seed,
                kind: e.kind().to_string(),
                reason: e.to_string(),
            })
            .collect();

        Self {
            images: batch.urls(),
            failures,
        }
    }
}
