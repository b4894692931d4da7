use std::{future::Future, time::Duration};

use tokio::time::{sleep, sleep_until, timeout_at, Instant};
use tokio_retry::{
    strategy::{jitter, ExponentialBackoff},
    RetryIf,
};

use super::{
    apis::job_service::JobService,
    enums::failure_policy::FailurePolicy,
    errors::{GenerationError, JobServiceError, VariantError},
    models::{
        design_params::DesignParams,
        generation_config::{GenerationConfig, VariantPolicy},
        generation_request::GenerationRequest,
        job_handle::JobHandle,
        job_result::JobResult,
        variant_batch::{VariantBatch, VariantOutcome},
    },
};

const MAX_RETRY_DELAY: Duration = Duration::from_secs(10);

/// Runs one generation job per seed and collects the outcomes in seed order.
///
/// Individual variant failures are recorded in the returned batch. The call
/// itself only fails on invalid input, when every variant failed, or when
/// the failure policy demands that all variants succeed.
pub async fn generate_variants(
    job_service: &dyn JobService,
    params: &DesignParams,
    config: &GenerationConfig,
) -> Result<VariantBatch, GenerationError> {
    let requests = build_requests(params, config)?;
    let deadline = Instant::now() + config.deadline;

    tracing::info!(
        variants = requests.len(),
        policy = ?config.policy,
        "generating variants for {}",
        requests[0].source_image_ref
    );

    let outcomes = match &config.policy {
        VariantPolicy::Concurrent => {
            let futures = requests
                .iter()
                .enumerate()
                .map(|(index, request)| run_variant(job_service, index, request, config, deadline));

            futures::future::join_all(futures).await
        }
        VariantPolicy::Sequential { delay } => {
            let mut outcomes = Vec::with_capacity(requests.len());

            for (index, request) in requests.iter().enumerate() {
                if index > 0 {
                    sleep_until(deadline.min(Instant::now() + *delay)).await;
                }

                if Instant::now() >= deadline {
                    tracing::warn!(seed = request.variant_seed, "deadline passed before submission");
                    outcomes.push(VariantOutcome {
                        index,
                        seed: request.variant_seed,
                        result: Err(deadline_error(config)),
                    });
                    continue;
                }

                outcomes.push(run_variant(job_service, index, request, config, deadline).await);
            }

            outcomes
        }
    };

    settle(VariantBatch::new(outcomes), config.failure_policy)
}

fn build_requests(
    params: &DesignParams,
    config: &GenerationConfig,
) -> Result<Vec<GenerationRequest>, GenerationError> {
    let fields = [
        ("image", &params.source_image_ref),
        ("style", &params.style),
        ("roomType", &params.room_type),
    ];

    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect();

    if !missing.is_empty() {
        return Err(GenerationError::Validation(format!(
            "Missing fields ({}).",
            missing.join(", ")
        )));
    }

    let available = config.variant_count();
    let count = params.variant_count.unwrap_or(available);

    if count == 0 || count > available {
        return Err(GenerationError::Validation(format!(
            "number must be between 1 and {}.",
            available
        )));
    }

    let source_image_ref = params.source_image_ref.as_deref().unwrap_or_default();
    let style = params.style.as_deref().unwrap_or_default();
    let room_type = params.room_type.as_deref().unwrap_or_default();

    Ok(config
        .seeds
        .iter()
        .take(count)
        .map(|seed| GenerationRequest::new(source_image_ref, style, room_type, *seed))
        .collect())
}

async fn run_variant(
    job_service: &dyn JobService,
    index: usize,
    request: &GenerationRequest,
    config: &GenerationConfig,
    deadline: Instant,
) -> VariantOutcome {
    let seed = request.variant_seed;

    let result = match timeout_at(deadline, run_job(job_service, request, config)).await {
        Ok(result) => result,
        Err(_) => Err(deadline_error(config)),
    };

    match &result {
        Ok(url) => tracing::info!(seed, %url, "variant succeeded"),
        Err(e) => tracing::warn!(seed, kind = e.kind(), "variant failed: {}", e),
    }

    VariantOutcome {
        index,
        seed,
        result,
    }
}

async fn run_job(
    job_service: &dyn JobService,
    request: &GenerationRequest,
    config: &GenerationConfig,
) -> Result<String, VariantError> {
    let handle = with_transient_retry(config, || job_service.submit(request)).await?;

    tracing::debug!(
        seed = request.variant_seed,
        job_id = %handle.id,
        "submitted generation job"
    );

    await_job_completion(job_service, &handle, config).await
}

async fn await_job_completion(
    job_service: &dyn JobService,
    handle: &JobHandle,
    config: &GenerationConfig,
) -> Result<String, VariantError> {
    let started = Instant::now();

    for attempt in 1..=config.max_poll_attempts {
        let result = with_transient_retry(config, || job_service.poll(handle)).await?;

        match result {
            JobResult::Succeeded(output) => return output.first_url(),
            JobResult::Failed(reason) => return Err(VariantError::UpstreamJobFailure(reason)),
            JobResult::Pending => {
                tracing::debug!(job_id = %handle.id, attempt, "job still pending");
            }
        }

        if attempt == config.max_poll_attempts {
            break;
        }

        if started.elapsed() + config.poll_interval > config.max_poll_duration {
            return Err(VariantError::Timeout(format!(
                "job {} still pending after {:?}",
                handle.id, config.max_poll_duration
            )));
        }

        sleep(config.poll_interval).await;
    }

    Err(VariantError::Timeout(format!(
        "job {} still pending after {} polls",
        handle.id, config.max_poll_attempts
    )))
}

async fn with_transient_retry<T, A, F>(
    config: &GenerationConfig,
    action: A,
) -> Result<T, JobServiceError>
where
    A: FnMut() -> F,
    F: Future<Output = Result<T, JobServiceError>>,
{
    let factor = (config.retry_base.as_millis() / 2) as u64;
    let retry_strategy = ExponentialBackoff::from_millis(2)
        .factor(factor)
        .max_delay(MAX_RETRY_DELAY)
        .map(jitter)
        .take(config.retry_attempts);

    RetryIf::spawn(retry_strategy, action, |e: &JobServiceError| {
        if e.is_transient() {
            tracing::warn!("retrying after transient job service error: {}", e);
        }
        e.is_transient()
    })
    .await
}

fn deadline_error(config: &GenerationConfig) -> VariantError {
    VariantError::Timeout(format!(
        "overall deadline of {:?} elapsed",
        config.deadline
    ))
}

fn settle(batch: VariantBatch, policy: FailurePolicy) -> Result<VariantBatch, GenerationError> {
    let count = batch.len();
    let failed = batch.failed_count();

    if failed == count {
        return Err(GenerationError::TotalFailure {
            count,
            reasons: batch.failure_reasons(),
        });
    }

    if failed > 0 && policy == FailurePolicy::RequireAll {
        return Err(GenerationError::IncompleteBatch {
            failed,
            count,
            reasons: batch.failure_reasons(),
        });
    }

    Ok(batch)
}
