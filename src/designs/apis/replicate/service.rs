use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Response, StatusCode};
use serde_json::Value;

use crate::{
    app::envy::Envy,
    designs::{
        apis::job_service::JobService,
        errors::JobServiceError,
        models::{
            generation_request::GenerationRequest,
            job_handle::JobHandle,
            job_result::{JobOutput, JobResult},
        },
    },
};

use super::{
    enums::replicate_prediction_status::ReplicatePredictionStatus,
    models::{input_spec::InputSpec, input_spec_interior_design::InputSpecInteriorDesign},
    structs::{
        replicate_error_response::ReplicateErrorResponse,
        replicate_predictions_response::ReplicatePredictionsResponse,
    },
};

#[derive(Clone)]
pub struct ReplicateClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model_version: String,
}

impl ReplicateClient {
    pub fn new(envy: &Envy) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(envy.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: envy.replicate_api_url.trim_end_matches('/').to_string(),
            api_key: envy.replicate_api_key.to_string(),
            model_version: envy.replicate_model_version.to_string(),
        })
    }

    fn provide_input_spec(&self, request: &GenerationRequest) -> InputSpec {
        InputSpec {
            version: self.model_version.to_string(),
            input: InputSpecInteriorDesign::from(request),
        }
    }

    async fn create_prediction(
        &self,
        input_spec: &InputSpec,
    ) -> Result<ReplicatePredictionsResponse, JobServiceError> {
        let url = format!("{}/predictions", self.api_url);
        let result = self
            .client
            .post(url)
            .header(header::AUTHORIZATION, format!("Token {}", self.api_key))
            .json(input_spec)
            .send()
            .await;

        match result {
            Ok(res) => read_prediction_response(res, "create_prediction").await,
            Err(e) => {
                tracing::warn!("create_prediction (1): {:?}", e);
                Err(JobServiceError::Transport(e.to_string()))
            }
        }
    }

    async fn get_prediction(
        &self,
        poll_url: &str,
    ) -> Result<ReplicatePredictionsResponse, JobServiceError> {
        let result = self
            .client
            .get(poll_url)
            .header(header::AUTHORIZATION, format!("Token {}", self.api_key))
            .send()
            .await;

        match result {
            Ok(res) => read_prediction_response(res, "get_prediction").await,
            Err(e) => {
                tracing::warn!("get_prediction (1): {:?}", e);
                Err(JobServiceError::Transport(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl JobService for ReplicateClient {
    async fn submit(&self, request: &GenerationRequest) -> Result<JobHandle, JobServiceError> {
        let input_spec = self.provide_input_spec(request);
        let response = self.create_prediction(&input_spec).await?;

        to_job_handle(response)
    }

    async fn poll(&self, handle: &JobHandle) -> Result<JobResult, JobServiceError> {
        let response = self.get_prediction(&handle.poll_url).await?;

        to_job_result(response)
    }
}

async fn read_prediction_response(
    res: Response,
    context: &str,
) -> Result<ReplicatePredictionsResponse, JobServiceError> {
    let status = res.status();

    match res.text().await {
        Ok(text) => parse_prediction_response(status, &text),
        Err(e) => {
            tracing::warn!("{} (2): {:?}", context, e);
            Err(JobServiceError::Transport(e.to_string()))
        }
    }
}

fn parse_prediction_response(
    status: StatusCode,
    text: &str,
) -> Result<ReplicatePredictionsResponse, JobServiceError> {
    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        return Err(JobServiceError::Transport(format!(
            "{}: {}",
            status,
            error_detail(text)
        )));
    }

    if !status.is_success() {
        return Err(JobServiceError::Rejected(format!(
            "{}: {}",
            status,
            error_detail(text)
        )));
    }

    serde_json::from_str(text).map_err(|e| {
        tracing::warn!("parse_prediction_response: {:?}", text);
        JobServiceError::MalformedEnvelope(e.to_string())
    })
}

fn error_detail(text: &str) -> String {
    match serde_json::from_str::<ReplicateErrorResponse>(text) {
        Ok(ReplicateErrorResponse {
            detail: Some(detail),
            ..
        }) => detail,
        Ok(ReplicateErrorResponse {
            title: Some(title),
            ..
        }) => title,
        _ => text.trim().to_string(),
    }
}

fn to_job_handle(response: ReplicatePredictionsResponse) -> Result<JobHandle, JobServiceError> {
    let Some(poll_url) = response.urls.and_then(|urls| urls.get) else {
        return Err(JobServiceError::MalformedEnvelope(format!(
            "prediction {} has no poll url",
            response.id
        )));
    };

    Ok(JobHandle {
        id: response.id,
        poll_url,
    })
}

fn to_job_result(response: ReplicatePredictionsResponse) -> Result<JobResult, JobServiceError> {
    let Some(status) = ReplicatePredictionStatus::from_value(&response.status) else {
        return Err(JobServiceError::MalformedEnvelope(format!(
            "prediction {} has unknown status {}",
            response.id, response.status
        )));
    };

    let result = match status {
        ReplicatePredictionStatus::Starting | ReplicatePredictionStatus::Processing => {
            JobResult::Pending
        }
        ReplicatePredictionStatus::Succeeded => {
            JobResult::Succeeded(response.output.unwrap_or(JobOutput::Malformed(Value::Null)))
        }
        ReplicatePredictionStatus::Failed => JobResult::Failed(failure_reason(response.error)),
        ReplicatePredictionStatus::Canceled => {
            JobResult::Failed(ReplicatePredictionStatus::Canceled.value().to_string())
        }
    };

    Ok(result)
}

fn failure_reason(error: Option<Value>) -> String {
    match error {
        Some(Value::String(reason)) if !reason.trim().is_empty() => reason,
        Some(Value::String(_)) | Some(Value::Null) | None => "prediction failed".to_string(),
        Some(other) => other.to_string(),
    }
}
