use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    BoxError, Router,
};
use tower::{buffer::BufferLayer, limit::RateLimitLayer, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{app, designs, uploads, AppState};

use super::errors::DefaultApiError;

pub fn build(state: AppState) -> Router {
    let envy = state.envy.clone();

    let cors = CorsLayer::new()
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::POST, Method::GET]);

    let cors = match envy
        .frontend_url
        .as_deref()
        .map(|url| url.parse::<HeaderValue>())
    {
        Some(Ok(origin)) => cors.allow_origin(origin),
        Some(Err(e)) => {
            tracing::warn!(%e, "invalid FRONTEND_URL, allowing any origin");
            cors.allow_origin(Any)
        }
        None => cors.allow_origin(Any),
    };

    Router::new()
        .route("/", get(app::controller::get_root))
        // uploads
        .route("/uploads", post(uploads::controller::upload_image))
        .route(
            "/uploads/multipart",
            post(uploads::controller::upload_multipart_image),
        )
        // designs
        .route(
            "/designs/generate",
            post(designs::controller::generate_design),
        )
        // layers
        .layer(DefaultBodyLimit::max(envy.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|err: BoxError| async move {
                    tracing::error!("middleware error: {}", err);
                    DefaultApiError::InternalServerError.value()
                }))
                .layer(BufferLayer::new(1024))
                .layer(RateLimitLayer::new(
                    envy.rate_limit_per_sec,
                    Duration::from_secs(1),
                )),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        app::envy::Envy,
        designs::{
            apis::job_service::MockJobService,
            models::{
                generation_config::GenerationConfig,
                job_handle::JobHandle,
                job_result::{JobOutput, JobResult},
            },
        },
        uploads::{apis::media_host::MockMediaHost, models::hosted_image::HostedImage},
    };

    const PNG_1X1: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

    fn app(job_service: MockJobService, media_host: MockMediaHost) -> Router {
        let envy = Envy::for_tests();
        let generation_config = GenerationConfig::from_envy(&envy).unwrap();

        build(AppState {
            envy: Arc::new(envy),
            generation_config: Arc::new(generation_config),
            job_service: Arc::new(job_service),
            media_host: Arc::new(media_host),
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn job_service_with(outcome: fn(&str) -> JobResult) -> MockJobService {
        let mut job_service = MockJobService::new();
        job_service.expect_submit().returning(|request| {
            Ok(JobHandle {
                id: request.variant_seed.to_string(),
                poll_url: format!("https://api.replicate.test/v1/predictions/{}", request.variant_seed),
            })
        });
        job_service
            .expect_poll()
            .returning(move |handle| Ok(outcome(&handle.id)));
        job_service
    }

    #[tokio::test]
    async fn root_is_reachable() {
        let app = app(MockJobService::new(), MockMediaHost::new());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn generate_returns_images_in_seed_order() {
        let job_service = job_service_with(|id| {
            JobResult::Succeeded(JobOutput::UrlList(vec![format!(
                "https://replicate.delivery/{}.png",
                id
            )]))
        });
        let app = app(job_service, MockMediaHost::new());

        let response = app
            .oneshot(post_json(
                "/designs/generate",
                json!({
                    "image": "https://res.cloudinary.com/demo/room.png",
                    "style": "Modern",
                    "roomType": "Living Room"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            read_json(response).await,
            json!({
                "images": [
                    "https://replicate.delivery/111.png",
                    "https://replicate.delivery/222.png",
                    "https://replicate.delivery/333.png"
                ],
                "failures": []
            })
        );
    }

    #[tokio::test]
    async fn generate_reports_partial_failure() {
        let job_service = job_service_with(|id| match id {
            "222" => JobResult::Failed("NSFW content detected".to_string()),
            id => JobResult::Succeeded(JobOutput::SingleUrl(format!("https://replicate.delivery/{}.png", id))),
        });
        let app = app(job_service, MockMediaHost::new());

        let response = app
            .oneshot(post_json(
                "/designs/generate",
                json!({
                    "sourceImageRef": "https://res.cloudinary.com/demo/room.png",
                    "style": "Industrial",
                    "roomType": "Kitchen"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["images"].as_array().unwrap().len(), 2);
        assert_eq!(
            body["failures"],
            json!([{
                "index": 1,
                "seed": 222,
                "kind": "upstream_job_failure",
                "reason": "upstream job failed: NSFW content detected"
            }])
        );
    }

    #[tokio::test]
    async fn generate_with_missing_fields_is_a_client_error() {
        let app = app(MockJobService::new(), MockMediaHost::new());

        let response = app
            .oneshot(post_json(
                "/designs/generate",
                json!({ "image": "https://res.cloudinary.com/demo/room.png" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            read_json(response).await,
            json!({ "error": "Missing fields (style, roomType)." })
        );
    }

    #[tokio::test]
    async fn generate_with_every_variant_failed_is_a_bad_gateway() {
        let job_service = job_service_with(|_| JobResult::Failed("prediction failed".to_string()));
        let app = app(job_service, MockMediaHost::new());

        let response = app
            .oneshot(post_json(
                "/designs/generate",
                json!({
                    "image": "https://res.cloudinary.com/demo/room.png",
                    "style": "Modern",
                    "roomType": "Bedroom"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = read_json(response).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("All 3 variants failed"));
    }

    #[tokio::test]
    async fn malformed_json_is_a_client_error() {
        let app = app(MockJobService::new(), MockMediaHost::new());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/designs/generate")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{ not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(read_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn upload_returns_hosted_url() {
        let mut media_host = MockMediaHost::new();
        media_host.expect_upload().times(1).returning(|image| {
            Ok(HostedImage {
                url: "https://res.cloudinary.com/demo/image/upload/interior-ai/room.png".to_string(),
                public_id: "interior-ai/room".to_string(),
                width: image.image_size.width,
                height: image.image_size.height,
            })
        });
        let app = app(MockJobService::new(), media_host);

        let response = app
            .oneshot(post_json(
                "/uploads",
                json!({ "base64Image": format!("data:image/png;base64,{}", PNG_1X1) }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            read_json(response).await,
            json!({
                "url": "https://res.cloudinary.com/demo/image/upload/interior-ai/room.png",
                "publicId": "interior-ai/room",
                "width": 1,
                "height": 1
            })
        );
    }

    #[tokio::test]
    async fn upload_with_empty_image_is_a_client_error() {
        let app = app(MockJobService::new(), MockMediaHost::new());

        let response = app
            .oneshot(post_json("/uploads", json!({ "base64Image": "" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
