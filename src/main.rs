use std::{env, net::SocketAddr, sync::Arc};

#[macro_use]
extern crate lazy_static;

use tracing_subscriber::EnvFilter;

use crate::{
    app::envy::Envy,
    designs::{
        apis::{job_service::JobService, replicate::service::ReplicateClient},
        models::generation_config::GenerationConfig,
    },
    uploads::apis::{cloudinary::service::CloudinaryClient, media_host::MediaHost},
};

mod app;
mod designs;
mod uploads;

#[derive(Clone)]
pub struct AppState {
    pub envy: Arc<Envy>,
    pub generation_config: Arc<GenerationConfig>,
    pub job_service: Arc<dyn JobService>,
    pub media_host: Arc<dyn MediaHost>,
}

#[tokio::main]
async fn main() {
    // tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // environment
    let app_env = env::var("APP_ENV").unwrap_or("development".to_string());
    let _ = dotenvy::from_filename(format!(".env.{}", app_env));
    let envy = match envy::from_env::<Envy>() {
        Ok(config) => config,
        Err(e) => panic!("{:#?}", e),
    };

    let generation_config = match GenerationConfig::from_envy(&envy) {
        Ok(generation_config) => generation_config,
        Err(e) => panic!("invalid generation config: {}", e),
    };

    // clients
    let replicate = match ReplicateClient::new(&envy) {
        Ok(client) => client,
        Err(e) => panic!("failed to build replicate client: {:#?}", e),
    };
    let cloudinary = match CloudinaryClient::new(&envy) {
        Ok(client) => client,
        Err(e) => panic!("failed to build cloudinary client: {:#?}", e),
    };

    tracing::info!(
        seeds = ?generation_config.seeds,
        policy = envy.variant_policy.value(),
        failure_policy = generation_config.failure_policy.value(),
        "generation configured"
    );

    let port = envy.port.to_owned().unwrap_or(3000);
    let state = AppState {
        envy: Arc::new(envy),
        generation_config: Arc::new(generation_config),
        job_service: Arc::new(replicate),
        media_host: Arc::new(cloudinary),
    };

    // app
    let app = app::router::build(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    if let Err(e) = axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!("server error: {}", e);
    }
}
