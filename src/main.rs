use anyhow::Context;
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app;
mod common;
mod config;
mod docs;
mod infrastructure;
mod modules;
mod routes;
mod state;
mod workers;

use config::settings::AppConfig;
use infrastructure::media::{FfmpegTranscoder, Transcoder};
use infrastructure::queue::rabbitmq::RabbitMqService;
use infrastructure::storage::StorageGateway;
use infrastructure::storage::s3::S3ObjectStore;
use modules::processing::pipeline::JobPipeline;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting video processing service...");

    let config = AppConfig::new().context("Missing required environment variable")?;

    let store = Arc::new(S3ObjectStore::new(&config.storage));
    let storage = StorageGateway::new(
        store,
        &config.storage.raw_bucket,
        &config.storage.processed_bucket,
        config.staging.clone(),
    );
    storage
        .ensure_staging_dirs()
        .await
        .context("Failed to create staging directories")?;

    let transcoder: Arc<dyn Transcoder> = Arc::new(FfmpegTranscoder::new(&config.ffmpeg_path));
    let pipeline = JobPipeline::new(storage, transcoder.clone());

    if let Some(url) = &config.amqp_url {
        let queue = RabbitMqService::new(url).await?;
        let queue_name = config.transcode_queue.clone();
        let pipeline = pipeline.clone();
        tokio::spawn(async move {
            if let Err(e) =
                workers::transcoder::start_transcoder_worker(queue, queue_name, pipeline).await
            {
                error!("Transcoder Worker stopped: {}", e);
            }
        });
    }

    let app = app::create_app(AppState::new(pipeline, transcoder));

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
