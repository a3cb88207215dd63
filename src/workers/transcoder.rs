use crate::infrastructure::queue::rabbitmq::RabbitMqService;
use crate::modules::processing::pipeline::{JobPipeline, Outcome};
use crate::modules::processing::service::ProcessingService;
use futures_util::StreamExt;
use lapin::options::BasicAckOptions;
use tracing::{error, info, warn};

pub async fn start_transcoder_worker(
    queue: RabbitMqService,
    queue_name: String,
    pipeline: JobPipeline,
) -> anyhow::Result<()> {
    info!("🎥 Starting Transcoder Worker...");

    let mut consumer = queue.consume(&queue_name, "transcoder_worker").await?;

    info!("🎥 Transcoder Worker listening on '{}'", queue_name);

    // Sequential on purpose: one ffmpeg at a time.
    while let Some(delivery) = consumer.next().await {
        let delivery = match delivery {
            Ok(delivery) => delivery,
            Err(e) => {
                error!("Consumer error: {}", e);
                continue;
            }
        };

        info!("📦 Received transcoding job");
        let outcome = handle_payload(&pipeline, &delivery.data).await;
        match &outcome {
            Outcome::Success { output_key } => {
                info!("✅ Job completed successfully: {}", output_key)
            }
            Outcome::InvalidInput { reason } => warn!("Dropping invalid job: {}", reason),
            failed => error!("❌ Failed to process job: {:?}", failed),
        }

        if let Err(e) = delivery.ack(BasicAckOptions::default()).await {
            error!("Failed to ack message: {}", e);
        }
    }

    warn!("Transcoder Worker consumer stream ended");
    Ok(())
}

async fn handle_payload(pipeline: &JobPipeline, payload: &[u8]) -> Outcome {
    let data = match std::str::from_utf8(payload) {
        Ok(data) => data,
        Err(e) => {
            return Outcome::InvalidInput {
                reason: format!("payload is not UTF-8: {}", e),
            };
        }
    };

    match ProcessingService::decode_event(data) {
        Ok(input_key) => pipeline.execute(&input_key).await,
        Err(e) => Outcome::InvalidInput {
            reason: e.to_string(),
        },
    }
}
