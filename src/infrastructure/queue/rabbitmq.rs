use anyhow::{Result, anyhow};
use lapin::{
    Connection, ConnectionProperties, Consumer, options::*, types::FieldTable,
};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct RabbitMqService {
    conn: Arc<Connection>,
}

impl RabbitMqService {
    pub async fn new(url: &str) -> Result<Self> {
        info!("Connecting to RabbitMQ");
        let conn = Connection::connect(url, ConnectionProperties::default())
            .await
            .map_err(|e| anyhow!("Failed to connect to RabbitMQ: {}", e))?;

        info!("✅ Connected to RabbitMQ");
        Ok(Self {
            conn: Arc::new(conn),
        })
    }

    /// Declares `queue` as durable and starts consuming it on a dedicated
    /// channel, one unacked delivery at a time.
    pub async fn consume(&self, queue: &str, consumer_tag: &str) -> Result<Consumer> {
        let channel = self
            .conn
            .create_channel()
            .await
            .map_err(|e| anyhow!("Failed to create channel: {}", e))?;

        channel
            .basic_qos(1, BasicQosOptions::default())
            .await
            .map_err(|e| anyhow!("Failed to set prefetch: {}", e))?;

        channel
            .queue_declare(
                queue,
                QueueDeclareOptions {
                    durable: true,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| anyhow!("Failed to declare queue: {}", e))?;

        channel
            .basic_consume(
                queue,
                consumer_tag,
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(|e| anyhow!("Failed to create consumer: {}", e))
    }
}
