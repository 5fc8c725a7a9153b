use rdkafka::error::KafkaError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TopicCountError {
    /// Client creation or metadata fetch failed
    #[error("Kafka error: {0}")]
    Kafka(#[from] KafkaError),

    #[error("Unknown topic: {0}")]
    UnknownTopic(String),
}
