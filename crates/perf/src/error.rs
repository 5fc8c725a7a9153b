//! Error types for the perf workloads.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while running a workload.
#[derive(Error, Debug)]
pub enum PerfError {
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    #[error("Topic creation error: {0}")]
    TopicCreation(String),

    #[error("Consumer error: {0}")]
    Consumer(String),

    #[error("No message received for {idle:?} ({received} of {expected} consumed)")]
    Idle {
        received: u64,
        expected: u64,
        idle: Duration,
    },
}
