//! Topic management for the workloads.

use crate::error::PerfError;
use kafka_testconf::TestConfig;
use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::DefaultClientContext;
use rdkafka::error::RDKafkaErrorCode;
use std::time::Duration;
use tracing::info;

/// Create `topic` with `partitions` partitions unless it already exists.
pub async fn ensure_topic(
    config: &TestConfig,
    topic: &str,
    partitions: i32,
) -> Result<(), PerfError> {
    let admin_client: AdminClient<DefaultClientContext> = config.client_config().create()?;

    let new_topic = NewTopic::new(topic, partitions, TopicReplication::Fixed(1));
    let opts = AdminOptions::new().operation_timeout(Some(Duration::from_secs(10)));

    let results = admin_client
        .create_topics(&[new_topic], &opts)
        .await
        .map_err(|e| PerfError::TopicCreation(format!("Failed to create topic: {e}")))?;

    for result in results {
        match result {
            Ok(topic_name) => info!("Topic '{topic_name}' created successfully"),
            Err((topic_name, RDKafkaErrorCode::TopicAlreadyExists)) => {
                info!("Topic '{topic_name}' already exists")
            }
            Err((topic_name, err)) => {
                return Err(PerfError::TopicCreation(format!(
                    "Failed to create topic {topic_name}: {err}"
                )));
            }
        }
    }

    Ok(())
}
