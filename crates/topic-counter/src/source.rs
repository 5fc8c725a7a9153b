//! Metadata and watermark lookups the counter needs from a Kafka client.

use rdkafka::consumer::{BaseConsumer, Consumer, ConsumerContext};
use rdkafka::error::{KafkaError, KafkaResult, RDKafkaErrorCode};
use std::time::Duration;

/// Read-only view of a cluster: which partitions a topic has and where their
/// logs start and end.
pub trait WatermarkSource {
    /// Partition ids of `topic`, or `None` if the cluster does not know it.
    fn partitions(&self, topic: &str, timeout: Duration) -> KafkaResult<Option<Vec<i32>>>;

    /// `(low, high)` watermark offsets of one partition.
    fn watermarks(
        &self,
        topic: &str,
        partition: i32,
        timeout: Duration,
    ) -> KafkaResult<(i64, i64)>;
}

impl<C> WatermarkSource for BaseConsumer<C>
where
    C: ConsumerContext + 'static,
{
    fn partitions(&self, topic: &str, timeout: Duration) -> KafkaResult<Option<Vec<i32>>> {
        let metadata = self.fetch_metadata(Some(topic), timeout)?;

        let Some(topic_metadata) = metadata.topics().iter().find(|t| t.name() == topic) else {
            return Ok(None);
        };

        // Brokers report a missing topic as an entry carrying an error code
        if let Some(err) = topic_metadata.error() {
            return match RDKafkaErrorCode::from(err) {
                RDKafkaErrorCode::UnknownTopicOrPartition | RDKafkaErrorCode::UnknownTopic => {
                    Ok(None)
                }
                code => Err(KafkaError::MetadataFetch(code)),
            };
        }

        Ok(Some(
            topic_metadata.partitions().iter().map(|p| p.id()).collect(),
        ))
    }

    fn watermarks(
        &self,
        topic: &str,
        partition: i32,
        timeout: Duration,
    ) -> KafkaResult<(i64, i64)> {
        self.fetch_watermarks(topic, partition, timeout)
    }
}
