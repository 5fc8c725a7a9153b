//! Approximate message counts for Kafka topics.
//!
//! The count of a topic is the sum over its partitions of
//! `high watermark - low watermark`. This is cheap, needs no consumer group,
//! and is exact for plain append-only topics.
//!
//! **It is wrong for compacted topics**: records removed by compaction still
//! sit between the watermarks and are counted.
//!
//! Partitions whose watermark query fails are left out of the total rather
//! than failing the whole call; they are logged and listed in
//! [`TopicMessageCount::skipped`].

pub mod error;
pub mod source;

pub use error::TopicCountError;
pub use source::WatermarkSource;

use kafka_testconf::TestConfig;
use rdkafka::consumer::BaseConsumer;
use rdkafka::error::KafkaError;
use std::time::Duration;
use tracing::{debug, warn};

/// Timeout for each metadata and watermark request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Result of [`count_messages`].
#[derive(Debug, Clone, Default)]
pub struct TopicMessageCount {
    /// Sum of `high - low` over the partitions that answered.
    pub total: i64,
    /// Number of partitions included in `total`.
    pub partitions: usize,
    /// Partitions whose watermark query failed.
    pub skipped: Vec<SkippedPartition>,
}

impl TopicMessageCount {
    /// True if every partition of the topic contributed to the total.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// A partition left out of a count, with the reason.
#[derive(Debug, Clone)]
pub struct SkippedPartition {
    pub partition: i32,
    pub error: KafkaError,
}

/// Count the messages available in all partitions of `topic`.
///
/// Fails if the topic is unknown or the metadata lookup fails. Watermark
/// failures on individual partitions only shrink the estimate.
pub fn count_messages<S>(
    source: &S,
    topic: &str,
    timeout: Duration,
) -> Result<TopicMessageCount, TopicCountError>
where
    S: WatermarkSource + ?Sized,
{
    let partitions = source
        .partitions(topic, timeout)?
        .ok_or_else(|| TopicCountError::UnknownTopic(topic.to_string()))?;

    let count = partitions
        .into_iter()
        .fold(TopicMessageCount::default(), |mut acc, partition| {
            match source.watermarks(topic, partition, timeout) {
                Ok((low, high)) => {
                    debug!("{topic} [{partition}]: low={low}, high={high}");
                    acc.total += high - low;
                    acc.partitions += 1;
                }
                Err(error) => {
                    warn!("Skipping {topic} [{partition}] in message count: {error}");
                    acc.skipped.push(SkippedPartition { partition, error });
                }
            }
            acc
        });

    Ok(count)
}

/// Count the messages in `topic` using a throwaway consumer built from `config`.
///
/// The consumer is dropped, closing its broker connections, before this returns.
pub fn count_messages_in_topic(
    config: &TestConfig,
    topic: &str,
) -> Result<TopicMessageCount, TopicCountError> {
    let consumer: BaseConsumer = config.client_config().create()?;
    count_messages(&consumer, topic, DEFAULT_TIMEOUT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdkafka::error::{KafkaResult, RDKafkaErrorCode};
    use rdkafka::mocking::MockCluster;
    use rdkafka::producer::DefaultProducerContext;
    use std::collections::BTreeMap;

    /// In-memory cluster with a single topic.
    struct FakeCluster {
        topic: &'static str,
        partitions: BTreeMap<i32, KafkaResult<(i64, i64)>>,
        metadata_error: Option<KafkaError>,
    }

    impl FakeCluster {
        fn new(topic: &'static str) -> Self {
            Self {
                topic,
                partitions: BTreeMap::new(),
                metadata_error: None,
            }
        }

        fn partition(mut self, id: i32, low: i64, high: i64) -> Self {
            self.partitions.insert(id, Ok((low, high)));
            self
        }

        fn failing_partition(mut self, id: i32) -> Self {
            self.partitions.insert(
                id,
                Err(KafkaError::MetadataFetch(RDKafkaErrorCode::RequestTimedOut)),
            );
            self
        }
    }

    impl WatermarkSource for FakeCluster {
        fn partitions(&self, topic: &str, _timeout: Duration) -> KafkaResult<Option<Vec<i32>>> {
            if let Some(err) = &self.metadata_error {
                return Err(err.clone());
            }
            if topic != self.topic {
                return Ok(None);
            }
            Ok(Some(self.partitions.keys().copied().collect()))
        }

        fn watermarks(
            &self,
            _topic: &str,
            partition: i32,
            _timeout: Duration,
        ) -> KafkaResult<(i64, i64)> {
            self.partitions[&partition].clone()
        }
    }

    #[test]
    fn test_sums_watermark_deltas() {
        let cluster = FakeCluster::new("orders").partition(0, 0, 10).partition(1, 5, 5);

        let count = count_messages(&cluster, "orders", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(count.total, 10);
        assert_eq!(count.partitions, 2);
        assert!(count.is_complete());
    }

    #[test]
    fn test_unknown_topic() {
        let cluster = FakeCluster::new("orders").partition(0, 0, 10);

        let err = count_messages(&cluster, "missing", DEFAULT_TIMEOUT).unwrap_err();
        assert!(matches!(err, TopicCountError::UnknownTopic(t) if t == "missing"));
    }

    #[test]
    fn test_failed_partition_is_skipped() {
        let cluster = FakeCluster::new("orders")
            .partition(0, 100, 142)
            .failing_partition(1);

        let count = count_messages(&cluster, "orders", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(count.total, 42);
        assert_eq!(count.partitions, 1);
        assert_eq!(count.skipped.len(), 1);
        assert_eq!(count.skipped[0].partition, 1);
        assert!(!count.is_complete());
    }

    #[test]
    fn test_metadata_error_is_propagated() {
        let mut cluster = FakeCluster::new("orders").partition(0, 0, 10);
        cluster.metadata_error = Some(KafkaError::MetadataFetch(
            RDKafkaErrorCode::BrokerTransportFailure,
        ));

        let err = count_messages(&cluster, "orders", DEFAULT_TIMEOUT).unwrap_err();
        assert!(matches!(err, TopicCountError::Kafka(_)));
    }

    #[test]
    fn test_topic_without_partitions() {
        let cluster = FakeCluster::new("empty");

        let count = count_messages(&cluster, "empty", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(count.total, 0);
        assert_eq!(count.partitions, 0);
    }

    fn mock_config(cluster: &MockCluster<'static, DefaultProducerContext>) -> TestConfig {
        TestConfig {
            brokers: cluster.bootstrap_servers(),
            topic: "orders".to_string(),
            group_id: "testgroup".to_string(),
            perf_msg_count: 100,
            perf_msg_size: 10,
            properties: Vec::new(),
        }
    }

    #[test]
    fn test_count_known_topic_on_mock_cluster() {
        let cluster = MockCluster::new(1).expect("failed to create mock brokers");
        cluster.create_topic("orders", 2, 1).unwrap();
        let config = mock_config(&cluster);

        let count = count_messages_in_topic(&config, "orders").unwrap();
        assert_eq!(count.total, 0);
        assert_eq!(count.partitions, 2);
        assert!(count.is_complete());
    }

    #[test]
    fn test_count_absent_topic_on_mock_cluster() {
        let cluster = MockCluster::new(1).expect("failed to create mock brokers");
        cluster.create_topic("orders", 2, 1).unwrap();
        let config = mock_config(&cluster);

        let err = count_messages_in_topic(&config, "no-such-topic").unwrap_err();
        assert!(
            matches!(err, TopicCountError::UnknownTopic(ref t) if t == "no-such-topic"),
            "expected unknown topic error, got {err:?}"
        );
    }

    #[test]
    fn test_client_creation_failure_is_propagated() {
        let cluster = MockCluster::new(1).expect("failed to create mock brokers");
        let mut config = mock_config(&cluster);
        config.properties = vec![("no.such.property".to_string(), "1".to_string())];

        let err = count_messages_in_topic(&config, "orders").unwrap_err();
        assert!(
            matches!(err, TopicCountError::Kafka(KafkaError::ClientConfig(..))),
            "expected client config error, got {err:?}"
        );
    }
}
