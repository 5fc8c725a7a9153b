//! Topic message counter against a live cluster.

use crate::live_testconf;
use kafka_testkit::counter::{count_messages_in_topic, TopicCountError};
use kafka_testkit::testing::unique_topic;

#[test]
fn test_count_unknown_topic() {
    let Some(config) = live_testconf() else {
        return;
    };

    let topic = unique_topic("testkit-missing");
    let err = count_messages_in_topic(&config, &topic).unwrap_err();
    assert!(
        matches!(err, TopicCountError::UnknownTopic(ref t) if *t == topic),
        "expected unknown topic error, got {err:?}"
    );
}

#[test]
fn test_count_configured_topic() {
    let Some(config) = live_testconf() else {
        return;
    };

    match count_messages_in_topic(&config, &config.topic) {
        Ok(count) => {
            assert!(count.partitions > 0, "topic {} has no partitions", config.topic);
            assert!(count.is_complete(), "skipped partitions: {:?}", count.skipped);
            assert!(count.total >= 0);
        }
        Err(TopicCountError::UnknownTopic(_)) => {
            tracing::info!("Configured topic {} does not exist yet", config.topic);
        }
        Err(e) => panic!("Failed to count messages in {}: {e}", config.topic),
    }
}
