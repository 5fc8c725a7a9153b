//! Producer and consumer workloads E2E test
//!
//! Test flow:
//! 1. Create a fresh topic
//! 2. Produce a known number of messages with the producer workload
//! 3. Check the watermark-based count matches
//! 4. Read everything back with the consumer workload

use crate::live_testconf;
use kafka_testkit::counter::count_messages_in_topic;
use kafka_testkit::perf::{ensure_topic, ConsumerWorkload, ProducerWorkload};
use kafka_testkit::testing::unique_topic;
use std::time::Duration;

const MESSAGE_COUNT: u64 = 500;
const MESSAGE_SIZE: usize = 64;

#[tokio::test]
async fn test_produce_count_consume() -> Result<(), Box<dyn std::error::Error>> {
    let Some(mut config) = live_testconf() else {
        return Ok(());
    };

    let topic = unique_topic("testkit-roundtrip");
    // Fresh group so the consumer starts from the earliest offset
    config.group_id = unique_topic("testkit-group");
    tracing::info!("Using topic {topic}, group {}", config.group_id);

    ensure_topic(&config, &topic, 3).await?;
    // Give Kafka a moment to propagate topic metadata
    tokio::time::sleep(Duration::from_millis(500)).await;

    // Step 1: produce
    let produced = ProducerWorkload::new(&config)?
        .with_batch_size(100)
        .run(&topic, MESSAGE_COUNT, MESSAGE_SIZE)
        .await?;
    assert_eq!(produced.messages, MESSAGE_COUNT);
    assert_eq!(produced.bytes, MESSAGE_COUNT * MESSAGE_SIZE as u64);

    // Step 2: count via watermarks
    let count_config = config.clone();
    let count_topic = topic.clone();
    let count =
        tokio::task::spawn_blocking(move || count_messages_in_topic(&count_config, &count_topic))
            .await??;
    assert!(count.is_complete(), "skipped partitions: {:?}", count.skipped);
    assert_eq!(count.partitions, 3);
    assert_eq!(count.total, MESSAGE_COUNT as i64);

    // Step 3: consume everything back
    let consumed = ConsumerWorkload::new(&config)?
        .run(&topic, MESSAGE_COUNT, Duration::from_secs(30))
        .await?;
    assert_eq!(consumed.messages, MESSAGE_COUNT);
    assert_eq!(consumed.bytes, MESSAGE_COUNT * MESSAGE_SIZE as u64);

    Ok(())
}
