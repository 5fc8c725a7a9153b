//! Consumer throughput workload.

use crate::error::PerfError;
use crate::report::WorkloadReport;
use crate::set_default;
use kafka_testconf::TestConfig;
use rate_tracker::RateTracker;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::Message;
use std::time::{Duration, Instant};
use tracing::info;

/// Reads messages from a topic with a fresh subscription in the configured
/// consumer group.
pub struct ConsumerWorkload {
    consumer: StreamConsumer,
}

impl ConsumerWorkload {
    pub fn new(config: &TestConfig) -> Result<Self, PerfError> {
        let mut client_config = config.client_config();
        set_default(&mut client_config, "group.id", &config.group_id);
        set_default(&mut client_config, "auto.offset.reset", "earliest");
        set_default(&mut client_config, "session.timeout.ms", "6000");
        set_default(&mut client_config, "enable.partition.eof", "false");

        let consumer: StreamConsumer = client_config
            .create()
            .map_err(|e| PerfError::Consumer(format!("Failed to create consumer: {e}")))?;

        Ok(Self { consumer })
    }

    /// Consume `count` messages from `topic`.
    ///
    /// The rate window starts at the first message so that group join time is
    /// not counted. Fails with [`PerfError::Idle`] if the topic goes quiet for
    /// `idle_timeout` before `count` messages arrived.
    pub async fn run(
        &self,
        topic: &str,
        count: u64,
        idle_timeout: Duration,
    ) -> Result<WorkloadReport, PerfError> {
        self.consumer
            .subscribe(&[topic])
            .map_err(|e| PerfError::Consumer(format!("Failed to subscribe to topic: {e}")))?;

        info!("Consuming {count} messages from '{topic}'");

        let mut rate = RateTracker::start(format!("consumer {topic}"));
        let mut start = Instant::now();
        let result = loop {
            if rate.count() >= count {
                break Ok(());
            }
            match tokio::time::timeout(idle_timeout, self.consumer.recv()).await {
                Ok(Ok(msg)) => {
                    if rate.count() == 0 {
                        rate.reset();
                        start = Instant::now();
                    }
                    rate.tick(1, msg.payload_len() as u64);
                }
                Ok(Err(e)) => {
                    break Err(PerfError::Consumer(format!("Error receiving message: {e}")));
                }
                Err(_) => {
                    break Err(PerfError::Idle {
                        received: rate.count(),
                        expected: count,
                        idle: idle_timeout,
                    });
                }
            }
        };

        self.consumer.unsubscribe();
        result?;

        rate.print("done: ");

        Ok(WorkloadReport {
            messages: rate.count(),
            bytes: rate.bytes(),
            duration: start.elapsed(),
        })
    }
}
