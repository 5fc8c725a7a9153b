//! Producer throughput workload.

use crate::error::PerfError;
use crate::report::WorkloadReport;
use crate::set_default;
use futures::future::join_all;
use kafka_testconf::TestConfig;
use rate_tracker::RateTracker;
use rdkafka::producer::{FutureProducer, FutureRecord};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default number of messages awaited together.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Produces fixed-size messages as fast as the cluster acknowledges them.
pub struct ProducerWorkload {
    producer: FutureProducer,
    batch_size: usize,
}

impl ProducerWorkload {
    /// Create a producer from the test config.
    ///
    /// Properties from the config's `Config` list take precedence over the
    /// workload's own tuning defaults.
    pub fn new(config: &TestConfig) -> Result<Self, PerfError> {
        let mut client_config = config.client_config();
        set_default(&mut client_config, "message.timeout.ms", "30000");
        set_default(&mut client_config, "queue.buffering.max.messages", "100000");
        set_default(&mut client_config, "queue.buffering.max.kbytes", "1048576");
        set_default(&mut client_config, "linger.ms", "5");

        let producer: FutureProducer = client_config.create()?;

        Ok(Self {
            producer,
            batch_size: DEFAULT_BATCH_SIZE,
        })
    }

    /// Set the number of messages awaited together.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Produce `count` messages of `size` bytes to `topic`.
    ///
    /// Stops at the first delivery failure.
    pub async fn run(
        &self,
        topic: &str,
        count: u64,
        size: usize,
    ) -> Result<WorkloadReport, PerfError> {
        let payload: Vec<u8> = (0..size).map(|i| (i % 256) as u8).collect();
        let mut rate = RateTracker::start(format!("producer {topic}"));
        let start = Instant::now();

        info!(
            "Producing {} messages of {} bytes to '{}' (batch size: {})",
            count, size, topic, self.batch_size
        );

        let mut remaining = count;
        while remaining > 0 {
            let batch = std::cmp::min(remaining, self.batch_size as u64);
            let deliveries = (0..batch).map(|_| {
                let record = FutureRecord::<(), _>::to(topic).payload(&payload);
                self.producer.send(record, DELIVERY_TIMEOUT)
            });

            for delivery in join_all(deliveries).await {
                delivery.map_err(|(err, _)| PerfError::Kafka(err))?;
            }

            rate.tick(batch, batch * size as u64);
            remaining -= batch;
            debug!("Batch delivered: {batch} messages, {remaining} remaining");
        }

        rate.print("done: ");

        Ok(WorkloadReport {
            messages: rate.count(),
            bytes: rate.bytes(),
            duration: start.elapsed(),
        })
    }
}
