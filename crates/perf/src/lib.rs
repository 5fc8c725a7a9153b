//! Producer and consumer throughput workloads for the Kafka test suite.
//!
//! Both workloads are configured from the loaded `testconf.json`, print a
//! running [`rate_tracker::RateTracker`] status line about once per second,
//! and return a [`WorkloadReport`] when done.
//!
//! # Example
//!
//! ```rust,no_run
//! use kafka_perf::{ensure_topic, ConsumerWorkload, ProducerWorkload};
//! use kafka_testconf::TestConfig;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let Some(config) = TestConfig::load()? else {
//!         return Ok(());
//!     };
//!
//!     ensure_topic(&config, &config.topic, 3).await?;
//!
//!     let produced = ProducerWorkload::new(&config)?
//!         .run(&config.topic, 10_000, 100)
//!         .await?;
//!     println!("{:.0} msgs/s", produced.messages_per_second());
//!
//!     let consumed = ConsumerWorkload::new(&config)?
//!         .run(&config.topic, 10_000, Duration::from_secs(10))
//!         .await?;
//!     println!("{:.0} msgs/s", consumed.messages_per_second());
//!     Ok(())
//! }
//! ```

pub mod args;
pub mod consumer;
pub mod error;
pub mod producer;
pub mod report;
pub mod topic;

pub use args::{ConsumeArgs, ProduceArgs};
pub use consumer::ConsumerWorkload;
pub use error::PerfError;
pub use producer::{ProducerWorkload, DEFAULT_BATCH_SIZE};
pub use report::WorkloadReport;
pub use topic::ensure_topic;

use rdkafka::ClientConfig;

/// Set `key` only if the test config did not already set it.
pub(crate) fn set_default(config: &mut ClientConfig, key: &str, value: &str) {
    if config.get(key).is_none() {
        config.set(key, value);
    }
}
