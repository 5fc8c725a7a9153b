//! kafka-testkit
//!
//! Support tooling for test suites that run against a live Kafka cluster.
//!
//! # Crates
//!
//! - `kafka_testconf` - loads `testconf.json`; a missing file means "skip"
//! - `rate_tracker` - prints message/byte throughput about once per second
//! - `kafka_topic_counter` - approximate topic size from watermark offsets
//! - `kafka_perf` - producer and consumer throughput workloads
//!
//! # CLI Usage
//!
//! ```bash
//! # Approximate number of messages in the testconf topic
//! kafka-testkit count
//!
//! # Produce 100k messages of 200 bytes, then read them back
//! kafka-testkit produce --topic perf --count 100000 --size 200
//! kafka-testkit consume --topic perf --count 100000
//! ```

pub mod testing;

pub use kafka_perf as perf;
pub use kafka_testconf as testconf;
pub use kafka_topic_counter as counter;
pub use rate_tracker as rate;

pub use kafka_testconf::{TestConfError, TestConfig};
