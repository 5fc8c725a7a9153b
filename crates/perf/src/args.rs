//! CLI argument definitions for the perf workloads.
//!
//! Anything left unset falls back to the loaded `testconf.json`.

use clap::Args;
use kafka_testconf::TestConfig;
use std::time::Duration;

/// Arguments for the producer workload.
#[derive(Args, Clone, Debug)]
pub struct ProduceArgs {
    /// Topic to produce to (default: Topic from testconf)
    #[arg(long)]
    pub topic: Option<String>,

    /// Number of messages (default: PerfMsgCount from testconf)
    #[arg(long)]
    pub count: Option<u64>,

    /// Payload size in bytes (default: PerfMsgSize from testconf)
    #[arg(long)]
    pub size: Option<usize>,

    /// Partitions to create the topic with if it does not exist
    #[arg(long, default_value = "3")]
    pub partitions: i32,

    /// Number of in-flight messages awaited together
    #[arg(long, default_value = "1000")]
    pub batch_size: usize,
}

impl ProduceArgs {
    pub fn topic<'a>(&'a self, config: &'a TestConfig) -> &'a str {
        self.topic.as_deref().unwrap_or(&config.topic)
    }

    pub fn count(&self, config: &TestConfig) -> u64 {
        self.count.unwrap_or(config.perf_msg_count)
    }

    pub fn size(&self, config: &TestConfig) -> usize {
        self.size.unwrap_or(config.perf_msg_size)
    }
}

/// Arguments for the consumer workload.
#[derive(Args, Clone, Debug)]
pub struct ConsumeArgs {
    /// Topic to consume from (default: Topic from testconf)
    #[arg(long)]
    pub topic: Option<String>,

    /// Number of messages to consume (default: PerfMsgCount from testconf)
    #[arg(long)]
    pub count: Option<u64>,

    /// Give up after this many seconds without a message
    #[arg(long, default_value = "10")]
    pub idle_timeout_secs: u64,
}

impl ConsumeArgs {
    pub fn topic<'a>(&'a self, config: &'a TestConfig) -> &'a str {
        self.topic.as_deref().unwrap_or(&config.topic)
    }

    pub fn count(&self, config: &TestConfig) -> u64 {
        self.count.unwrap_or(config.perf_msg_count)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}
