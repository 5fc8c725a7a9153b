//! Kafka integration tests
//!
//! These tests need a running cluster described by `testconf.json` in the
//! package root (or the file named by `$KAFKA_TESTCONF`). Without that file
//! every test prints a skip notice and returns early, so `cargo test` stays
//! green on machines without Kafka. A file that exists but is broken fails the
//! run.

mod topic_count;
mod workload_roundtrip;

use kafka_testkit::TestConfig;

/// Load `testconf.json` for a live-cluster test; `None` means skip.
pub(crate) fn live_testconf() -> Option<TestConfig> {
    tracing_subscriber::fmt()
        .with_env_filter("kafka_testconf=debug,kafka_perf=debug,kafka_topic_counter=debug")
        .with_test_writer()
        .try_init()
        .ok();

    TestConfig::require()
}
