//! Test suite configuration for the Kafka test harness.
//!
//! Tests that need a live cluster read `testconf.json`, which must contain at
//! least `Brokers` and `Topic`:
//!
//! ```json
//! {
//!   "Brokers": "localhost:9092",
//!   "Topic": "test",
//!   "GroupID": "testgroup",
//!   "PerfMsgCount": 100000,
//!   "PerfMsgSize": 100,
//!   "Config": ["api.version.request=true"]
//! }
//! ```
//!
//! A missing file means "skip the test". A file that is present but broken
//! means the environment is unusable, and callers are expected to stop.
//!
//! # Example
//!
//! ```rust,no_run
//! use kafka_testconf::TestConfig;
//!
//! let Some(config) = TestConfig::require() else {
//!     return; // no testconf.json, skip
//! };
//! println!("brokers: {}", config.brokers);
//! ```

pub mod error;

pub use error::TestConfError;

use rdkafka::ClientConfig;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name looked up in the current directory.
pub const DEFAULT_PATH: &str = "testconf.json";

/// Environment variable that overrides [`DEFAULT_PATH`].
pub const PATH_ENV: &str = "KAFKA_TESTCONF";

/// Loaded test configuration.
///
/// Built once at process start and passed by reference to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestConfig {
    /// Bootstrap broker list (comma-separated)
    pub brokers: String,
    /// Topic used by the test workloads
    pub topic: String,
    /// Consumer group for consumer workloads
    pub group_id: String,
    /// Default number of messages for perf workloads
    pub perf_msg_count: u64,
    /// Default payload size for perf workloads
    pub perf_msg_size: usize,
    /// Extra librdkafka properties applied to every client
    pub properties: Vec<(String, String)>,
}

/// On-disk layout, keys as written in `testconf.json`.
///
/// Lower-case spellings of the keys are accepted too.
#[derive(Debug, Deserialize)]
struct RawTestConfig {
    #[serde(rename = "Brokers", alias = "brokers", default)]
    brokers: String,
    #[serde(rename = "Topic", alias = "topic", default)]
    topic: String,
    #[serde(rename = "GroupID", alias = "groupid", alias = "group_id", default = "default_group_id")]
    group_id: String,
    #[serde(rename = "PerfMsgCount", alias = "perfmsgcount", default = "default_perf_msg_count")]
    perf_msg_count: u64,
    #[serde(rename = "PerfMsgSize", alias = "perfmsgsize", default = "default_perf_msg_size")]
    perf_msg_size: usize,
    #[serde(rename = "Config", alias = "config", default)]
    config: Vec<String>,
}

fn default_group_id() -> String {
    "testgroup".to_string()
}

fn default_perf_msg_count() -> u64 {
    2_000_000
}

fn default_perf_msg_size() -> usize {
    100
}

impl TryFrom<RawTestConfig> for TestConfig {
    type Error = TestConfError;

    fn try_from(raw: RawTestConfig) -> Result<Self, Self::Error> {
        if raw.brokers.is_empty() {
            return Err(TestConfError::MissingField("Brokers"));
        }
        if raw.topic.is_empty() {
            return Err(TestConfError::MissingField("Topic"));
        }

        let properties = raw
            .config
            .iter()
            .map(String::as_str)
            .map(parse_property)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TestConfig {
            brokers: raw.brokers,
            topic: raw.topic,
            group_id: raw.group_id,
            perf_msg_count: raw.perf_msg_count,
            perf_msg_size: raw.perf_msg_size,
            properties,
        })
    }
}

/// Message emitted when the config file is absent and tests are skipped.
pub fn not_found_notice(path: &Path) -> String {
    format!("% {} not found - ignoring test", path.display())
}

fn parse_property(entry: &str) -> Result<(String, String), TestConfError> {
    match entry.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(TestConfError::InvalidProperty(entry.to_string())),
    }
}

impl TestConfig {
    /// Path of the config file: `$KAFKA_TESTCONF` or `testconf.json`.
    pub fn default_path() -> PathBuf {
        std::env::var_os(PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PATH))
    }

    /// Load the config from [`TestConfig::default_path`].
    ///
    /// Returns `Ok(None)` if the file does not exist.
    pub fn load() -> Result<Option<Self>, TestConfError> {
        Self::load_from(Self::default_path())
    }

    /// Load the config from an explicit path.
    ///
    /// Returns `Ok(None)` if the file does not exist, and an error if it exists
    /// but is malformed or lacks `Brokers`/`Topic`.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Option<Self>, TestConfError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("{}", not_found_notice(path));
                return Ok(None);
            }
            Err(source) => {
                return Err(TestConfError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = Self::from_json(&content)?;
        debug!(
            "Loaded test config from {}: brokers={}, topic={}",
            path.display(),
            config.brokers,
            config.topic
        );
        Ok(Some(config))
    }

    /// Parse a config from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, TestConfError> {
        let raw: RawTestConfig = serde_json::from_str(json)?;
        raw.try_into()
    }

    /// Load from the default path, panicking if the file is present but unusable.
    ///
    /// This is the entry point for test harnesses: `None` means skip, and a
    /// broken environment stops the run with a descriptive message.
    pub fn require() -> Option<Self> {
        Self::require_from(Self::default_path())
    }

    /// Like [`TestConfig::require`] with an explicit path.
    ///
    /// A missing file is also reported on stderr, so skipped tests say why.
    pub fn require_from<P: AsRef<Path>>(path: P) -> Option<Self> {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(Some(config)) => Some(config),
            Ok(None) => {
                eprintln!("{}", not_found_notice(path));
                None
            }
            Err(e) => panic!("Unusable test configuration: {e}"),
        }
    }

    /// Client config with `bootstrap.servers` and every extra property set.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new();
        config.set("bootstrap.servers", &self.brokers);
        for (key, value) in &self.properties {
            config.set(key, value);
        }
        config
    }
}
