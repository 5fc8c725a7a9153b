//! Results of a workload run.

use std::time::Duration;

/// Totals from a producer or consumer workload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkloadReport {
    /// Messages produced or consumed.
    pub messages: u64,
    /// Payload bytes produced or consumed.
    pub bytes: u64,
    /// Time from the first message to the last.
    pub duration: Duration,
}

impl WorkloadReport {
    /// Calculate messages per second.
    pub fn messages_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.messages as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Calculate bytes per second.
    pub fn bytes_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.bytes as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }
}
