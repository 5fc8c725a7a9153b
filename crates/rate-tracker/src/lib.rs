//! Message and byte rate tracking for test workloads.
//!
//! A [`RateTracker`] accumulates message counts and sizes while a workload
//! runs and prints a status line at most once per second. Rates are averaged
//! over the whole window since [`RateTracker::start`] or the last
//! [`RateTracker::reset`], not since the previous print.
//!
//! ```
//! use rate_tracker::RateTracker;
//!
//! let mut rate = RateTracker::start("producer");
//! rate.tick(10, 1000);
//! rate.tick(5, 500);
//! assert_eq!(rate.count(), 15);
//! rate.print("final: ");
//! ```

use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

/// Minimum time between two status lines printed by [`RateTracker::tick`].
pub const PRINT_INTERVAL: Duration = Duration::from_secs(1);

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Accumulates message/byte counts and reports throughput.
///
/// Owned by the loop driving a workload; not meant to be shared.
#[derive(Debug, Clone)]
pub struct RateTracker {
    label: String,
    window_start: Instant,
    last_print: Instant,
    count: u64,
    bytes: u64,
}

impl RateTracker {
    /// Start a new tracker with both timestamps at now and zeroed counters.
    pub fn start(label: impl Into<String>) -> Self {
        let now = Instant::now();
        Self {
            label: label.into(),
            window_start: now,
            last_print: now,
            count: 0,
            bytes: 0,
        }
    }

    /// Restart the window and zero the counters.
    pub fn reset(&mut self) {
        debug!("{}: resetting rate window after {} messages", self.label, self.count);
        self.window_start = Instant::now();
        self.count = 0;
        self.bytes = 0;
    }

    /// Add `count` messages totalling `size` bytes.
    ///
    /// Prints the running status line if at least [`PRINT_INTERVAL`] passed
    /// since the last one. Returns whether a line was printed.
    pub fn tick(&mut self, count: u64, size: u64) -> bool {
        self.count += count;
        self.bytes += size;

        if self.last_print.elapsed() >= PRINT_INTERVAL {
            self.print("");
            self.last_print = Instant::now();
            return true;
        }
        false
    }

    /// Print the accumulated rate, prefixed by `prefix`.
    ///
    /// Does not affect the cadence of [`RateTracker::tick`].
    pub fn print(&self, prefix: &str) {
        println!("{}", self.snapshot().with_prefix(prefix));
    }

    /// Current counters and elapsed window time.
    pub fn snapshot(&self) -> RateSnapshot {
        RateSnapshot {
            label: self.label.clone(),
            count: self.count,
            bytes: self.bytes,
            elapsed: self.window_start.elapsed(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }
}

/// Point-in-time view of a [`RateTracker`].
#[derive(Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    pub label: String,
    pub count: u64,
    pub bytes: u64,
    pub elapsed: Duration,
}

impl RateSnapshot {
    /// Messages per second over the window; 0.0 if no time has elapsed.
    pub fn messages_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.count as f64 / secs
        } else {
            0.0
        }
    }

    /// MB (2^20 bytes) per second over the window; 0.0 if no time has elapsed.
    pub fn megabytes_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.bytes as f64 / secs / BYTES_PER_MB
        } else {
            0.0
        }
    }

    /// Status line with `prefix` inserted before the message count.
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> StatusLine<'a> {
        StatusLine {
            snapshot: self,
            prefix,
        }
    }
}

impl fmt::Display for RateSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_prefix("").fmt(f)
    }
}

/// Formatted status line, e.g.
/// `producer: 15 messages in 1.000000s (15 msgs/s), 1500 bytes (0.001Mb/s)`.
pub struct StatusLine<'a> {
    snapshot: &'a RateSnapshot,
    prefix: &'a str,
}

impl fmt::Display for StatusLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.snapshot;
        write!(
            f,
            "{}: {}{} messages in {:.6}s ({:.0} msgs/s), {} bytes ({:.3}Mb/s)",
            s.label,
            self.prefix,
            s.count,
            s.elapsed.as_secs_f64(),
            s.messages_per_second(),
            s.bytes,
            s.megabytes_per_second()
        )
    }
}
