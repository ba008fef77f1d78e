//! Progress logging for long-running record loops.
//!
//! The split drain loop is strictly single-threaded, so the logger keeps a
//! plain counter and logs whenever the count crosses an interval boundary.

use log::info;

/// Logs progress at regular count intervals.
///
/// # Example
/// ```
/// use bamux_lib::progress::ProgressLogger;
///
/// let mut progress = ProgressLogger::new("Processed records").with_interval(100);
///
/// for _ in 0..250 {
///     progress.record(1); // Logs at 100, 200
/// }
/// progress.finish(); // Logs "Processed records 250 (complete)"
/// ```
pub struct ProgressLogger {
    /// Message prefix for log output.
    message: String,
    /// Progress is logged when the count crosses multiples of this.
    interval: u64,
    /// Items counted so far.
    count: u64,
}

impl ProgressLogger {
    /// Create a new progress logger with a default interval of 1,000,000.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), interval: 1_000_000, count: 0 }
    }

    /// Set the logging interval.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval;
        self
    }

    /// Add to the count and log each interval boundary crossed.
    pub fn record(&mut self, additional: u64) {
        let prev = self.count;
        self.count += additional;

        for i in (prev / self.interval + 1)..=(self.count / self.interval) {
            info!("{} {}", self.message, i * self.interval);
        }
    }

    /// Log the final count unless it landed exactly on an interval boundary
    /// (in which case `record` already logged it).
    pub fn finish(&self) {
        if self.count > 0 && self.count % self.interval != 0 {
            info!("{} {} (complete)", self.message, self.count);
        }
    }

    /// The current count.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }
}
