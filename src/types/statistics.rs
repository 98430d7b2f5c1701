//! Bookkeeping for bulk submission imports

use std::time::{Duration, Instant};

/// Common timing information for long-running jobs
#[derive(Debug, Clone)]
pub struct TimingInfo {
    pub start_time: Instant,
    pub processing_duration: Duration,
}

impl Default for TimingInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingInfo {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            processing_duration: Duration::default(),
        }
    }

    pub fn finish(&mut self) {
        self.processing_duration = self.start_time.elapsed();
    }

    pub fn elapsed(&self) -> Duration {
        if self.processing_duration.is_zero() {
            self.start_time.elapsed()
        } else {
            self.processing_duration
        }
    }
}

/// CSV import statistics
#[derive(Debug, Clone, Default)]
pub struct ImportStats {
    pub rows_read: usize,
    pub rows_imported: usize,
    pub rows_skipped: usize,
    pub batches_written: usize,
    pub timing: TimingInfo,
}

impl ImportStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip_rate(&self) -> f64 {
        if self.rows_read > 0 {
            (self.rows_skipped as f64 / self.rows_read as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Rows imported per second
    pub fn import_rate(&self) -> f64 {
        let secs = self.timing.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.rows_imported as f64 / secs
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Read {} rows, imported {}, skipped {} ({:.2}%) in {} batches, {:.2}s ({:.0} rows/s)",
            self.rows_read,
            self.rows_imported,
            self.rows_skipped,
            self.skip_rate(),
            self.batches_written,
            self.timing.elapsed().as_secs_f64(),
            self.import_rate()
        )
    }
}
