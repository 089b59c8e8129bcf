//! Failure reporting for periodic loops.

use alloc::{format, string::String, vec::Vec};
use core::fmt;

use log::warn;

/// Logs loop failures without repeating the same message every period.
///
/// A failure is logged when it first appears. Repeats of any failure seen since the last
/// clean period are suppressed, so a failure that recovers and comes back is logged again.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct FailureLog {
    seen: Vec<String>,
    failed: bool,
}

impl FailureLog {
    /// Creates a log that has seen no failures.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            seen: Vec::new(),
            failed: false,
        }
    }

    /// Marks the start of a loop period.
    pub const fn begin_period(&mut self) {
        self.failed = false;
    }

    /// Records a failure, returning `true` if it was logged.
    pub fn report(&mut self, context: &str, error: impl fmt::Display) -> bool {
        self.failed = true;
        let message = format!("{context}: {error}");
        if self.seen.contains(&message) {
            return false;
        }

        warn!("{message}");
        self.seen.push(message);
        true
    }

    /// Marks the end of a loop period. A clean period re-arms every failure.
    pub fn end_period(&mut self) {
        if !self.failed {
            self.seen.clear();
        }
    }

    /// Forgets every failure seen so far.
    pub fn clear(&mut self) {
        self.seen.clear();
        self.failed = false;
    }
}
