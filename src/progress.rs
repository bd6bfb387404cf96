//! Progress reporting and cancellation for long-running transfers.
//!
//! This module provides a simple callback mechanism that the transfer
//! engine uses to report progress to callers. The callback's return value
//! doubles as a cancellation signal: returning `false` asks the operation
//! to stop at the next check point.
//!
//! # Example
//!
//! ```
//! use uvtransfer::progress::Progress;
//!
//! let progress = Progress::new(|current, total| {
//!     println!("[{}/{}]", current, total);
//!     true // keep going
//! });
//! assert!(progress.report(0, 10));
//! ```

/// A progress callback invoked during long-running operations.
///
/// The callback receives the number of corners processed so far and the
/// total, and returns whether the operation should continue.
pub struct Progress {
    callback: Box<dyn Fn(usize, usize) -> bool + Send + Sync>,
}

impl Progress {
    /// Create a new progress reporter with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize) -> bool + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Report progress. Returns `false` if the operation should stop.
    #[inline]
    pub fn report(&self, current: usize, total: usize) -> bool {
        (self.callback)(current, total)
    }

    /// Create a no-op reporter that discards updates and never cancels.
    pub fn none() -> Self {
        Self::new(|_, _| true)
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_reports_reach_callback() {
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_in_callback = Arc::clone(&seen);
        let progress = Progress::new(move |current, _total| {
            seen_in_callback.store(current, Ordering::Relaxed);
            true
        });

        assert!(progress.report(3, 10));
        assert_eq!(seen.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_callback_return_signals_cancel() {
        let progress = Progress::new(|current, _| current < 5);
        assert!(progress.report(4, 10));
        assert!(!progress.report(5, 10));
    }

    #[test]
    fn test_none_never_cancels() {
        let progress = Progress::none();
        assert!(progress.report(0, 0));
        assert!(progress.report(100, 10));
    }
}
