//! Dispatch metrics for observability
//!
//! Counters describing how entries flowed through a dispatcher: how many were
//! routed, how many matched no logger, and how many hand-offs failed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for dispatcher observability
///
/// # Example
///
/// ```
/// use log_dispatch::DispatchMetrics;
///
/// let metrics = DispatchMetrics::new();
///
/// metrics.record_dispatched();
/// metrics.record_delivery();
///
/// assert_eq!(metrics.entries_dispatched(), 1);
/// assert_eq!(metrics.deliveries(), 1);
/// ```
#[derive(Debug)]
pub struct DispatchMetrics {
    /// Entries routed through the dispatcher
    entries_dispatched: AtomicU64,

    /// Entries that matched no registered logger
    entries_unmatched: AtomicU64,

    /// Successful hand-offs to a logger
    deliveries: AtomicU64,

    /// Hand-offs that failed, including failed lazy instantiation
    delivery_failures: AtomicU64,

    /// Loggers built on first use
    loggers_instantiated: AtomicU64,
}

impl DispatchMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            entries_dispatched: AtomicU64::new(0),
            entries_unmatched: AtomicU64::new(0),
            deliveries: AtomicU64::new(0),
            delivery_failures: AtomicU64::new(0),
            loggers_instantiated: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn entries_dispatched(&self) -> u64 {
        self.entries_dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn entries_unmatched(&self) -> u64 {
        self.entries_unmatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn deliveries(&self) -> u64 {
        self.deliveries.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn delivery_failures(&self) -> u64 {
        self.delivery_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn loggers_instantiated(&self) -> u64 {
        self.loggers_instantiated.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.entries_dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_unmatched(&self) -> u64 {
        self.entries_unmatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivery(&self) -> u64 {
        self.deliveries.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failure(&self) -> u64 {
        self.delivery_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_instantiated(&self) -> u64 {
        self.loggers_instantiated.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed hand-offs as a percentage of all hand-off attempts (0.0 - 100.0)
    pub fn failure_rate(&self) -> f64 {
        let failed = self.delivery_failures() as f64;
        let total = self.deliveries() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.entries_dispatched.store(0, Ordering::Relaxed);
        self.entries_unmatched.store(0, Ordering::Relaxed);
        self.deliveries.store(0, Ordering::Relaxed);
        self.delivery_failures.store(0, Ordering::Relaxed);
        self.loggers_instantiated.store(0, Ordering::Relaxed);
    }
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DispatchMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            entries_dispatched: AtomicU64::new(self.entries_dispatched()),
            entries_unmatched: AtomicU64::new(self.entries_unmatched()),
            deliveries: AtomicU64::new(self.deliveries()),
            delivery_failures: AtomicU64::new(self.delivery_failures()),
            loggers_instantiated: AtomicU64::new(self.loggers_instantiated()),
        }
    }
}
