//! Search input debouncing.

use std::time::Duration;

use tokio::time::Instant;

/// Default quiet period before a search runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(160);

#[derive(Debug, Clone)]
struct Pending<K> {
    key: K,
    value: String,
    deadline: Instant,
}

/// Holds at most one pending search per input field.
///
/// Scheduling a new value for a field replaces whatever was pending for it
/// and restarts the quiet period, so only the latest input is evaluated.
/// The debouncer owns no timers itself: the caller sleeps until
/// [`Debouncer::next_deadline`] and then calls [`Debouncer::take_due`].
#[derive(Debug, Clone)]
pub struct Debouncer<K> {
    delay: Duration,
    pending: Vec<Pending<K>>,
}

impl<K: Copy + Eq> Debouncer<K> {
    /// Create a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Vec::new(),
        }
    }

    /// The quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `value` for `key`, cancelling any earlier pending value.
    pub fn schedule(&mut self, key: K, value: impl Into<String>, now: Instant) {
        self.cancel(key);
        self.pending.push(Pending {
            key,
            value: value.into(),
            deadline: now + self.delay,
        });
    }

    /// Drop the pending value for `key`, if any.
    pub fn cancel(&mut self, key: K) {
        self.pending.retain(|p| p.key != key);
    }

    /// Whether a value is pending for `key`.
    pub fn is_pending(&self, key: K) -> bool {
        self.pending.iter().any(|p| p.key == key)
    }

    /// Earliest deadline among pending values.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.deadline).min()
    }

    /// Remove and return every value whose deadline has passed, earliest
    /// first.
    pub fn take_due(&mut self, now: Instant) -> Vec<(K, String)> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.deadline <= now);
        self.pending = rest;

        due.sort_by_key(|p| p.deadline);
        due.into_iter().map(|p| (p.key, p.value)).collect()
    }
}

impl<K: Copy + Eq> Default for Debouncer<K> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
