//! Single-slot deferred action driven by an explicit clock.

use std::time::{Duration, Instant};

/// At most one pending value that becomes due at a given instant.
///
/// Scheduling replaces whatever was pending. Nothing fires on its own: the
/// owner polls with the current time.
#[derive(Debug, Clone)]
pub struct Deferred<T> {
    pending: Option<(Instant, T)>,
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deferred<T> {
    /// An empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Make `value` due at `due`, dropping any earlier pending value.
    pub fn schedule(&mut self, due: Instant, value: T) {
        self.pending = Some((due, value));
    }

    /// Drop the pending value, returning it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    /// Whether something is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due.
    #[must_use]
    pub fn due(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(due, _)| *due)
    }

    /// Time left until the pending value is due; zero when overdue.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.due().map(|due| due.saturating_duration_since(now))
    }

    /// Take the pending value if it is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((due, _)) if *due <= now => self.cancel(),
            _ => None,
        }
    }
}
