// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settle timer: a single re-armable deadline on a caller-supplied clock.

/// A single pending deadline.
///
/// Arming replaces any pending deadline, so at most one settle can be
/// outstanding. Times are milliseconds on a monotonic clock owned by the
/// caller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SettleTimer {
    deadline: Option<u64>,
}

impl SettleTimer {
    /// Creates an idle timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer to fire `delay_ms` after `now`.
    ///
    /// Returns `true` if a pending deadline was replaced.
    pub fn arm(&mut self, now: u64, delay_ms: u64) -> bool {
        self.deadline.replace(now.saturating_add(delay_ms)).is_some()
    }

    /// Cancels any pending deadline. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Returns the pending deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Returns `true` while a deadline is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fires the timer if `now` has reached the deadline.
    ///
    /// Returns `true` exactly once per armed deadline.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SettleTimer;

    #[test]
    fn fires_once_at_deadline() {
        let mut timer = SettleTimer::new();
        assert!(!timer.arm(100, 450));
        assert_eq!(timer.deadline(), Some(550));
        assert!(!timer.poll(549));
        assert!(timer.poll(550));
        assert!(!timer.poll(600));
        assert!(!timer.is_pending());
    }

    #[test]
    fn rearming_replaces_the_deadline() {
        let mut timer = SettleTimer::new();
        timer.arm(0, 450);
        assert!(timer.arm(300, 450));
        assert!(!timer.poll(450));
        assert!(timer.poll(750));
    }

    #[test]
    fn cancel_prevents_firing() {
        let mut timer = SettleTimer::new();
        timer.arm(0, 10);
        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert!(!timer.poll(u64::MAX));
    }

    #[test]
    fn arming_near_the_end_of_time_saturates() {
        let mut timer = SettleTimer::new();
        timer.arm(u64::MAX - 1, 450);
        assert_eq!(timer.deadline(), Some(u64::MAX));
    }
}
