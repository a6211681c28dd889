use core::time::Duration;

/// Decides how long an idle or failing worker waits before polling again.
pub trait RetryPolicy: Send + Sync {
    /// Delay before the next poll. `attempt` counts consecutive empty or
    /// failed polls, starting at 1.
    fn delay(&self, attempt: u32) -> Duration;
}

/// The same delay for every attempt.
///
/// Intervals below [`FixedBackoff::MIN_INTERVAL`] are raised to it, so an
/// idle worker never polls in a tight loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBackoff {
    pub interval: Duration,
}

impl FixedBackoff {
    pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedBackoff {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

impl RetryPolicy for FixedBackoff {
    fn delay(&self, _attempt: u32) -> Duration {
        self.interval.max(Self::MIN_INTERVAL)
    }
}
