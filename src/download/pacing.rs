//! Randomized pauses between consecutive requests.
//!
//! A [`Pacing`] draws a uniformly random delay from `[min, max)` before each
//! request after the first, so a batch never hammers the remote server.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use toolbelt::download::Pacing;
//!
//! let pacing = Pacing::new(Duration::from_millis(10), Duration::from_millis(20));
//! let delay = pacing.next_delay();
//! assert!(delay >= Duration::from_millis(10) && delay < Duration::from_millis(20));
//! ```

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use super::constants::{MAX_DELAY, MIN_DELAY};

/// Random delay policy applied between downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    min: Duration,
    max: Duration,
}

impl Default for Pacing {
    /// Three to eight seconds.
    fn default() -> Self {
        Self::new(MIN_DELAY, MAX_DELAY)
    }
}

impl Pacing {
    /// Creates a pacing policy drawing from `[min, max)`.
    ///
    /// Bounds given in the wrong order are swapped.
    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        if max < min {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    /// Creates a pacing policy that never pauses.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            min: Duration::ZERO,
            max: Duration::ZERO,
        }
    }

    /// Returns true if no pause is ever taken.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.max.is_zero()
    }

    /// Lower bound of the delay.
    #[must_use]
    pub fn min(&self) -> Duration {
        self.min
    }

    /// Upper bound of the delay (exclusive unless equal to `min`).
    #[must_use]
    pub fn max(&self) -> Duration {
        self.max
    }

    /// Draws the next delay.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn next_delay(&self) -> Duration {
        let min_ms = self.min.as_millis() as u64;
        let max_ms = self.max.as_millis() as u64;
        if min_ms >= max_ms {
            return self.min;
        }
        let mut rng = rand::thread_rng();
        Duration::from_millis(rng.gen_range(min_ms..max_ms))
    }

    /// Sleeps for a freshly drawn delay before fetching `next_url`.
    pub async fn pause(&self, next_url: &str) {
        if self.is_disabled() {
            debug!(next_url, "pacing disabled");
            return;
        }
        let delay = self.next_delay();
        info!(next_url, ?delay, "pausing before next request");
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds_are_three_to_eight_seconds() {
        let pacing = Pacing::default();
        assert_eq!(pacing.min(), Duration::from_secs(3));
        assert_eq!(pacing.max(), Duration::from_secs(8));
    }

    #[test]
    fn test_next_delay_stays_within_bounds() {
        let pacing = Pacing::default();
        for _ in 0..200 {
            let delay = pacing.next_delay();
            assert!(delay >= Duration::from_secs(3), "too short: {delay:?}");
            assert!(delay < Duration::from_secs(8), "too long: {delay:?}");
        }
    }

    #[test]
    fn test_new_swaps_reversed_bounds() {
        let pacing = Pacing::new(Duration::from_secs(5), Duration::from_secs(1));
        assert_eq!(pacing.min(), Duration::from_secs(1));
        assert_eq!(pacing.max(), Duration::from_secs(5));
    }

    #[test]
    fn test_equal_bounds_give_fixed_delay() {
        let pacing = Pacing::new(Duration::from_millis(40), Duration::from_millis(40));
        assert_eq!(pacing.next_delay(), Duration::from_millis(40));
    }

    #[test]
    fn test_disabled_never_waits() {
        let pacing = Pacing::disabled();
        assert!(pacing.is_disabled());
        assert_eq!(pacing.next_delay(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_pause_sleeps_at_least_min() {
        let pacing = Pacing::new(Duration::from_millis(30), Duration::from_millis(40));
        let start = tokio::time::Instant::now();
        pacing.pause("https://example.com/next").await;
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_disabled_pause_returns_immediately() {
        let start = tokio::time::Instant::now();
        Pacing::disabled().pause("https://example.com/next").await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
