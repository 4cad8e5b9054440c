//! Reconnection backoff math
//!
//! Runtime-agnostic: the bridge owns the timer, this type only answers
//! "how long to wait before the next attempt, if any".

use rand::Rng;

pub const INITIAL_RETRY_DELAY_MS: u64 = 1_000;
pub const MAX_RETRY_DELAY_MS: u64 = 30_000;
pub const MAX_RETRY_ATTEMPTS: u32 = 10;
pub const BACKOFF_MULTIPLIER: f64 = 2.0;

/// Fraction of the delay used as symmetric jitter
const JITTER_RATIO: f64 = 0.1;

/// Exponential backoff state for the reconnect loop.
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    attempts: u32,
    delay_ms: u64,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            attempts: 0,
            delay_ms: INITIAL_RETRY_DELAY_MS,
        }
    }
}

impl Backoff {
    /// Reset after a successful connection.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempts >= MAX_RETRY_ATTEMPTS
    }

    /// Advance to the next attempt, updating the delay for the subsequent
    /// attempt. Returns the delay to wait *before* performing this attempt,
    /// or `None` once attempts are exhausted.
    pub fn next_delay_and_advance(&mut self) -> Option<u64> {
        if self.is_exhausted() {
            return None;
        }

        let current_delay = self.delay_ms;
        self.attempts += 1;
        self.delay_ms =
            ((self.delay_ms as f64) * BACKOFF_MULTIPLIER).min(MAX_RETRY_DELAY_MS as f64) as u64;
        Some(current_delay)
    }

    /// Like [`next_delay_and_advance`](Self::next_delay_and_advance) with
    /// ±10% jitter so reconnecting clients do not stampede the gateway.
    pub fn next_jittered_delay_and_advance(&mut self) -> Option<u64> {
        let delay = self.next_delay_and_advance()?;
        let spread = (delay as f64 * JITTER_RATIO) as u64;
        if spread == 0 {
            return Some(delay);
        }
        let low = delay.saturating_sub(spread);
        let high = delay + spread;
        Some(rand::thread_rng().gen_range(low..=high))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_double_up_to_the_cap() {
        let mut backoff = Backoff::default();
        assert_eq!(backoff.next_delay_and_advance(), Some(1_000));
        assert_eq!(backoff.next_delay_and_advance(), Some(2_000));
        assert_eq!(backoff.next_delay_and_advance(), Some(4_000));
        assert_eq!(backoff.next_delay_and_advance(), Some(8_000));
        assert_eq!(backoff.next_delay_and_advance(), Some(16_000));
        assert_eq!(backoff.next_delay_and_advance(), Some(30_000));
        assert_eq!(backoff.next_delay_and_advance(), Some(30_000));
    }

    #[test]
    fn exhausts_after_max_attempts() {
        let mut backoff = Backoff::default();
        for _ in 0..MAX_RETRY_ATTEMPTS {
            assert!(backoff.next_delay_and_advance().is_some());
        }
        assert!(backoff.is_exhausted());
        assert_eq!(backoff.next_delay_and_advance(), None);
    }

    #[test]
    fn reset_restores_initial_delay() {
        let mut backoff = Backoff::default();
        backoff.next_delay_and_advance();
        backoff.next_delay_and_advance();
        backoff.reset();
        assert_eq!(backoff.attempts(), 0);
        assert_eq!(backoff.next_delay_and_advance(), Some(INITIAL_RETRY_DELAY_MS));
    }

    #[test]
    fn jittered_delay_stays_within_spread() {
        let mut backoff = Backoff::default();
        let delay = backoff
            .next_jittered_delay_and_advance()
            .expect("first attempt");
        assert!((900..=1_100).contains(&delay), "delay {delay} out of range");
    }
}
