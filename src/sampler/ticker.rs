use crate::sampler::cancel::CancellationToken;
use std::time::{Duration, Instant};
use tracing::debug;

/// Fixed-period schedule.
///
/// The first tick fires immediately. When a tick overruns its period (a slow
/// probe), the missed ticks are coalesced into one and the schedule restarts
/// from the current instant instead of firing a burst to catch up.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    next: Instant,
    skipped: u64,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next: Instant::now(),
            skipped: 0,
        }
    }

    /// Total number of ticks dropped by coalescing
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Block until the next tick. Returns false once `token` is cancelled.
    pub fn wait(&mut self, token: &CancellationToken) -> bool {
        let now = Instant::now();
        if self.next > now {
            if token.wait_timeout(self.next - now) {
                return false;
            }
        } else if token.is_cancelled() {
            return false;
        }

        let now = Instant::now();
        self.next += self.period;
        if self.next <= now {
            let behind = now.duration_since(self.next);
            let missed = 1 + (behind.as_nanos() / self.period.as_nanos().max(1)) as u64;
            self.skipped += missed;
            debug!(missed = missed, "Coalescing missed ticks");
            self.next = now + self.period;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_first_tick_is_immediate() {
        let token = CancellationToken::new();
        let mut ticker = Ticker::new(Duration::from_secs(60));
        let start = Instant::now();
        assert!(ticker.wait(&token));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_ticks_are_spaced_by_period() {
        let token = CancellationToken::new();
        let mut ticker = Ticker::new(Duration::from_millis(30));
        assert!(ticker.wait(&token));
        let start = Instant::now();
        assert!(ticker.wait(&token));
        assert!(start.elapsed() >= Duration::from_millis(25));
    }

    #[test]
    fn test_overrun_coalesces_missed_ticks() {
        let token = CancellationToken::new();
        let mut ticker = Ticker::new(Duration::from_millis(10));
        assert!(ticker.wait(&token));

        // Simulate a probe that takes several periods
        thread::sleep(Duration::from_millis(55));
        assert!(ticker.wait(&token));
        assert!(ticker.skipped() >= 1);

        // Next tick waits a full period again rather than firing immediately
        let start = Instant::now();
        assert!(ticker.wait(&token));
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_cancelled_token_stops_ticker() {
        let token = CancellationToken::new();
        let mut ticker = Ticker::new(Duration::from_secs(60));
        assert!(ticker.wait(&token));
        token.cancel();
        let start = Instant::now();
        assert!(!ticker.wait(&token));
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
