//! Periodic sampling loop
//!
//! The loop runs on its own thread so a slow or unreachable host never blocks
//! the event loop. Probes run back-to-back on that single thread, so two
//! probes are never in flight at once.

pub mod cancel;
pub mod sink;
pub mod ticker;

pub use cancel::CancellationToken;
pub use sink::DisplaySink;
pub use ticker::Ticker;

use crate::config::SharedSettings;
use crate::error::{OverlayError, Result};
use crate::probe::{PingBackend, Prober, Reading, Sample};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Active/Idle switch shared with the controller.
///
/// While idle (overlay hidden) ticks still fire but no probe is sent.
#[derive(Debug, Clone, Default)]
pub struct ActivityGate {
    active: Arc<AtomicBool>,
}

impl ActivityGate {
    pub fn new(active: bool) -> Self {
        Self {
            active: Arc::new(AtomicBool::new(active)),
        }
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Relaxed);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }
}

/// Lock-free per-outcome counters
#[derive(Debug, Clone, Default)]
pub struct SamplerCounters {
    replies: Arc<AtomicU64>,
    timeouts: Arc<AtomicU64>,
    errors: Arc<AtomicU64>,
    idle_ticks: Arc<AtomicU64>,
}

impl SamplerCounters {
    #[inline]
    fn record(&self, sample: &Sample) {
        let counter = match sample {
            Sample::Latency(_) => &self.replies,
            Sample::Timeout => &self.timeouts,
            Sample::Error(_) => &self.errors,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_idle(&self) {
        self.idle_ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn stats(&self) -> SamplerStats {
        SamplerStats {
            replies: self.replies.load(Ordering::Relaxed),
            timeouts: self.timeouts.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            idle_ticks: self.idle_ticks.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of the sampler counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamplerStats {
    pub replies: u64,
    pub timeouts: u64,
    pub errors: u64,
    pub idle_ticks: u64,
}

impl SamplerStats {
    pub fn probes(&self) -> u64 {
        self.replies + self.timeouts + self.errors
    }
}

pub struct SamplingLoop<B: PingBackend, S: DisplaySink> {
    prober: Prober<B>,
    settings: SharedSettings,
    sink: S,
    period: Duration,
    timeout: Duration,
    gate: ActivityGate,
    counters: SamplerCounters,
}

impl<B: PingBackend, S: DisplaySink> SamplingLoop<B, S> {
    pub fn new(
        prober: Prober<B>,
        settings: SharedSettings,
        sink: S,
        period: Duration,
        timeout: Duration,
    ) -> Self {
        Self {
            prober,
            settings,
            sink,
            period,
            timeout,
            gate: ActivityGate::new(false),
            counters: SamplerCounters::default(),
        }
    }

    /// Share an existing gate, e.g. one already handed to the controller
    pub fn with_gate(mut self, gate: ActivityGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn gate(&self) -> ActivityGate {
        self.gate.clone()
    }

    pub fn counters(&self) -> SamplerCounters {
        self.counters.clone()
    }

    /// Execute one tick.
    ///
    /// Returns the published reading, or `None` when idle or when the token
    /// was cancelled while the probe was in flight (the result is dropped).
    pub fn tick(&self, token: &CancellationToken) -> Option<Reading> {
        if !self.gate.is_active() {
            self.counters.record_idle();
            return None;
        }

        // One snapshot per tick: host and thresholds always come from the same document
        let settings = self.settings.snapshot();
        let sample = self.prober.measure(&settings.host, self.timeout);
        self.counters.record(&sample);

        if token.is_cancelled() {
            debug!("Sampler cancelled during probe, discarding result");
            return None;
        }

        let reading =
            Reading::from_sample(&sample, settings.green_threshold, settings.yellow_threshold);
        debug!(text = %reading.text, tier = %reading.tier, "Publishing reading");
        self.sink.publish(reading.clone());
        Some(reading)
    }

    /// Tick until `token` is cancelled
    pub fn run(&self, token: &CancellationToken) {
        let mut ticker = Ticker::new(self.period);
        info!(
            period_ms = self.period.as_millis() as u64,
            timeout_ms = self.timeout.as_millis() as u64,
            "Sampling loop started"
        );

        while ticker.wait(token) {
            self.tick(token);
        }

        info!(skipped_ticks = ticker.skipped(), "Sampling loop stopped");
    }
}

impl<B, S> SamplingLoop<B, S>
where
    B: PingBackend + 'static,
    S: DisplaySink + 'static,
{
    /// Run the loop on a dedicated thread
    pub fn spawn(self) -> Result<SamplerHandle> {
        let token = CancellationToken::new();
        let gate = self.gate();
        let counters = self.counters();
        let thread_token = token.clone();

        let thread = thread::Builder::new()
            .name("ping-sampler".into())
            .spawn(move || self.run(&thread_token))
            .map_err(|e| OverlayError::Sampler(format!("failed to spawn sampler thread: {}", e)))?;

        Ok(SamplerHandle {
            token,
            gate,
            counters,
            thread: Some(thread),
        })
    }
}

/// Owner side of a running sampler.
///
/// Dropping the handle cancels and joins the thread.
pub struct SamplerHandle {
    token: CancellationToken,
    gate: ActivityGate,
    counters: SamplerCounters,
    thread: Option<JoinHandle<()>>,
}

impl SamplerHandle {
    pub fn gate(&self) -> ActivityGate {
        self.gate.clone()
    }

    /// Cancel, wait for the thread to exit and return the final counters.
    ///
    /// Waits at most one in-flight probe.
    pub fn shutdown(mut self) -> SamplerStats {
        self.stop();
        self.counters.stats()
    }

    fn stop(&mut self) {
        self.token.cancel();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Sampler thread panicked");
            }
        }
    }
}

impl Drop for SamplerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
