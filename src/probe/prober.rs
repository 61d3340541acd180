use crate::probe::backend::PingBackend;
use crate::probe::sample::Sample;
use std::time::Duration;
use tracing::{debug, warn};

/// Issues one latency measurement and folds every outcome into a `Sample`
#[derive(Debug)]
pub struct Prober<B: PingBackend> {
    backend: B,
}

impl<B: PingBackend> Prober<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Measure the round trip to `host`.
    ///
    /// A zero round trip is treated as no reply.
    pub fn measure(&self, host: &str, timeout: Duration) -> Sample {
        match self.backend.ping(host, timeout) {
            Ok(Some(rtt)) if !rtt.is_zero() => {
                let latency_ms = rtt.as_secs_f64() * 1000.0;
                debug!(host = host, latency_ms = latency_ms, "Probe reply received");
                Sample::Latency(latency_ms)
            }
            Ok(_) => {
                debug!(host = host, "Probe timed out");
                Sample::Timeout
            }
            Err(e) => {
                warn!(host = host, error = %e, "Probe failed");
                Sample::Error(e.to_string())
            }
        }
    }
}
