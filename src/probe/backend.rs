use crate::constants::{PROBE_KILL_GRACE_MS, PROBE_POLL_INTERVAL_MS};
use crate::error::{OverlayError, Result};
use regex::Regex;
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::OnceLock;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// One ICMP echo round trip against a host
pub trait PingBackend: Send + Sync {
    /// `Ok(Some(rtt))` on a reply, `Ok(None)` when no reply arrived in time
    fn ping(&self, host: &str, timeout: Duration) -> Result<Option<Duration>>;
}

/// Backend that runs the platform `ping` utility once per probe.
///
/// Raw ICMP sockets need elevated privileges on most systems; the system
/// utility is already set up to send echo requests as a normal user.
#[derive(Debug, Clone)]
pub struct SystemPing {
    program: String,
}

impl Default for SystemPing {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemPing {
    pub fn new() -> Self {
        Self::with_program("ping")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, host: &str, timeout: Duration) -> Command {
        let mut cmd = Command::new(&self.program);
        if cfg!(target_os = "windows") {
            cmd.args(["-n", "1", "-w"])
                .arg(timeout.as_millis().max(1).to_string());
        } else if cfg!(target_os = "macos") {
            // macOS -W is in milliseconds
            cmd.args(["-n", "-c", "1", "-W"])
                .arg(timeout.as_millis().max(1).to_string());
        } else {
            // Linux iputils -W is in whole seconds
            let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
            cmd.args(["-n", "-c", "1", "-W"]).arg(secs.max(1).to_string());
        }
        cmd.arg(host)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Wait for the child, killing it once `deadline` passes.
    ///
    /// Returns `None` when the child had to be killed.
    fn wait_until(child: &mut Child, deadline: Instant) -> Result<Option<ExitStatus>> {
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(Some(status));
            }
            if Instant::now() >= deadline {
                warn!("ping process exceeded its deadline, killing it");
                let _ = child.kill();
                let _ = child.wait();
                return Ok(None);
            }
            thread::sleep(Duration::from_millis(PROBE_POLL_INTERVAL_MS));
        }
    }
}

impl PingBackend for SystemPing {
    fn ping(&self, host: &str, timeout: Duration) -> Result<Option<Duration>> {
        if host.is_empty() || host.starts_with('-') || host.chars().any(char::is_whitespace) {
            return Err(OverlayError::Probe(format!("invalid host '{}'", host)));
        }

        debug!(host = host, timeout_ms = timeout.as_millis() as u64, "Running ping");
        let mut child = self.command(host, timeout).spawn().map_err(|e| {
            warn!(error = %e, program = %self.program, "Failed to start ping");
            OverlayError::Probe(format!("failed to run {}: {}", self.program, e))
        })?;

        let deadline = Instant::now() + timeout + Duration::from_millis(PROBE_KILL_GRACE_MS);
        let status = match Self::wait_until(&mut child, deadline)? {
            Some(status) => status,
            None => return Ok(None),
        };

        let mut stdout = String::new();
        let mut stderr = String::new();
        if let Some(mut out) = child.stdout.take() {
            out.read_to_string(&mut stdout)?;
        }
        if let Some(mut err) = child.stderr.take() {
            err.read_to_string(&mut stderr)?;
        }

        interpret_output(status.success(), &stdout, &stderr)
    }
}

fn round_trip_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)time\s*[=<]\s*([0-9]+(?:[.,][0-9]+)?)\s*ms").ok())
        .as_ref()
}

/// Extract the round-trip time from `ping` output.
///
/// Handles `time=12.3 ms` (Linux/macOS) and `time=14ms` / `time<1ms` (Windows).
pub fn parse_round_trip(output: &str) -> Option<Duration> {
    let captures = round_trip_pattern()?.captures(output)?;
    let ms: f64 = captures.get(1)?.as_str().replace(',', ".").parse().ok()?;
    if !ms.is_finite() || ms < 0.0 {
        return None;
    }
    Some(Duration::from_secs_f64(ms / 1000.0))
}

const RESOLUTION_MARKERS: [&str; 5] = [
    "unknown host",
    "name or service not known",
    "could not find host",
    "cannot resolve",
    "temporary failure in name resolution",
];

const PERMISSION_MARKERS: [&str; 2] = ["operation not permitted", "permission denied"];

/// Map a finished `ping` run onto the backend contract
fn interpret_output(success: bool, stdout: &str, stderr: &str) -> Result<Option<Duration>> {
    if let Some(rtt) = parse_round_trip(stdout) {
        return Ok(Some(rtt));
    }

    let combined = format!("{}\n{}", stdout, stderr).to_lowercase();
    if RESOLUTION_MARKERS.iter().any(|m| combined.contains(m)) {
        return Err(OverlayError::Probe("cannot resolve host".into()));
    }
    if PERMISSION_MARKERS.iter().any(|m| combined.contains(m)) {
        return Err(OverlayError::Probe("permission denied".into()));
    }

    let stderr_line = stderr.lines().map(str::trim).find(|l| !l.is_empty());
    match stderr_line {
        Some(line) if !success => Err(OverlayError::Probe(line.to_string())),
        _ => Ok(None),
    }
}


#[cfg(test)]
pub use tests::MockPingBackend;
