use std::fmt;

/// Outcome of one probe
#[derive(Debug, Clone, PartialEq)]
pub enum Sample {
    /// Round trip time in milliseconds, always > 0
    Latency(f64),
    Timeout,
    /// The probe could not be carried out; the reason is for logs only
    Error(String),
}

/// Classification tier of a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Green,
    Yellow,
    Red,
}

impl Tier {
    /// Display color as RGB
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Tier::Green => (0x00, 0xff, 0x00),
            Tier::Yellow => (0xff, 0xff, 0x00),
            Tier::Red => (0xff, 0x00, 0x00),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Green => "green",
            Tier::Yellow => "yellow",
            Tier::Red => "red",
        };
        f.write_str(name)
    }
}

/// Bucket a latency against the green/yellow thresholds
pub fn classify(latency_ms: f64, green: u32, yellow: u32) -> Tier {
    if latency_ms < f64::from(green) {
        Tier::Green
    } else if latency_ms < f64::from(yellow) {
        Tier::Yellow
    } else {
        Tier::Red
    }
}

/// What the display sink receives each tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub text: String,
    pub tier: Tier,
}

impl Reading {
    /// Placeholder shown before the first tick completes
    pub fn placeholder() -> Self {
        Self {
            text: "-- ms".to_string(),
            tier: Tier::Green,
        }
    }

    /// Turn a sample into display text and tier.
    ///
    /// Timeouts and errors share the red tier with slow replies but keep
    /// distinct text; an error's reason is never shown.
    pub fn from_sample(sample: &Sample, green: u32, yellow: u32) -> Self {
        match sample {
            Sample::Latency(ms) => Self {
                text: format!("{:.0} ms", ms),
                tier: classify(*ms, green, yellow),
            },
            Sample::Timeout => Self {
                text: "Timeout".to_string(),
                tier: Tier::Red,
            },
            Sample::Error(_) => Self {
                text: "Error".to_string(),
                tier: Tier::Red,
            },
        }
    }
}
