//! Latency probing and classification

pub mod backend;
pub mod prober;
pub mod sample;

pub use backend::{parse_round_trip, PingBackend, SystemPing};
pub use prober::Prober;
pub use sample::{classify, Reading, Sample, Tier};
