use crate::probe::Reading;

/// Receives one reading per active tick
pub trait DisplaySink: Send {
    fn publish(&self, reading: Reading);
}

impl<F> DisplaySink for F
where
    F: Fn(Reading) + Send,
{
    fn publish(&self, reading: Reading) {
        self(reading)
    }
}
