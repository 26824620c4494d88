//! Measuring kernel execution, on the device and on the host.
use std::time::{Duration, Instant};

use crate::error::Error;

/// The profiling counters of a command, in nanoseconds of the device clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Counter {
    Queued,
    Submit,
    Start,
    End,
    Complete,
}

/// An event of a command enqueued with profiling enabled.
pub trait Profiled {
    fn counter(&self, counter: Counter) -> Result<u64, Error>;
}

/// Accumulates host time between checkpoints.
pub struct Stopwatch {
    host_start: Instant,
    time_spent: Duration,
}

/// The device time between two profiling counters of a completed event.
///
/// The first failing query is returned unchanged.
pub fn event_duration(
    event: &impl Profiled,
    from: Counter,
    to: Counter,
) -> Result<Duration, Error> {
    let start = event.counter(from)?;
    let end = event.counter(to)?;
    Ok(Duration::from_nanos(end.saturating_sub(start)))
}

/// The time a command spent executing on the device.
pub fn execution_time(event: &impl Profiled) -> Result<Duration, Error> {
    event_duration(event, Counter::Start, Counter::End)
}

impl Stopwatch {
    pub fn from_now() -> Self {
        Stopwatch {
            host_start: Instant::now(),
            time_spent: Duration::default(),
        }
    }

    /// Add the time since the last checkpoint.
    pub fn checkpoint(&mut self) {
        let new_now = Instant::now();
        self.time_spent += new_now.saturating_duration_since(self.host_start);
        self.host_start = new_now;
    }

    /// Restart the interval without accounting the time since the last checkpoint.
    pub fn skip(&mut self) {
        self.host_start = Instant::now();
    }

    pub fn spent(&self) -> Duration {
        self.time_spent
    }
}

#[cfg(feature = "opencl")]
impl Profiled for opencl3::event::Event {
    fn counter(&self, counter: Counter) -> Result<u64, Error> {
        let value = match counter {
            Counter::Queued => self.profiling_command_queued(),
            Counter::Submit => self.profiling_command_submit(),
            Counter::Start => self.profiling_command_start(),
            Counter::End => self.profiling_command_end(),
            Counter::Complete => self.profiling_command_complete(),
        }?;

        Ok(value)
    }
}
