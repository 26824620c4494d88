//! Event timing from profiling counters.
use std::time::Duration;

use cl_sdk::error::{Error, Status};
use cl_sdk::timing::{self, Counter, Profiled, Stopwatch};

/// An event with fixed counters, where `complete` may be unavailable.
struct Recorded {
    queued: u64,
    start: u64,
    end: u64,
    complete: Option<u64>,
}

impl Profiled for Recorded {
    fn counter(&self, counter: Counter) -> Result<u64, Error> {
        match counter {
            Counter::Queued | Counter::Submit => Ok(self.queued),
            Counter::Start => Ok(self.start),
            Counter::End => Ok(self.end),
            Counter::Complete => self
                .complete
                .ok_or(Error::new(Status::PROFILING_INFO_NOT_AVAILABLE)),
        }
    }
}

const EVENT: Recorded = Recorded {
    queued: 1_000,
    start: 5_000,
    end: 2_005_000,
    complete: None,
};

#[test]
fn execution_is_start_to_end() {
    assert_eq!(timing::execution_time(&EVENT).unwrap(), Duration::from_millis(2));
    assert_eq!(
        timing::event_duration(&EVENT, Counter::Queued, Counter::Start).unwrap(),
        Duration::from_nanos(4_000)
    );
}

#[test]
fn reversed_counters_saturate() {
    assert_eq!(
        timing::event_duration(&EVENT, Counter::End, Counter::Start).unwrap(),
        Duration::ZERO
    );
}

#[test]
fn unavailable_counter_is_an_error() {
    let err = timing::event_duration(&EVENT, Counter::Start, Counter::Complete).unwrap_err();
    assert_eq!(err.status(), Status::PROFILING_INFO_NOT_AVAILABLE);
}

#[test]
fn stopwatch_accumulates() {
    let mut watch = Stopwatch::from_now();
    assert_eq!(watch.spent(), Duration::ZERO);

    std::thread::sleep(Duration::from_millis(5));
    watch.checkpoint();
    let first = watch.spent();
    assert!(first >= Duration::from_millis(5));

    std::thread::sleep(Duration::from_millis(5));
    watch.skip();
    watch.checkpoint();
    assert!(watch.spent() - first < Duration::from_millis(5));
}
