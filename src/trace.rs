/*! Execution traces

A [Trace] is the ordered record of CPU occupancy produced by one
engine run: one [Segment] per maximal contiguous interval during which
a single job owned the CPU. Idle intervals are not represented. */

use itertools::Itertools;

use crate::job::JobId;
use crate::time::{Duration, Instant};

/// One interval of sole CPU ownership.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub job: JobId,
    pub start: Instant,
    pub end: Instant,
}

impl Segment {
    pub fn length(&self) -> Duration {
        self.end - self.start
    }
}

/// The full occupancy record of a single engine run, in time order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    segments: Vec<Segment>,
}

impl Trace {
    pub fn new() -> Trace {
        Trace::default()
    }

    /// Append a segment. Degenerate zero-length intervals (a job
    /// dispatched and displaced at the same instant) are dropped.
    pub(crate) fn record(&mut self, job: JobId, start: Instant, end: Instant) {
        debug_assert!(end >= start);
        if end > start {
            self.segments.push(Segment { job, start, end });
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total service received by `job` across the whole trace.
    pub fn service_received(&self, job: JobId) -> Duration {
        self.segments
            .iter()
            .filter(|s| s.job == job)
            .map(Segment::length)
            .sum()
    }

    /// True if the segments are totally ordered by time and never
    /// overlap, as required of a single shared CPU.
    pub fn is_sequential(&self) -> bool {
        self.segments
            .iter()
            .tuple_windows()
            .all(|(a, b)| a.end <= b.start)
    }
}
