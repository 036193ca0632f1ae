/*! The job model shared by all scheduling policies

A [Job] couples the static description of a unit of CPU demand (its
identifier, arrival time, and total service requirement) with the
mutable state an engine maintains while simulating it. Completed jobs
additionally expose the derived timing metrics. */

use derive_more::{Display, From};

use crate::time::{Duration, Instant};

/// Unique, stable identifier of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From)]
pub struct JobId(pub u64);

/// A unit of simulated CPU demand.
///
/// The static attributes `arrival_time` and `service_time` are fixed
/// at construction; the remaining fields are mutated exclusively by
/// the engine running the job. `None` serves as the "not yet" sentinel
/// for `start_time` and `completion_time`.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: JobId,
    /// When the job shows up (`>= 0`, validated by the caller).
    pub arrival_time: Instant,
    /// Total CPU service the job requires (`> 0`, validated by the caller).
    pub service_time: Duration,
    /// Service not yet received; non-increasing, floored at zero.
    pub remaining_time: Duration,
    /// Set once, at first dispatch.
    pub start_time: Option<Instant>,
    /// Set once, when `remaining_time` reaches zero.
    pub completion_time: Option<Instant>,
}

impl Job {
    /// Construct a fresh job from a validated descriptor.
    pub fn new(id: impl Into<JobId>, arrival_time: Instant, service_time: Duration) -> Job {
        Job {
            id: id.into(),
            arrival_time,
            service_time,
            remaining_time: service_time,
            start_time: None,
            completion_time: None,
        }
    }

    /// Has the job received all of its service?
    pub fn is_complete(&self) -> bool {
        self.completion_time.is_some()
    }

    /// Time from arrival to completion, available once complete.
    pub fn turnaround_time(&self) -> Option<Duration> {
        self.completion_time.map(|c| c - self.arrival_time)
    }

    /// Time spent ready but not executing, available once complete.
    pub fn waiting_time(&self) -> Option<Duration> {
        self.turnaround_time().map(|t| t - self.service_time)
    }

    /// Record the first dispatch; later dispatches leave `start_time`
    /// untouched.
    pub(crate) fn mark_dispatched(&mut self, now: Instant) {
        self.start_time.get_or_insert(now);
    }

    /// Consume `step` units of service.
    pub(crate) fn run_for(&mut self, step: Duration) {
        debug_assert!(step >= 0.0 && step <= self.remaining_time + crate::time::TOLERANCE);
        self.remaining_time = (self.remaining_time - step).max(0.0);
    }

    /// Mark the job complete at `now`. The tolerance-bounded residue
    /// in `remaining_time` is zeroed so the invariant
    /// `0 <= remaining_time <= service_time` holds exactly.
    pub(crate) fn complete_at(&mut self, now: Instant) {
        debug_assert!(now >= self.arrival_time);
        self.remaining_time = 0.0;
        self.completion_time = Some(now);
    }
}
