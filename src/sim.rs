/*! Scaffolding shared by the two simulation engines

Both engines consume an arrival-ordered stream of private job copies,
produce a ([Trace], completed-job set) pair, and report the same
structural fault if they can no longer make progress. */

use std::collections::VecDeque;

use thiserror::Error;

use crate::job::Job;
use crate::time::Instant;
use crate::trace::Trace;

/// Error type returned when a simulation run cannot run to completion.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SimulationFault {
    /// The engine found itself idle with empty queues, no future
    /// arrivals, and `unfinished` jobs still incomplete. This cannot
    /// happen for a correct engine; it is surfaced instead of
    /// fabricating time or spinning forever.
    #[error("simulation stalled at time {at}: {unfinished} job(s) cannot make progress")]
    Stalled { at: Instant, unfinished: usize },
}

/// What a successful engine run yields.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleOutcome {
    /// CPU occupancy, in time order.
    pub trace: Trace,
    /// Every input job, completion fields populated, sorted by id.
    pub completed: Vec<Job>,
}

pub type ScheduleResult = Result<ScheduleOutcome, SimulationFault>;

/// Arrival-ordered cursor over an engine's private copy of the job
/// list. Jobs are admitted by popping everything due at the current
/// simulated time.
pub(crate) struct Arrivals {
    pending: VecDeque<Job>,
    total: usize,
}

impl Arrivals {
    /// Copy the caller's jobs and order them by (arrival, id), so
    /// that admission order is deterministic even for simultaneous
    /// arrivals.
    pub(crate) fn of(jobs: &[Job]) -> Arrivals {
        let mut sorted: Vec<Job> = jobs.to_vec();
        sorted.sort_by(|a, b| {
            a.arrival_time
                .total_cmp(&b.arrival_time)
                .then_with(|| a.id.cmp(&b.id))
        });
        Arrivals {
            total: sorted.len(),
            pending: sorted.into(),
        }
    }

    /// Number of jobs in the run, arrived or not.
    pub(crate) fn total(&self) -> usize {
        self.total
    }

    /// Arrival time of the next not-yet-admitted job, if any.
    pub(crate) fn next_arrival(&self) -> Option<Instant> {
        self.pending.front().map(|j| j.arrival_time)
    }

    /// Admit the next job if its arrival time has been reached.
    pub(crate) fn pop_due(&mut self, now: Instant) -> Option<Job> {
        if self.pending.front()?.arrival_time <= now {
            self.pending.pop_front()
        } else {
            None
        }
    }
}
