/*! *Multi-Level Feedback Queue* (**MLFQ**) simulation

An engine with `L >= 1` priority levels, level 0 highest. Each level
is a FIFO queue with a fixed time quantum; the last level's quantum
may be [unbounded][Quantum::Unbounded], giving run-to-completion FCFS
behavior at the bottom. Feedback is demotion-only: a job that
exhausts its slice moves one level down (saturating at the last
level) and is appended to the *back* of that queue, while a job
preempted by an arrival keeps its place at the *front* of its own
level. The front/back distinction is load-bearing and pinned by the
tests.

New arrivals always enter level 0. An arrival preempts the running
job only if that job is currently running *from a level below the
top*; a job running at level 0 is never preempted by an arrival. */

use std::collections::VecDeque;

use thiserror::Error;

use crate::job::Job;
use crate::observe::SimObserver;
use crate::sim::{Arrivals, ScheduleOutcome, ScheduleResult, SimulationFault};
use crate::time::{exhausted, Duration, Instant};
use crate::trace::Trace;

/// The time budget one dispatch at a given level may consume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantum {
    /// At most this much contiguous service per dispatch.
    Finite(Duration),
    /// No slice limit; only completion or an arrival preemption ends
    /// the dispatch. Permitted at the last level only.
    Unbounded,
}

impl Quantum {
    /// The slice counter to allocate on dispatch; `None` means no
    /// limit. An explicit tag is used rather than an infinite float
    /// so slice comparisons stay exact.
    fn slice(self) -> Option<Duration> {
        match self {
            Quantum::Finite(q) => Some(q),
            Quantum::Unbounded => None,
        }
    }
}

/// Error type for malformed quantum tables, rejected at construction.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParamsError {
    #[error("an MLFQ needs at least one priority level")]
    NoLevels,
    #[error("level {level} has a non-positive quantum")]
    NonPositiveQuantum { level: usize },
    #[error("level {level} is unbounded, but only the last level may be")]
    UnboundedNotLast { level: usize },
}

/// Validated MLFQ configuration: one quantum per priority level.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    quanta: Vec<Quantum>,
}

impl Params {
    /// Validate a quantum table. This constructor is the
    /// configuration boundary; the engine assumes a valid table and
    /// does not re-check.
    pub fn new(quanta: Vec<Quantum>) -> Result<Params, ParamsError> {
        if quanta.is_empty() {
            return Err(ParamsError::NoLevels);
        }
        let last = quanta.len() - 1;
        for (level, q) in quanta.iter().enumerate() {
            match *q {
                Quantum::Finite(q) if q <= 0.0 => {
                    return Err(ParamsError::NonPositiveQuantum { level })
                }
                Quantum::Unbounded if level != last => {
                    return Err(ParamsError::UnboundedNotLast { level })
                }
                _ => {}
            }
        }
        Ok(Params { quanta })
    }

    /// Number of priority levels.
    pub fn levels(&self) -> usize {
        self.quanta.len()
    }

    fn slice_for(&self, level: usize) -> Option<Duration> {
        self.quanta[level].slice()
    }
}

/// The job currently owning the CPU, the level it was dispatched
/// from, and what is left of its slice.
struct Dispatch {
    job: Job,
    level: usize,
    slice: Option<Duration>,
}

/// Run the MLFQ engine over a validated job list, silently.
pub fn simulate(jobs: &[Job], params: &Params) -> ScheduleResult {
    simulate_with(jobs, params, &mut ())
}

/// Run the MLFQ engine, reporting each event to `observer`.
pub fn simulate_with<O: SimObserver>(
    jobs: &[Job],
    params: &Params,
    observer: &mut O,
) -> ScheduleResult {
    let levels = params.levels();
    let mut arrivals = Arrivals::of(jobs);
    let total = arrivals.total();
    let mut queues: Vec<VecDeque<Job>> = (0..levels).map(|_| VecDeque::new()).collect();
    let mut trace = Trace::new();
    let mut completed: Vec<Job> = Vec::with_capacity(total);
    let mut running: Option<Dispatch> = None;
    let mut segment_start: Instant = 0.0;
    let mut now: Instant = 0.0;

    while completed.len() < total {
        // Every arrival enters the top-priority queue.
        let mut admitted = false;
        while let Some(job) = arrivals.pop_due(now) {
            observer.job_arrived(now, job.id);
            queues[0].push_back(job);
            admitted = true;
        }

        // A level-0 arrival displaces a job running from a lower
        // level. The displaced job had not exhausted its slice, so it
        // returns to the front of its own queue and keeps its turn.
        if admitted {
            let displaced = running.as_ref().map_or(false, |cur| cur.level > 0);
            if displaced {
                if let Some(cur) = running.take() {
                    trace.record(cur.job.id, segment_start, now);
                    observer.job_preempted(now, cur.job.id);
                    queues[cur.level].push_front(cur.job);
                }
            }
        }

        if running.is_none() {
            // Strict priority: scan from level 0 down, round-robin
            // within a level. A dispatch always gets a fresh slice.
            let first_backlogged = (0..levels).find(|&l| !queues[l].is_empty());
            if let Some(level) = first_backlogged {
                if let Some(mut job) = queues[level].pop_front() {
                    job.mark_dispatched(now);
                    observer.job_dispatched(now, job.id);
                    segment_start = now;
                    running = Some(Dispatch {
                        job,
                        level,
                        slice: params.slice_for(level),
                    });
                }
            } else if let Some(next) = arrivals.next_arrival() {
                observer.cpu_idle(now, next);
                now = next;
                continue;
            } else {
                return Err(SimulationFault::Stalled {
                    at: now,
                    unfinished: total - completed.len(),
                });
            }
        }

        // Advance to the next event: completion, slice expiry, or
        // the next arrival, whichever comes first.
        if let Some(cur) = running.as_mut() {
            let mut step = cur.job.remaining_time;
            if let Some(slice) = cur.slice {
                step = step.min(slice);
            }
            if let Some(next) = arrivals.next_arrival() {
                step = step.min(next - now);
            }
            cur.job.run_for(step);
            if let Some(slice) = cur.slice.as_mut() {
                *slice -= step;
            }
            now += step;
        }

        // Completion takes precedence over slice expiry when both
        // land on the same step.
        let finished = running
            .as_ref()
            .map_or(false, |cur| exhausted(cur.job.remaining_time));
        let expired = !finished
            && running
                .as_ref()
                .map_or(false, |cur| cur.slice.map_or(false, exhausted));
        if finished {
            if let Some(mut cur) = running.take() {
                cur.job.complete_at(now);
                trace.record(cur.job.id, segment_start, now);
                observer.job_completed(now, cur.job.id);
                completed.push(cur.job);
            }
        } else if expired {
            // Slice spent before the job finished: demote one level
            // (saturating at the bottom) and append to the back.
            if let Some(cur) = running.take() {
                trace.record(cur.job.id, segment_start, now);
                let below = (cur.level + 1).min(levels - 1);
                observer.job_demoted(now, cur.job.id, below);
                queues[below].push_back(cur.job);
            }
        }
    }

    completed.sort_by_key(|j| j.id);
    Ok(ScheduleOutcome { trace, completed })
}

#[cfg(test)]
mod tests;
