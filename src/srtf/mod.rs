/*! Preemptive *Shortest-Remaining-Time-First* (**SRTF**) simulation

A single-queue engine that, at every decision point, runs the ready
job with the least remaining service. Simulated time advances by
variable next-event steps (next arrival or completion of the running
job), never by fixed ticking, so sub-unit service times are handled
exactly.

Ready jobs are kept in a binary heap ordered by the triple
`(remaining_time, arrival_time, id)` ascending. This triple is the
complete tie-break order and makes every run deterministic: strictly
least remaining service wins, ties go to the earlier arrival, and
remaining ties to the smaller id. */

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::job::Job;
use crate::observe::SimObserver;
use crate::sim::{Arrivals, ScheduleOutcome, ScheduleResult, SimulationFault};
use crate::time::{exhausted, Instant};
use crate::trace::Trace;

/// Heap entry imposing the total SRTF dispatch order on jobs.
///
/// The key fields are stable while an entry sits in the heap: a
/// queued job's remaining time only changes while it is running, and
/// a running job is never in the heap.
struct ReadyEntry(Job);

impl Ord for ReadyEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .remaining_time
            .total_cmp(&other.0.remaining_time)
            .then_with(|| self.0.arrival_time.total_cmp(&other.0.arrival_time))
            .then_with(|| self.0.id.cmp(&other.0.id))
    }
}

impl PartialOrd for ReadyEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ReadyEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ReadyEntry {}

/// Run the SRTF engine over a validated job list, silently.
///
/// The input slice is copied; the caller's jobs are not mutated, so
/// the same list can be fed to both engines for comparison.
pub fn simulate(jobs: &[Job]) -> ScheduleResult {
    simulate_with(jobs, &mut ())
}

/// Run the SRTF engine, reporting each event to `observer`.
pub fn simulate_with<O: SimObserver>(jobs: &[Job], observer: &mut O) -> ScheduleResult {
    let mut arrivals = Arrivals::of(jobs);
    let total = arrivals.total();
    let mut ready: BinaryHeap<Reverse<ReadyEntry>> = BinaryHeap::new();
    let mut trace = Trace::new();
    let mut completed: Vec<Job> = Vec::with_capacity(total);
    let mut running: Option<Job> = None;
    let mut segment_start: Instant = 0.0;
    let mut now: Instant = 0.0;

    while completed.len() < total {
        // Admit every job due by now, in arrival order. An admission
        // preempts the running job iff the newcomer has strictly less
        // service left; ties keep the incumbent on the CPU.
        while let Some(job) = arrivals.pop_due(now) {
            observer.job_arrived(now, job.id);
            let preempts = running
                .as_ref()
                .map_or(false, |cur| job.remaining_time < cur.remaining_time);
            if preempts {
                if let Some(cur) = running.take() {
                    trace.record(cur.id, segment_start, now);
                    observer.job_preempted(now, cur.id);
                    ready.push(Reverse(ReadyEntry(cur)));
                }
            }
            ready.push(Reverse(ReadyEntry(job)));
        }

        if running.is_none() {
            if let Some(Reverse(ReadyEntry(mut job))) = ready.pop() {
                job.mark_dispatched(now);
                observer.job_dispatched(now, job.id);
                segment_start = now;
                running = Some(job);
            } else if let Some(next) = arrivals.next_arrival() {
                // Nothing ready but more work is coming: jump the
                // clock, emitting no segment for the idle interval.
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

        // Advance to the next event: the running job's completion or
        // the next arrival, whichever comes first. Queued jobs cannot
        // overtake in between, since their remaining times are static
        // while waiting; overtaking is re-evaluated at each admission.
        if let Some(job) = running.as_mut() {
            let mut step = job.remaining_time;
            if let Some(next) = arrivals.next_arrival() {
                step = step.min(next - now);
            }
            job.run_for(step);
            now += step;
        }

        let done = running
            .as_ref()
            .map_or(false, |j| exhausted(j.remaining_time));
        if done {
            if let Some(mut job) = running.take() {
                job.complete_at(now);
                trace.record(job.id, segment_start, now);
                observer.job_completed(now, job.id);
                completed.push(job);
            }
        }
    }

    completed.sort_by_key(|j| j.id);
    Ok(ScheduleOutcome { trace, completed })
}
