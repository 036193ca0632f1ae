/*! Aggregate performance figures over a completed job set

The reduction is independent of which engine produced the set, so the
same calculator serves SRTF and MLFQ comparisons. */

use crate::job::Job;
use crate::time::Duration;

/// Summary figures for one engine run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub avg_waiting_time: Duration,
    pub avg_turnaround_time: Duration,
    /// Percentage of the busy span spent serving jobs.
    pub cpu_utilization_pct: f64,
    /// Jobs completed per unit of simulated time.
    pub throughput: f64,
}

impl Metrics {
    /// Reduce a completed job set to its aggregate figures.
    ///
    /// Returns `None` for an empty set ("no data"; the caller decides
    /// how to present that) and for a set containing jobs whose
    /// completion fields are unpopulated, rather than fabricating
    /// numbers.
    ///
    /// The reference span is `max(completion) - min(arrival)`;
    /// if that is non-positive (everything arrived and completed at
    /// one instant), `max(completion)` is used instead. Utilization
    /// and throughput are 0 if the span still is not positive.
    pub fn of(completed: &[Job]) -> Option<Metrics> {
        if completed.is_empty() {
            return None;
        }
        let n = completed.len() as f64;

        let mut total_waiting: Duration = 0.0;
        let mut total_turnaround: Duration = 0.0;
        let mut total_service: Duration = 0.0;
        let mut last_completion = f64::NEG_INFINITY;
        let mut first_arrival = f64::INFINITY;
        for job in completed {
            total_waiting += job.waiting_time()?;
            total_turnaround += job.turnaround_time()?;
            total_service += job.service_time;
            last_completion = last_completion.max(job.completion_time?);
            first_arrival = first_arrival.min(job.arrival_time);
        }

        let mut span = last_completion - first_arrival;
        if span <= 0.0 {
            span = last_completion;
        }
        let (cpu_utilization_pct, throughput) = if span > 0.0 {
            (total_service / span * 100.0, n / span)
        } else {
            (0.0, 0.0)
        };

        Some(Metrics {
            avg_waiting_time: total_waiting / n,
            avg_turnaround_time: total_turnaround / n,
            cpu_utilization_pct,
            throughput,
        })
    }
}
