/*! Narration hooks

The engines are pure functions of their input; step-by-step narration
is delegated to an optional [SimObserver] supplied by the caller. A
presentation layer implements the trait to render per-event trace
lines; the unit type `()` serves as the silent default. */

use auto_impl::auto_impl;

use crate::job::JobId;
use crate::time::Instant;

/// Callback interface for following a simulation run as it unfolds.
///
/// Every method has a no-op default, so implementors only override
/// the events they care about.
#[auto_impl(&mut, Box)]
pub trait SimObserver {
    /// A job's arrival time has been reached and it entered the
    /// ready collection (SRTF) or the level-0 queue (MLFQ).
    fn job_arrived(&mut self, _now: Instant, _job: JobId) {}

    /// A job was handed the CPU.
    fn job_dispatched(&mut self, _now: Instant, _job: JobId) {}

    /// The running job lost the CPU before completing its service.
    fn job_preempted(&mut self, _now: Instant, _job: JobId) {}

    /// MLFQ only: the running job exhausted its quantum and moved
    /// down to `level`.
    fn job_demoted(&mut self, _now: Instant, _job: JobId, _level: usize) {}

    /// A job received its full service.
    fn job_completed(&mut self, _now: Instant, _job: JobId) {}

    /// The CPU had nothing to run; the clock jumped from `from` to
    /// `until` (the next arrival).
    fn cpu_idle(&mut self, _from: Instant, _until: Instant) {}
}

impl SimObserver for () {}
