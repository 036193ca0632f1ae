/*! Discrete-event simulation of preemptive CPU scheduling policies

Two engines over a shared job model: preemptive
[Shortest-Remaining-Time-First][srtf] and a [Multi-Level Feedback
Queue][mlfq] with demotion-only feedback. Each engine consumes a
private copy of the job list, runs a deterministic next-event loop on
a single logical CPU, and yields an execution [trace][trace::Trace]
plus the completed job set, which the [metrics] calculator reduces to
aggregate figures for comparison. */

pub mod job;
pub mod metrics;
pub mod mlfq;
pub mod observe;
pub mod sim;
pub mod srtf;
pub mod time;
pub mod trace;
