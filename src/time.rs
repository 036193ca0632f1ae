/// The simulators use a continuous time model.
pub type Time = f64;

/// Syntactic sugar to give a hint that a time value indicates a
/// point on the simulated timeline.
pub type Instant = Time;

/// Syntactic sugar to give a hint that a time value denotes an
/// interval length or an amount of processor service.
pub type Duration = Time;

/// Absolute slack below which a remaining quantity (service or
/// quantum slice) counts as exhausted. Absorbs floating-point
/// residue accumulated across variable-length steps.
pub const TOLERANCE: Time = 1e-5;

/// True if `remaining` is zero for scheduling purposes.
pub fn exhausted(remaining: Duration) -> bool {
    remaining <= TOLERANCE
}
