use crate::job::JobId;
use crate::mlfq::{self, Params, ParamsError, Quantum};
use crate::tests::{assert_trace, j, Event, EventLog};

fn two_levels(quantum: f64) -> Params {
    Params::new(vec![Quantum::Finite(quantum), Quantum::Unbounded]).unwrap()
}

#[test]
fn quantum_expiry_demotes_to_the_next_level() {
    let mut log = EventLog::default();
    let out = mlfq::simulate_with(&[j(1, 0.0, 12.0)], &two_levels(5.0), &mut log).unwrap();
    assert_trace(&out.trace, &[(1, 0.0, 5.0), (1, 5.0, 12.0)]);
    assert_eq!(out.completed[0].waiting_time(), Some(0.0));
    assert!(log.0.contains(&Event::Demoted(5.0, JobId(1), 1)));
}

#[test]
fn level_zero_arrival_preempts_a_lower_level_runner() {
    let out = mlfq::simulate(&[j(1, 0.0, 10.0), j(2, 3.0, 2.0)], &two_levels(2.0)).unwrap();
    // Job 1 is below the top level by t=3, so job 2's arrival cuts
    // its segment at 3 and runs 3..5; job 1 resumes afterwards.
    assert_trace(
        &out.trace,
        &[
            (1, 0.0, 2.0),
            (1, 2.0, 3.0),
            (2, 3.0, 5.0),
            (1, 5.0, 12.0),
        ],
    );
}

#[test]
fn arrival_does_not_preempt_a_level_zero_runner() {
    let mut log = EventLog::default();
    let out =
        mlfq::simulate_with(&[j(1, 0.0, 4.0), j(2, 1.0, 1.0)], &two_levels(5.0), &mut log).unwrap();
    assert_trace(&out.trace, &[(1, 0.0, 4.0), (2, 4.0, 5.0)]);
    assert!(!log
        .0
        .iter()
        .any(|e| matches!(e, Event::Preempted(_, _))));
}

#[test]
fn preempted_job_returns_to_the_front_of_its_level() {
    // Jobs 1 and 2 are both demoted to level 1; job 1 is running
    // from there when job 3 arrives. After job 3 finishes, job 1
    // must resume before its level-1 peer.
    let jobs = [j(1, 0.0, 6.0), j(2, 0.0, 6.0), j(3, 5.0, 1.0)];
    let out = mlfq::simulate(&jobs, &two_levels(2.0)).unwrap();
    assert_trace(
        &out.trace,
        &[
            (1, 0.0, 2.0),
            (2, 2.0, 4.0),
            (1, 4.0, 5.0),
            (3, 5.0, 6.0),
            (1, 6.0, 9.0),
            (2, 9.0, 13.0),
        ],
    );
}

#[test]
fn preempted_job_earns_a_fresh_slice_on_redispatch() {
    let params = Params::new(vec![
        Quantum::Finite(2.0),
        Quantum::Finite(3.0),
        Quantum::Unbounded,
    ])
    .unwrap();
    let out = mlfq::simulate(&[j(1, 0.0, 10.0), j(2, 3.0, 1.0)], &params).unwrap();
    // Job 1 had consumed 1 unit of its level-1 slice when preempted
    // at t=3; the re-dispatch at t=4 grants a full 3-unit slice, so
    // the next segment runs to t=7 rather than t=6.
    assert_trace(
        &out.trace,
        &[
            (1, 0.0, 2.0),
            (1, 2.0, 3.0),
            (2, 3.0, 4.0),
            (1, 4.0, 7.0),
            (1, 7.0, 11.0),
        ],
    );
}

#[test]
fn single_level_degenerates_to_round_robin() {
    // Demotion saturates at the last level, so one level with a
    // finite quantum is plain round-robin.
    let params = Params::new(vec![Quantum::Finite(2.0)]).unwrap();
    let out = mlfq::simulate(&[j(1, 0.0, 3.0), j(2, 0.0, 3.0)], &params).unwrap();
    assert_trace(
        &out.trace,
        &[
            (1, 0.0, 2.0),
            (2, 2.0, 4.0),
            (1, 4.0, 5.0),
            (2, 5.0, 6.0),
        ],
    );
}

#[test]
fn levels_are_never_promoted() {
    let params = Params::new(vec![
        Quantum::Finite(1.0),
        Quantum::Finite(1.0),
        Quantum::Unbounded,
    ])
    .unwrap();
    let mut log = EventLog::default();
    mlfq::simulate_with(&[j(1, 0.0, 5.0), j(2, 0.5, 4.0)], &params, &mut log).unwrap();
    for id in [JobId(1), JobId(2)] {
        let levels: Vec<usize> = log
            .0
            .iter()
            .filter_map(|e| match e {
                Event::Demoted(_, job, level) if *job == id => Some(*level),
                _ => None,
            })
            .collect();
        assert!(!levels.is_empty());
        assert!(levels.windows(2).all(|w| w[0] <= w[1]));
        assert!(levels.iter().all(|&l| l < params.levels()));
    }
}

#[test]
fn unbounded_last_level_runs_to_completion() {
    let mut log = EventLog::default();
    let out = mlfq::simulate_with(&[j(1, 0.0, 100.0)], &two_levels(1.0), &mut log).unwrap();
    assert_trace(&out.trace, &[(1, 0.0, 1.0), (1, 1.0, 101.0)]);
    let demotions = log
        .0
        .iter()
        .filter(|e| matches!(e, Event::Demoted(_, _, _)))
        .count();
    assert_eq!(demotions, 1);
}

#[test]
fn idle_interval_jumps_to_the_next_arrival() {
    let mut log = EventLog::default();
    let out =
        mlfq::simulate_with(&[j(1, 0.0, 1.0), j(2, 4.0, 1.0)], &two_levels(5.0), &mut log).unwrap();
    assert_trace(&out.trace, &[(1, 0.0, 1.0), (2, 4.0, 5.0)]);
    assert!(log.0.contains(&Event::Idle(1.0, 4.0)));
}

#[test]
fn quantum_table_is_validated() {
    assert_eq!(Params::new(vec![]), Err(ParamsError::NoLevels));
    assert_eq!(
        Params::new(vec![Quantum::Finite(0.0)]),
        Err(ParamsError::NonPositiveQuantum { level: 0 })
    );
    assert_eq!(
        Params::new(vec![Quantum::Unbounded, Quantum::Finite(1.0)]),
        Err(ParamsError::UnboundedNotLast { level: 0 })
    );
    let params = Params::new(vec![
        Quantum::Finite(5.0),
        Quantum::Finite(10.0),
        Quantum::Unbounded,
    ])
    .unwrap();
    assert_eq!(params.levels(), 3);
}
