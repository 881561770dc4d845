//! Optional external feasibility oracle.
//!
//! Some deployments have access to a third-party trip planner that can
//! confirm whether a specific station pair is still connected tonight.
//! The engine never needs it: it is a secondary signal a caller may
//! consult for a single candidate. Implementations do real I/O, so the
//! interface is async and every call is bounded by a caller-supplied
//! deadline — an elapsed deadline yields [`Feasibility::Unknown`],
//! never a hang.

use std::collections::HashMap;
use std::time::Duration;

use crate::domain::{ServiceMinute, StopId};

/// Outcome of asking the oracle about one station pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feasibility {
    /// A connection exists tonight.
    Feasible {
        departure: ServiceMinute,
        arrival: ServiceMinute,
        transfer_count: u32,
    },
    /// No connection exists tonight.
    Infeasible,
    /// The oracle could not answer in time (or at all).
    Unknown,
}

/// A source that can confirm single-pair feasibility.
pub trait FeasibilityProbe {
    /// Can `candidate` still be reached from `start`, departing no
    /// earlier than `depart_after`?
    fn check(
        &self,
        start: &StopId,
        candidate: &StopId,
        depart_after: ServiceMinute,
    ) -> impl Future<Output = Feasibility> + Send;
}

/// Run a probe with a hard deadline. Timing out is an `Unknown`
/// answer, not an error.
pub async fn check_within<P: FeasibilityProbe>(
    probe: &P,
    start: &StopId,
    candidate: &StopId,
    depart_after: ServiceMinute,
    deadline: Duration,
) -> Feasibility {
    match tokio::time::timeout(deadline, probe.check(start, candidate, depart_after)).await {
        Ok(answer) => answer,
        Err(_) => Feasibility::Unknown,
    }
}

/// Probe answering from a fixed table, for tests and offline runs.
#[derive(Debug, Default)]
pub struct MockProbe {
    answers: HashMap<(StopId, StopId), Feasibility>,
}

impl MockProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the answer for a start/candidate pair.
    pub fn insert(&mut self, start: StopId, candidate: StopId, answer: Feasibility) {
        self.answers.insert((start, candidate), answer);
    }
}

impl FeasibilityProbe for MockProbe {
    async fn check(
        &self,
        start: &StopId,
        candidate: &StopId,
        _depart_after: ServiceMinute,
    ) -> Feasibility {
        self.answers
            .get(&(start.clone(), candidate.clone()))
            .cloned()
            .unwrap_or(Feasibility::Unknown)
    }
}
