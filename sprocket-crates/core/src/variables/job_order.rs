use std::collections::BTreeMap;

use crate::backend::Backend;
use crate::backend::BackendError;
use crate::backend::Literal;
use crate::containers::KeyedVec;
use crate::problem::JobId;

/// The single order in which every machine processes the jobs of a permutation problem.
///
/// The order is a circuit over a source node and one node per job: `first[j]` is the arc from
/// the source to job `j`, `last[j]` the arc from job `j` back to the source and `arc(i, j)` the
/// arc from job `i` to job `j`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobOrder {
    first: KeyedVec<JobId, Literal>,
    last: KeyedVec<JobId, Literal>,
    arcs: BTreeMap<(JobId, JobId), Literal>,
}

impl JobOrder {
    pub(crate) fn new<B: Backend + ?Sized>(
        backend: &mut B,
        jobs: impl Iterator<Item = JobId> + Clone,
    ) -> Result<JobOrder, BackendError> {
        let first = jobs
            .clone()
            .map(|job| backend.new_literal(&format!("first_{job}")))
            .collect::<Result<Vec<_>, _>>()?
            .into();
        let last = jobs
            .clone()
            .map(|job| backend.new_literal(&format!("last_{job}")))
            .collect::<Result<Vec<_>, _>>()?
            .into();

        let mut arcs = BTreeMap::new();
        for from in jobs.clone() {
            for to in jobs.clone().filter(|&to| to != from) {
                let literal = backend.new_literal(&format!("{from}_to_{to}"))?;
                let _ = arcs.insert((from, to), literal);
            }
        }

        Ok(JobOrder { first, last, arcs })
    }

    pub fn first(&self, job: JobId) -> Literal {
        self.first[job]
    }

    pub fn last(&self, job: JobId) -> Literal {
        self.last[job]
    }

    pub fn arc(&self, from: JobId, to: JobId) -> Option<Literal> {
        self.arcs.get(&(from, to)).copied()
    }

    /// Iterate over the arcs between distinct jobs, ordered by `(from, to)`.
    pub fn arcs(&self) -> impl Iterator<Item = (JobId, JobId, Literal)> + '_ {
        self.arcs.iter().map(|(&(from, to), &literal)| (from, to, literal))
    }

    /// Every literal of the order, the source arcs first.
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.first
            .iter()
            .chain(self.last.iter())
            .copied()
            .chain(self.arcs.values().copied())
    }
}
