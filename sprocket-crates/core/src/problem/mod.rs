//! The description of a scheduling problem.
//!
//! A [`ProblemData`] is created through a [`ProblemBuilder`], which validates it, and is
//! read-only afterwards. The compiler relies on the validation; it does not check the data
//! again.

mod builder;
mod constraints;
mod error;
mod job;
mod mode;
mod objective;
mod resource;
mod task;

use std::collections::BTreeMap;

pub use builder::*;
pub use constraints::*;
pub use error::*;
pub use job::*;
pub use mode::*;
pub use objective::*;
pub use resource::*;
pub use task::*;

use crate::containers::storage_key;
use crate::containers::KeyedVec;

storage_key!(
    /// Identifies a [`Job`] in a [`ProblemData`].
    JobId,
    "job"
);
storage_key!(
    /// Identifies a [`Task`] in a [`ProblemData`].
    TaskId,
    "task"
);
storage_key!(
    /// Identifies a [`Mode`] in a [`ProblemData`].
    ModeId,
    "mode"
);
storage_key!(
    /// Identifies a [`Resource`] in a [`ProblemData`].
    ResourceId,
    "resource"
);

/// An immutable, validated scheduling problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProblemData {
    pub(crate) jobs: KeyedVec<JobId, Job>,
    pub(crate) tasks: KeyedVec<TaskId, Task>,
    pub(crate) modes: KeyedVec<ModeId, Mode>,
    pub(crate) resources: KeyedVec<ResourceId, Resource>,
    pub(crate) constraints: Constraints,
    /// Only nonzero setup times are stored.
    pub(crate) setup_times: BTreeMap<(ResourceId, TaskId, TaskId), i32>,
    pub(crate) objective: Objective,
    pub(crate) permutation: bool,
}

impl ProblemData {
    pub fn jobs(&self) -> &KeyedVec<JobId, Job> {
        &self.jobs
    }

    pub fn tasks(&self) -> &KeyedVec<TaskId, Task> {
        &self.tasks
    }

    pub fn modes(&self) -> &KeyedVec<ModeId, Mode> {
        &self.modes
    }

    pub fn resources(&self) -> &KeyedVec<ResourceId, Resource> {
        &self.resources
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Whether every machine has to process the jobs in the same order.
    pub fn is_permutation(&self) -> bool {
        self.permutation
    }

    pub fn num_jobs(&self) -> usize {
        self.jobs.len()
    }

    pub fn num_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn num_modes(&self) -> usize {
        self.modes.len()
    }

    pub fn num_resources(&self) -> usize {
        self.resources.len()
    }

    /// The setup time needed on `resource` when `to` directly follows `from`.
    pub fn setup_time(&self, resource: ResourceId, from: TaskId, to: TaskId) -> i32 {
        self.setup_times
            .get(&(resource, from, to))
            .copied()
            .unwrap_or(0)
    }

    /// Iterate over the nonzero setup times, ordered by resource.
    pub fn setup_times(&self) -> impl Iterator<Item = ((ResourceId, TaskId, TaskId), i32)> + '_ {
        self.setup_times.iter().map(|(key, value)| (*key, *value))
    }
}
