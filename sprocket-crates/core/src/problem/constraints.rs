//! The side constraints of a problem, on top of the implicit mode selection and resource
//! constraints.

use super::ModeId;
use super::ResourceId;
use super::TaskId;

/// Which endpoints of the two tasks a [`TimingConstraint`] relates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimingKind {
    StartBeforeStart,
    StartBeforeEnd,
    EndBeforeStart,
    EndBeforeEnd,
}

/// `endpoint(first) + delay <= endpoint(second)`, where the endpoints are given by the
/// [`TimingKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimingConstraint {
    pub first: TaskId,
    pub second: TaskId,
    pub delay: i32,
    pub kind: TimingKind,
}

/// The relative order of `first_tasks` on `first_machine` is the same as the relative order of
/// `second_tasks` on `second_machine`, where the tasks correspond position-wise.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SameSequence {
    pub first_machine: ResourceId,
    pub second_machine: ResourceId,
    pub first_tasks: Vec<TaskId>,
    pub second_tasks: Vec<TaskId>,
}

/// If `mode` is selected, then at least one of `dependents` is selected as well.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModeDependency {
    pub mode: ModeId,
    pub dependents: Vec<ModeId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Constraints {
    pub(crate) timing: Vec<TimingConstraint>,
    pub(crate) identical_resources: Vec<(TaskId, TaskId)>,
    pub(crate) different_resources: Vec<(TaskId, TaskId)>,
    pub(crate) consecutive: Vec<(TaskId, TaskId)>,
    pub(crate) same_sequence: Vec<SameSequence>,
    pub(crate) mode_dependencies: Vec<ModeDependency>,
}

impl Constraints {
    pub fn timing(&self) -> &[TimingConstraint] {
        &self.timing
    }

    /// Pairs of tasks whose selected modes must use the same set of resources.
    pub fn identical_resources(&self) -> &[(TaskId, TaskId)] {
        &self.identical_resources
    }

    /// Pairs of tasks whose selected modes may not share a resource.
    pub fn different_resources(&self) -> &[(TaskId, TaskId)] {
        &self.different_resources
    }

    /// Pairs of tasks where the second directly follows the first on every machine they share.
    pub fn consecutive(&self) -> &[(TaskId, TaskId)] {
        &self.consecutive
    }

    pub fn same_sequence(&self) -> &[SameSequence] {
        &self.same_sequence
    }

    pub fn mode_dependencies(&self) -> &[ModeDependency] {
        &self.mode_dependencies
    }
}
