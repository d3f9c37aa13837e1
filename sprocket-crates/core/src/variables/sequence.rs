use std::collections::BTreeSet;

use log::debug;

use crate::backend::Backend;
use crate::backend::BackendError;
use crate::backend::Literal;
use crate::compiler::ConfigurationError;
use crate::problem::ProblemData;
use crate::problem::Resource;
use crate::problem::ResourceId;
use crate::problem::TaskId;
use crate::topology;

/// Decides, before anything is allocated, which machines need a [`SequenceVar`].
///
/// A machine is sequenced when it has a nonzero setup time, when two tasks of a consecutive
/// constraint can both be processed on it, or when it is part of a same-sequence constraint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequencingPlan {
    machines: BTreeSet<ResourceId>,
}

impl SequencingPlan {
    pub fn new(data: &ProblemData) -> Result<SequencingPlan, ConfigurationError> {
        let mut machines = BTreeSet::new();

        for (resource, _) in data.resources().iter_with_keys() {
            if topology::setup_matrix(data, resource).is_none() {
                continue;
            }

            match &data.resources()[resource] {
                Resource::Machine(_) => {
                    let _ = machines.insert(resource);
                }
                Resource::Renewable(_) | Resource::NonRenewable(_) => {
                    debug!("Ignoring setup times on {resource}, which is not a machine");
                }
            }
        }

        for &(first, second) in data.constraints().consecutive() {
            for (_, _, shared) in topology::intersecting_modes(data, first, second) {
                machines.extend(
                    shared
                        .into_iter()
                        .filter(|&resource| data.resources()[resource].is_machine()),
                );
            }
        }

        for same_sequence in data.constraints().same_sequence() {
            for resource in [same_sequence.first_machine, same_sequence.second_machine] {
                if !data.resources()[resource].is_machine() {
                    return Err(ConfigurationError::SequencingOnNonMachine(resource));
                }
                let _ = machines.insert(resource);
            }
        }

        Ok(SequencingPlan { machines })
    }

    /// The sequenced machines, in ascending order.
    pub fn machines(&self) -> impl Iterator<Item = ResourceId> + '_ {
        self.machines.iter().copied()
    }
}

/// The order in which a machine processes its tasks.
///
/// For every ordered pair of distinct tasks which can use the machine there is an arc literal
/// meaning "the second task directly follows the first". Each task furthermore has a literal
/// for being the first and for being the last task on the machine, and the machine has a
/// literal for being empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceVar {
    resource: ResourceId,
    /// Sorted; the position of a task is its node in the circuit, offset by one.
    tasks: Vec<TaskId>,
    empty: Literal,
    first: Vec<Literal>,
    last: Vec<Literal>,
    /// `arcs[i][j]` for `i != j`; the diagonal is `None`.
    arcs: Vec<Vec<Option<Literal>>>,
}

impl SequenceVar {
    pub(crate) fn new<B: Backend + ?Sized>(
        backend: &mut B,
        resource: ResourceId,
        tasks: Vec<TaskId>,
    ) -> Result<SequenceVar, BackendError> {
        let empty = backend.new_literal(&format!("{resource}_empty"))?;

        let first = tasks
            .iter()
            .map(|task| backend.new_literal(&format!("{resource}_first_{task}")))
            .collect::<Result<Vec<_>, _>>()?;
        let last = tasks
            .iter()
            .map(|task| backend.new_literal(&format!("{resource}_last_{task}")))
            .collect::<Result<Vec<_>, _>>()?;

        let mut arcs = Vec::with_capacity(tasks.len());
        for &from in &tasks {
            let mut row = Vec::with_capacity(tasks.len());
            for &to in &tasks {
                if from == to {
                    row.push(None);
                } else {
                    let name = format!("{resource}_{from}_to_{to}");
                    row.push(Some(backend.new_literal(&name)?));
                }
            }
            arcs.push(row);
        }

        Ok(SequenceVar {
            resource,
            tasks,
            empty,
            first,
            last,
            arcs,
        })
    }

    pub fn resource(&self) -> ResourceId {
        self.resource
    }

    /// The tasks which can be processed on the machine, in ascending order.
    pub fn tasks(&self) -> &[TaskId] {
        &self.tasks
    }

    /// True when no task is processed on the machine.
    pub fn empty(&self) -> Literal {
        self.empty
    }

    /// The position of `task` in [`SequenceVar::tasks`].
    pub fn position(&self, task: TaskId) -> Option<usize> {
        self.tasks.binary_search(&task).ok()
    }

    pub fn first(&self, task: TaskId) -> Option<Literal> {
        self.position(task).map(|position| self.first[position])
    }

    pub fn last(&self, task: TaskId) -> Option<Literal> {
        self.position(task).map(|position| self.last[position])
    }

    /// The literal for `to` directly following `from`, if both tasks can use the machine and
    /// they are distinct.
    pub fn arc(&self, from: TaskId, to: TaskId) -> Option<Literal> {
        let from = self.position(from)?;
        let to = self.position(to)?;
        self.arcs[from][to]
    }

    /// Iterate over all `(from, to, literal)` arcs between distinct tasks.
    pub fn arcs(&self) -> impl Iterator<Item = (TaskId, TaskId, Literal)> + '_ {
        self.arcs.iter().enumerate().flat_map(move |(from, row)| {
            row.iter().enumerate().filter_map(move |(to, literal)| {
                literal.map(|literal| (self.tasks[from], self.tasks[to], literal))
            })
        })
    }
}
