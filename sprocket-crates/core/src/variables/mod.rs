//! The decision variables of a compiled model.
//!
//! All variables are created by [`Variables::new`] before a single constraint is posted. Which
//! machines receive a [`SequenceVar`] is decided up front by a [`SequencingPlan`]; asking for
//! the sequence of any other resource is an error rather than a reason to create one.

mod bundles;
mod job_order;
mod sequence;

use std::collections::BTreeMap;

pub use bundles::*;
pub use job_order::*;
use log::debug;
pub use sequence::*;

use crate::backend::Backend;
use crate::backend::BackendError;
use crate::backend::Interval;
use crate::compiler::CompileError;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::problem::JobId;
use crate::problem::ModeId;
use crate::problem::ProblemData;
use crate::problem::ResourceId;
use crate::problem::TaskId;
use crate::topology;

/// Every variable bundle of a compiled model, indexed by the problem entity it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variables {
    jobs: KeyedVec<JobId, JobVar>,
    tasks: KeyedVec<TaskId, TaskVar>,
    modes: KeyedVec<ModeId, ModeVar>,
    assignments: BTreeMap<(TaskId, ResourceId), AssignVar>,
    resource_tasks: KeyedVec<ResourceId, Vec<TaskId>>,
    sequences: KeyedVec<ResourceId, Option<SequenceVar>>,
}

impl Variables {
    /// Allocate the variables of `data`, with every time point bounded by `horizon`.
    pub fn new<B: Backend + ?Sized>(
        data: &ProblemData,
        backend: &mut B,
        horizon: i32,
        plan: &SequencingPlan,
    ) -> Result<Variables, BackendError> {
        let jobs = data
            .jobs()
            .iter_with_keys()
            .map(|(job_id, job)| -> Result<JobVar, BackendError> {
                let end_upper = job.deadline().map_or(horizon, |deadline| deadline.min(horizon));
                Ok(JobVar {
                    start: backend.new_integer(
                        job.release_date(),
                        horizon,
                        &format!("{job_id}_start"),
                    )?,
                    end: backend.new_integer(
                        job.release_date(),
                        end_upper,
                        &format!("{job_id}_end"),
                    )?,
                })
            })
            .collect::<Result<KeyedVec<JobId, JobVar>, _>>()?;

        let task_modes = topology::task_modes(data);

        let mut tasks: KeyedVec<TaskId, TaskVar> = KeyedVec::default();
        for (task_id, task) in data.tasks().iter_with_keys() {
            let job = task.job().map(|job| &data.jobs()[job]);
            let durations = task_modes[task_id]
                .iter()
                .map(|&mode| data.modes()[mode].duration());
            let min_duration = durations.clone().min().unwrap_or(0);
            let max_duration = if task.has_fixed_duration() {
                durations.max().unwrap_or(0)
            } else {
                horizon
            };

            let release = job.map_or(0, |job| job.release_date());
            let deadline = job.and_then(|job| job.deadline());

            let start = backend.new_integer(
                task.earliest_start().map_or(release, |earliest| earliest.max(release)),
                task.latest_start().map_or(horizon, |latest| latest.min(horizon)),
                &format!("{task_id}_start"),
            )?;
            let end = backend.new_integer(
                task.earliest_end().unwrap_or(0).max(release),
                [task.latest_end(), deadline]
                    .into_iter()
                    .flatten()
                    .fold(horizon, i32::min),
                &format!("{task_id}_end"),
            )?;
            let duration =
                backend.new_integer(min_duration, max_duration, &format!("{task_id}_duration"))?;
            let interval = backend.new_interval(
                Interval {
                    start,
                    duration,
                    end,
                    presence: None,
                },
                &format!("{task_id}_interval"),
            )?;

            let _ = tasks.push(TaskVar {
                start,
                end,
                duration,
                interval,
            });
        }

        let mut modes: KeyedVec<ModeId, ModeVar> = KeyedVec::default();
        for (mode_id, mode) in data.modes().iter_with_keys() {
            let task = tasks[mode.task()];
            let presence = backend.new_literal(&format!("{mode_id}_present"))?;
            let interval = backend.new_interval(
                Interval {
                    start: task.start,
                    duration: task.duration,
                    end: task.end,
                    presence: Some(presence),
                },
                &format!("{mode_id}_interval"),
            )?;

            let _ = modes.push(ModeVar { presence, interval });
        }

        let mut assignments = BTreeMap::new();
        for (task_id, task_var) in tasks.iter_with_keys() {
            let mut max_demands: BTreeMap<ResourceId, i32> = BTreeMap::new();
            for &mode in &task_modes[task_id] {
                for (resource, demand) in data.modes()[mode].requirements() {
                    let max_demand = max_demands.entry(resource).or_insert(0);
                    *max_demand = (*max_demand).max(demand);
                }
            }

            for (resource, max_demand) in max_demands {
                let name = format!("{task_id}_on_{resource}");
                let presence = backend.new_literal(&format!("{name}_present"))?;
                let demand = backend.new_integer(0, max_demand, &format!("{name}_demand"))?;
                let interval = backend.new_interval(
                    Interval {
                        start: task_var.start,
                        duration: task_var.duration,
                        end: task_var.end,
                        presence: Some(presence),
                    },
                    &format!("{name}_interval"),
                )?;

                let _ = assignments.insert(
                    (task_id, resource),
                    AssignVar {
                        presence,
                        demand,
                        interval,
                        max_demand,
                    },
                );
            }
        }

        let resource_tasks = topology::resource_tasks(data);

        let mut sequences: KeyedVec<ResourceId, Option<SequenceVar>> =
            KeyedVec::from_fn(data.num_resources(), |_| None);
        for machine in plan.machines() {
            let sequence = SequenceVar::new(&mut *backend, machine, resource_tasks[machine].clone())?;
            debug!(
                "Allocated sequence variables for {machine} over {} tasks",
                sequence.tasks().len()
            );
            sequences[machine] = Some(sequence);
        }

        Ok(Variables {
            jobs,
            tasks,
            modes,
            assignments,
            resource_tasks,
            sequences,
        })
    }

    pub fn job_var(&self, job: JobId) -> JobVar {
        self.jobs[job]
    }

    pub fn task_var(&self, task: TaskId) -> TaskVar {
        self.tasks[task]
    }

    pub fn mode_var(&self, mode: ModeId) -> ModeVar {
        self.modes[mode]
    }

    pub fn job_vars(&self) -> &KeyedVec<JobId, JobVar> {
        &self.jobs
    }

    pub fn task_vars(&self) -> &KeyedVec<TaskId, TaskVar> {
        &self.tasks
    }

    pub fn mode_vars(&self) -> &KeyedVec<ModeId, ModeVar> {
        &self.modes
    }

    /// The assignment of `task` to `resource`, if some mode of the task uses the resource.
    pub fn assign_var(&self, task: TaskId, resource: ResourceId) -> Option<AssignVar> {
        self.assignments.get(&(task, resource)).copied()
    }

    /// The assignments of every task which can use `resource`, ordered by task.
    pub fn assignments_of_resource(
        &self,
        resource: ResourceId,
    ) -> impl Iterator<Item = (TaskId, AssignVar)> + '_ {
        self.resource_tasks[resource]
            .iter()
            .map(move |&task| (task, self.assignments[&(task, resource)]))
    }

    /// The assignments of `task`, ordered by resource.
    pub fn assignments_of_task(
        &self,
        task: TaskId,
    ) -> impl Iterator<Item = (ResourceId, AssignVar)> + '_ {
        self.assignments
            .range((task, ResourceId::create_from_index(0))..)
            .take_while(move |((candidate, _), _)| *candidate == task)
            .map(|(&(_, resource), &assign)| (resource, assign))
    }

    /// Iterate over every `((task, resource), assignment)` pair.
    pub fn assignments(&self) -> impl Iterator<Item = ((TaskId, ResourceId), AssignVar)> + '_ {
        self.assignments.iter().map(|(&key, &assign)| (key, assign))
    }

    /// The sequence of `resource`, which exists only when the [`SequencingPlan`] required it.
    pub fn sequence_var(&self, resource: ResourceId) -> Result<&SequenceVar, CompileError> {
        self.sequences[resource]
            .as_ref()
            .ok_or(CompileError::MissingSequenceVariables(resource))
    }

    /// Iterate over the allocated sequences, ordered by resource.
    pub fn sequence_vars(&self) -> impl Iterator<Item = &SequenceVar> + '_ {
        self.sequences.iter().flatten()
    }
}
