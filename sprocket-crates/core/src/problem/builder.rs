use std::collections::BTreeMap;

use log::debug;

use super::Constraints;
use super::Job;
use super::JobId;
use super::Mode;
use super::ModeDependency;
use super::ModeId;
use super::Objective;
use super::ProblemData;
use super::ProblemError;
use super::Resource;
use super::ResourceId;
use super::SameSequence;
use super::Task;
use super::TaskId;
use super::TimingConstraint;
use super::TimingKind;
use crate::containers::HashSet;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;

/// Incrementally describes a scheduling problem.
///
/// # Example
/// ```
/// # use sprocket_core::problem::ProblemBuilder;
/// # use sprocket_core::problem::Task;
/// let mut builder = ProblemBuilder::default();
///
/// let machine = builder.add_machine();
/// let first = builder.add_task(Task::new());
/// let second = builder.add_task(Task::new());
///
/// let _ = builder.add_mode(first, 3, [(machine, 0)]);
/// let _ = builder.add_mode(second, 2, [(machine, 0)]);
/// builder.add_end_before_start(first, second, 0);
///
/// let data = builder.build().expect("valid problem");
/// assert_eq!(data.num_tasks(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ProblemBuilder {
    jobs: KeyedVec<JobId, Job>,
    tasks: KeyedVec<TaskId, Task>,
    modes: KeyedVec<ModeId, Mode>,
    resources: KeyedVec<ResourceId, Resource>,
    constraints: Constraints,
    setup_times: BTreeMap<(ResourceId, TaskId, TaskId), i32>,
    objective: Objective,
    permutation: bool,
}

impl ProblemBuilder {
    pub fn add_job(&mut self, job: Job) -> JobId {
        self.jobs.push(job)
    }

    pub fn add_task(&mut self, task: Task) -> TaskId {
        self.tasks.push(task)
    }

    pub fn add_resource(&mut self, resource: Resource) -> ResourceId {
        self.resources.push(resource)
    }

    pub fn add_machine(&mut self) -> ResourceId {
        self.add_resource(Resource::machine())
    }

    pub fn add_renewable(&mut self, capacity: i32) -> ResourceId {
        self.add_resource(Resource::renewable(capacity))
    }

    pub fn add_non_renewable(&mut self, capacity: i32) -> ResourceId {
        self.add_resource(Resource::non_renewable(capacity))
    }

    /// Add a mode for `task` which takes `duration` and places the given demand on each of the
    /// given resources.
    pub fn add_mode(
        &mut self,
        task: TaskId,
        duration: i32,
        requirements: impl IntoIterator<Item = (ResourceId, i32)>,
    ) -> ModeId {
        let (resources, demands) = requirements.into_iter().unzip();
        self.modes.push(Mode {
            task,
            duration,
            resources,
            demands,
        })
    }

    pub fn add_timing_constraint(&mut self, constraint: TimingConstraint) {
        self.constraints.timing.push(constraint);
    }

    /// `start(first) + delay <= start(second)`
    pub fn add_start_before_start(&mut self, first: TaskId, second: TaskId, delay: i32) {
        self.add_timing(first, second, delay, TimingKind::StartBeforeStart);
    }

    /// `start(first) + delay <= end(second)`
    pub fn add_start_before_end(&mut self, first: TaskId, second: TaskId, delay: i32) {
        self.add_timing(first, second, delay, TimingKind::StartBeforeEnd);
    }

    /// `end(first) + delay <= start(second)`
    pub fn add_end_before_start(&mut self, first: TaskId, second: TaskId, delay: i32) {
        self.add_timing(first, second, delay, TimingKind::EndBeforeStart);
    }

    /// `end(first) + delay <= end(second)`
    pub fn add_end_before_end(&mut self, first: TaskId, second: TaskId, delay: i32) {
        self.add_timing(first, second, delay, TimingKind::EndBeforeEnd);
    }

    fn add_timing(&mut self, first: TaskId, second: TaskId, delay: i32, kind: TimingKind) {
        self.add_timing_constraint(TimingConstraint {
            first,
            second,
            delay,
            kind,
        });
    }

    pub fn add_identical_resources(&mut self, first: TaskId, second: TaskId) {
        self.constraints.identical_resources.push((first, second));
    }

    pub fn add_different_resources(&mut self, first: TaskId, second: TaskId) {
        self.constraints.different_resources.push((first, second));
    }

    pub fn add_consecutive(&mut self, first: TaskId, second: TaskId) {
        self.constraints.consecutive.push((first, second));
    }

    pub fn add_same_sequence(
        &mut self,
        first_machine: ResourceId,
        second_machine: ResourceId,
        first_tasks: Vec<TaskId>,
        second_tasks: Vec<TaskId>,
    ) {
        self.constraints.same_sequence.push(SameSequence {
            first_machine,
            second_machine,
            first_tasks,
            second_tasks,
        });
    }

    pub fn add_mode_dependency(&mut self, mode: ModeId, dependents: Vec<ModeId>) {
        self.constraints
            .mode_dependencies
            .push(ModeDependency { mode, dependents });
    }

    /// Set the time needed on `resource` between the end of `from` and the start of `to`, when
    /// `to` is processed directly after `from`. A later call for the same triple overrides the
    /// earlier one.
    pub fn add_setup_time(&mut self, resource: ResourceId, from: TaskId, to: TaskId, duration: i32) {
        let _ = self.setup_times.insert((resource, from, to), duration);
    }

    pub fn set_permutation(&mut self, permutation: bool) {
        self.permutation = permutation;
    }

    pub fn set_objective(&mut self, objective: impl Into<Objective>) {
        self.objective = objective.into();
    }

    /// Validate the problem and freeze it.
    pub fn build(self) -> Result<ProblemData, ProblemError> {
        self.validate()?;

        let ProblemBuilder {
            mut jobs,
            tasks,
            modes,
            resources,
            constraints,
            mut setup_times,
            objective,
            permutation,
        } = self;

        for (task_id, task) in tasks.iter_with_keys() {
            if let Some(job) = task.job {
                jobs[job].tasks.push(task_id);
            }
        }

        setup_times.retain(|_, duration| *duration != 0);

        debug!(
            "Built problem with {} jobs, {} tasks, {} modes and {} resources",
            jobs.len(),
            tasks.len(),
            modes.len(),
            resources.len()
        );

        Ok(ProblemData {
            jobs,
            tasks,
            modes,
            resources,
            constraints,
            setup_times,
            objective,
            permutation,
        })
    }

    fn validate(&self) -> Result<(), ProblemError> {
        for (job_id, job) in self.jobs.iter_with_keys() {
            if job.weight < 0 {
                return Err(ProblemError::NegativeJobWeight(job_id));
            }
            if job.deadline.is_some_and(|deadline| deadline < job.release_date) {
                return Err(ProblemError::EmptyJobWindow(job_id));
            }
        }

        for (resource_id, resource) in self.resources.iter_with_keys() {
            if resource.capacity() < 0 {
                return Err(ProblemError::NegativeCapacity(resource_id));
            }
        }

        for (task_id, task) in self.tasks.iter_with_keys() {
            if let Some(job) = task.job {
                self.check_job(job)?;
            }

            let windows = [
                (task.earliest_start, task.latest_start),
                (task.earliest_end, task.latest_end),
            ];
            if windows
                .iter()
                .any(|window| matches!(window, (Some(earliest), Some(latest)) if earliest > latest))
            {
                return Err(ProblemError::EmptyTimeWindow(task_id));
            }

            // A task without a job is released at time zero.
            let job = task.job.map(|job| &self.jobs[job]);
            let release = job.map_or(0, |job| job.release_date);
            let deadline = job.and_then(|job| job.deadline);
            let latest_start_before_release = task
                .latest_start
                .is_some_and(|latest| latest < task.earliest_start.unwrap_or(release).max(release));
            let end_lower = task.earliest_end.unwrap_or(release).max(release);
            let latest_end_before_lower = [task.latest_end, deadline]
                .into_iter()
                .flatten()
                .any(|latest| latest < end_lower);
            if latest_start_before_release || latest_end_before_lower {
                return Err(match task.job {
                    Some(job) => ProblemError::TaskOutsideJobWindow { task: task_id, job },
                    None => ProblemError::EmptyTimeWindow(task_id),
                });
            }
        }

        let mut tasks_with_modes: HashSet<TaskId> = HashSet::default();
        for (mode_id, mode) in self.modes.iter_with_keys() {
            self.check_task(mode.task)?;
            let _ = tasks_with_modes.insert(mode.task);

            if mode.duration < 0 {
                return Err(ProblemError::NegativeDuration(mode_id));
            }
            if mode.resources.is_empty() {
                return Err(ProblemError::ModeWithoutResources(mode_id));
            }
            if mode.resources.len() != mode.demands.len() {
                return Err(ProblemError::DemandsMismatch {
                    mode: mode_id,
                    resources: mode.resources.len(),
                    demands: mode.demands.len(),
                });
            }

            let mut seen: HashSet<ResourceId> = HashSet::default();
            for (resource, demand) in mode.requirements() {
                self.check_resource(resource)?;

                if !seen.insert(resource) {
                    return Err(ProblemError::DuplicateModeResource {
                        mode: mode_id,
                        resource,
                    });
                }
                if demand < 0 {
                    return Err(ProblemError::NegativeDemand {
                        mode: mode_id,
                        resource,
                    });
                }
            }
        }

        if let Some(task) = self
            .tasks
            .keys()
            .find(|task| !tasks_with_modes.contains(task))
        {
            return Err(ProblemError::TaskWithoutModes(task));
        }

        self.validate_constraints()?;

        for (&(resource, from, to), &duration) in &self.setup_times {
            self.check_resource(resource)?;
            self.check_task(from)?;
            self.check_task(to)?;

            if duration < 0 {
                return Err(ProblemError::NegativeSetupTime { resource, from, to });
            }
        }

        if self.objective.weights().iter().any(|weight| *weight < 0) {
            return Err(ProblemError::NegativeObjectiveWeight);
        }

        Ok(())
    }

    fn validate_constraints(&self) -> Result<(), ProblemError> {
        let constraints = &self.constraints;

        for timing in &constraints.timing {
            self.check_task(timing.first)?;
            self.check_task(timing.second)?;
        }

        for &(first, second) in constraints
            .identical_resources
            .iter()
            .chain(&constraints.different_resources)
            .chain(&constraints.consecutive)
        {
            self.check_task(first)?;
            self.check_task(second)?;
        }

        for same_sequence in &constraints.same_sequence {
            self.check_resource(same_sequence.first_machine)?;
            self.check_resource(same_sequence.second_machine)?;

            if same_sequence.first_tasks.len() != same_sequence.second_tasks.len() {
                return Err(ProblemError::SameSequenceLengthMismatch {
                    first: same_sequence.first_tasks.len(),
                    second: same_sequence.second_tasks.len(),
                });
            }

            for &task in same_sequence
                .first_tasks
                .iter()
                .chain(&same_sequence.second_tasks)
            {
                self.check_task(task)?;
            }
        }

        for dependency in &constraints.mode_dependencies {
            for &mode in std::iter::once(&dependency.mode).chain(&dependency.dependents) {
                if mode.index() >= self.modes.len() {
                    return Err(ProblemError::UnknownMode(mode));
                }
            }
        }

        Ok(())
    }

    fn check_task(&self, task: TaskId) -> Result<(), ProblemError> {
        if task.index() < self.tasks.len() {
            Ok(())
        } else {
            Err(ProblemError::UnknownTask(task))
        }
    }

    fn check_job(&self, job: JobId) -> Result<(), ProblemError> {
        if job.index() < self.jobs.len() {
            Ok(())
        } else {
            Err(ProblemError::UnknownJob(job))
        }
    }

    fn check_resource(&self, resource: ResourceId) -> Result<(), ProblemError> {
        if resource.index() < self.resources.len() {
            Ok(())
        } else {
            Err(ProblemError::UnknownResource(resource))
        }
    }
}
