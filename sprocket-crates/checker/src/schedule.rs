use sprocket_core::containers::KeyedVec;
use sprocket_core::problem::JobId;
use sprocket_core::problem::ModeId;
use sprocket_core::problem::ProblemData;
use sprocket_core::problem::TaskId;
use sprocket_core::CompiledModel;

use crate::Assignment;

/// The mode and timing chosen for a single task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScheduledTask {
    pub mode: ModeId,
    pub start: i32,
    pub duration: i32,
}

impl ScheduledTask {
    pub fn end(&self) -> i32 {
        self.start + self.duration
    }
}

/// A schedule for a compiled problem from which the value of every compiled variable follows.
///
/// Sequences are ordered by start time, the permutation by job start and the objective
/// components are computed from the schedule. The resulting [`Assignment`] is the one a solver
/// would report if the schedule were feasible, which makes it suitable for checking whether the
/// compiled model accepts exactly the schedules it should.
#[derive(Clone, Debug)]
pub struct ScheduleCandidate<'a> {
    data: &'a ProblemData,
    compiled: &'a CompiledModel,
    tasks: KeyedVec<TaskId, ScheduledTask>,
}

impl<'a> ScheduleCandidate<'a> {
    /// Create a candidate from a `(mode, start)` pair per task, in task order. Every task takes
    /// the duration of its mode.
    pub fn new(
        data: &'a ProblemData,
        compiled: &'a CompiledModel,
        selection: impl IntoIterator<Item = (ModeId, i32)>,
    ) -> ScheduleCandidate<'a> {
        let tasks = selection
            .into_iter()
            .map(|(mode, start)| ScheduledTask {
                mode,
                start,
                duration: data.modes()[mode].duration(),
            })
            .collect();

        ScheduleCandidate {
            data,
            compiled,
            tasks,
        }
    }

    /// Override the duration of `task`, which is only meaningful for tasks without a fixed
    /// duration.
    pub fn with_duration(mut self, task: TaskId, duration: i32) -> ScheduleCandidate<'a> {
        self.tasks[task].duration = duration;
        self
    }

    pub fn task(&self, task: TaskId) -> ScheduledTask {
        self.tasks[task]
    }

    /// The span `(start, end)` of `job`. A job without tasks is a point at its release date.
    pub fn job_span(&self, job: JobId) -> (i32, i32) {
        let job_data = &self.data.jobs()[job];
        let tasks = job_data.tasks().iter().map(|&task| self.tasks[task]);

        let start = tasks.clone().map(|task| task.start).min();
        let end = tasks.map(|task| task.end()).max();
        match (start, end) {
            (Some(start), Some(end)) => (start, end),
            _ => (job_data.release_date(), job_data.release_date()),
        }
    }

    pub fn makespan(&self) -> i32 {
        self.tasks.iter().map(ScheduledTask::end).max().unwrap_or(0)
    }

    pub fn into_assignment(self) -> Assignment {
        let mut assignment = Assignment::default();
        self.assign_tasks(&mut assignment);
        self.assign_sequences(&mut assignment);
        self.assign_job_order(&mut assignment);
        self.assign_objective(&mut assignment);
        assignment
    }

    fn assign_tasks(&self, assignment: &mut Assignment) {
        let variables = &self.compiled.variables;

        for (task_id, task) in self.tasks.iter_with_keys() {
            let task_var = variables.task_var(task_id);
            assignment.set_integer(task_var.start, task.start);
            assignment.set_integer(task_var.duration, task.duration);
            assignment.set_integer(task_var.end, task.end());
        }

        for (mode_id, mode_var) in variables.mode_vars().iter_with_keys() {
            let task = self.data.modes()[mode_id].task();
            assignment.set_literal(mode_var.presence, self.tasks[task].mode == mode_id);
        }

        for ((task, resource), assign) in variables.assignments() {
            let demand = self.data.modes()[self.tasks[task].mode].demand_for(resource);
            assignment.set_literal(assign.presence, demand.is_some());
            assignment.set_integer(assign.demand, demand.unwrap_or(0));
        }

        for (job, job_var) in variables.job_vars().iter_with_keys() {
            let (start, end) = self.job_span(job);
            assignment.set_integer(job_var.start, start);
            assignment.set_integer(job_var.end, end);
        }
    }

    fn assign_sequences(&self, assignment: &mut Assignment) {
        for sequence in self.compiled.variables.sequence_vars() {
            let mut processed = sequence
                .tasks()
                .iter()
                .copied()
                .filter(|&task| {
                    self.data.modes()[self.tasks[task].mode].uses(sequence.resource())
                })
                .collect::<Vec<_>>();
            processed.sort_by_key(|&task| (self.tasks[task].start, self.tasks[task].end(), task));

            assignment.set_literal(sequence.empty(), processed.is_empty());
            for &task in sequence.tasks() {
                if let Some(first) = sequence.first(task) {
                    assignment.set_literal(first, processed.first() == Some(&task));
                }
                if let Some(last) = sequence.last(task) {
                    assignment.set_literal(last, processed.last() == Some(&task));
                }
            }
            for (from, to, literal) in sequence.arcs() {
                let follows = processed
                    .windows(2)
                    .any(|pair| pair[0] == from && pair[1] == to);
                assignment.set_literal(literal, follows);
            }
        }
    }

    fn assign_job_order(&self, assignment: &mut Assignment) {
        let Some(job_order) = &self.compiled.job_order else {
            return;
        };

        let mut jobs = self.data.jobs().keys().collect::<Vec<_>>();
        jobs.sort_by_key(|&job| (self.job_span(job).0, job));

        for &job in &jobs {
            assignment.set_literal(job_order.first(job), jobs.first() == Some(&job));
            assignment.set_literal(job_order.last(job), jobs.last() == Some(&job));
        }
        for (from, to, literal) in job_order.arcs() {
            let follows = jobs.windows(2).any(|pair| pair[0] == from && pair[1] == to);
            assignment.set_literal(literal, follows);
        }
    }

    fn assign_objective(&self, assignment: &mut Assignment) {
        let Some(objective_vars) = &self.compiled.objective else {
            return;
        };
        let objective = self.data.objective();
        let mut value: i64 = 0;

        if let Some(makespan) = objective_vars.makespan {
            assignment.set_integer(makespan, self.makespan());
            value += i64::from(objective.weight_makespan) * i64::from(self.makespan());
        }
        if let Some(zero) = objective_vars.zero {
            assignment.set_integer(zero, 0);
        }

        for (job_id, job) in self.data.jobs().iter_with_keys() {
            let (_, end) = self.job_span(job_id);
            let weight = i64::from(job.weight());
            value += i64::from(objective.weight_total_flow_time)
                * weight
                * i64::from(end - job.release_date());
        }

        let mut max_tardiness = 0;
        for (&job_id, due_date_vars) in &objective_vars.due_dates {
            let job = &self.data.jobs()[job_id];
            let Some(due_date) = job.due_date() else {
                continue;
            };
            let (_, end) = self.job_span(job_id);
            let lateness = end - due_date;
            let tardiness = lateness.max(0);
            let earliness = tardiness - lateness;

            assignment.set_integer(due_date_vars.lateness, lateness);
            assignment.set_integer(due_date_vars.tardiness, tardiness);
            assignment.set_integer(due_date_vars.earliness, earliness);

            let weight = i64::from(job.weight());
            value += i64::from(objective.weight_total_tardiness) * weight * i64::from(tardiness);
            value += i64::from(objective.weight_total_earliness) * weight * i64::from(earliness);
            max_tardiness = max_tardiness.max(tardiness);
        }

        if let Some(variable) = objective_vars.max_tardiness {
            assignment.set_integer(variable, max_tardiness);
            value += i64::from(objective.weight_max_tardiness) * i64::from(max_tardiness);
        }

        assignment.set_integer(
            objective_vars.value,
            i32::try_from(value).unwrap_or(i32::MAX),
        );
    }
}
