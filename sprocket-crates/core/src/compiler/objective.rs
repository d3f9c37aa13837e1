//! Builds the objective variable from the weighted objective components.
//!
//! For a job `j` with due date `d_j`, the lateness is `L_j = end_j - d_j`, the tardiness
//! `T_j = max(0, L_j)` and the earliness `E_j = T_j - L_j = max(0, -L_j)`.

use std::collections::BTreeMap;

use log::debug;

use super::context::CompilationContext;
use super::CompileError;
use super::ConfigurationError;
use crate::backend;
use crate::backend::Backend;
use crate::backend::IntVar;
use crate::backend::Term;
use crate::problem::JobId;

/// The auxiliary variables of a job with a due date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DueDateVars {
    pub lateness: IntVar,
    pub tardiness: IntVar,
    pub earliness: IntVar,
}

/// The objective variable together with the auxiliary variables it is defined over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectiveVars {
    /// The variable which is minimised.
    pub value: IntVar,
    /// The latest end over all tasks.
    pub makespan: Option<IntVar>,
    /// Fixed to zero; the lower operand of the tardiness maxima.
    pub zero: Option<IntVar>,
    pub due_dates: BTreeMap<JobId, DueDateVars>,
    pub max_tardiness: Option<IntVar>,
}

pub(crate) fn run<B: Backend + ?Sized>(
    context: &mut CompilationContext<'_, B>,
) -> Result<Option<ObjectiveVars>, CompileError> {
    let data = context.data;
    let objective = data.objective();
    let horizon = context.horizon;

    if objective.is_none() {
        debug!("No objective; the model is a satisfaction problem");
        return Ok(None);
    }
    if objective.uses_jobs() && data.num_jobs() == 0 {
        return Err(ConfigurationError::ObjectiveRequiresJobs.into());
    }

    let variables = &context.variables;
    let solver = &mut context.backend;

    // objective = sum(terms) + constant
    let mut terms: Vec<Term> = vec![];
    let mut constant: i64 = 0;
    let mut upper_bound: i64 = 0;

    let mut makespan = None;
    if objective.weight_makespan > 0 && data.num_tasks() > 0 {
        let variable = solver.new_integer(0, horizon, "makespan")?;
        solver.post(backend::maximum_equals(
            variable,
            variables.task_vars().iter().map(|task| task.end),
        ))?;
        terms.push(variable.scaled(objective.weight_makespan));
        upper_bound += i64::from(objective.weight_makespan) * i64::from(horizon);
        makespan = Some(variable);
    }

    if objective.weight_total_flow_time > 0 {
        for (job_id, job) in data.jobs().iter_with_keys() {
            let weight = objective.weight_total_flow_time.saturating_mul(job.weight());
            if weight == 0 {
                continue;
            }
            terms.push(variables.job_var(job_id).end.scaled(weight));
            constant -= i64::from(weight) * i64::from(job.release_date());
            upper_bound += i64::from(weight) * i64::from(horizon);
        }
    }

    let needs_due_dates = objective.weight_total_tardiness > 0
        || objective.weight_total_earliness > 0
        || objective.weight_max_tardiness > 0;
    let mut zero = None;
    let mut due_dates = BTreeMap::new();
    if needs_due_dates {
        for (job_id, job) in data.jobs().iter_with_keys() {
            let Some(due_date) = job.due_date() else {
                continue;
            };
            let zero_var = match zero {
                Some(variable) => variable,
                None => {
                    let variable = solver.new_integer(0, 0, "zero")?;
                    zero = Some(variable);
                    variable
                }
            };

            let out_of_range = ConfigurationError::DueDateOutOfRange(job_id);
            let lateness_lower = due_date.checked_neg().ok_or(out_of_range.clone())?;
            let lateness_upper = horizon.checked_sub(due_date).ok_or(out_of_range)?;

            let end = variables.job_var(job_id).end;
            let lateness = solver.new_integer(
                lateness_lower,
                lateness_upper,
                &format!("{job_id}_lateness"),
            )?;
            let tardiness = solver.new_integer(
                0,
                lateness_upper.max(0),
                &format!("{job_id}_tardiness"),
            )?;
            let earliness =
                solver.new_integer(0, due_date.max(0), &format!("{job_id}_earliness"))?;

            // lateness = end - due date
            solver.post(backend::equals(
                [lateness.scaled(1), end.scaled(-1)],
                lateness_lower,
            ))?;
            solver.post(backend::maximum_equals(tardiness, [zero_var, lateness]))?;
            // earliness = tardiness - lateness
            solver.post(backend::equals(
                [
                    earliness.scaled(1),
                    tardiness.scaled(-1),
                    lateness.scaled(1),
                ],
                0,
            ))?;

            let _ = due_dates.insert(
                job_id,
                DueDateVars {
                    lateness,
                    tardiness,
                    earliness,
                },
            );

            let weights = [
                (objective.weight_total_tardiness, tardiness, lateness_upper.max(0)),
                (objective.weight_total_earliness, earliness, due_date.max(0)),
            ];
            for (component_weight, variable, bound) in weights {
                let weight = component_weight.saturating_mul(job.weight());
                if weight > 0 {
                    terms.push(variable.scaled(weight));
                    upper_bound += i64::from(weight) * i64::from(bound);
                }
            }
        }

        if due_dates.is_empty() {
            debug!("No job has a due date; tardiness and earliness are zero");
        }
    }

    let mut max_tardiness = None;
    if objective.weight_max_tardiness > 0 && !due_dates.is_empty() {
        let variable = solver.new_integer(0, horizon, "max_tardiness")?;
        solver.post(backend::maximum_equals(
            variable,
            due_dates.values().map(|vars| vars.tardiness),
        ))?;
        terms.push(variable.scaled(objective.weight_max_tardiness));
        upper_bound += i64::from(objective.weight_max_tardiness) * i64::from(horizon);
        max_tardiness = Some(variable);
    }

    let upper_bound = i32::try_from(upper_bound + constant.max(0))
        .map_err(|_| ConfigurationError::ObjectiveOutOfRange)?;
    let constant = i32::try_from(constant).map_err(|_| ConfigurationError::ObjectiveOutOfRange)?;
    let value = solver.new_integer(0, upper_bound.max(0), "objective")?;

    // value - sum(terms) = constant
    solver.post(backend::equals(
        std::iter::once(value.scaled(1)).chain(terms.iter().map(|term| Term {
            coefficient: -term.coefficient,
            variable: term.variable,
        })),
        constant,
    ))?;
    solver.minimise(value)?;

    debug!("Objective is a weighted sum of {} terms", terms.len());

    Ok(Some(ObjectiveVars {
        value,
        makespan,
        zero,
        due_dates,
        max_tardiness,
    }))
}

#[cfg(test)]
mod tests {
    use crate::backend::RecordingBackend;
    use crate::compiler::compile;
    use crate::compiler::CompileError;
    use crate::compiler::CompileOptions;
    use crate::compiler::ConfigurationError;
    use crate::problem::Job;
    use crate::problem::Objective;
    use crate::problem::ObjectiveKind;
    use crate::problem::ProblemBuilder;
    use crate::problem::Task;

    #[test]
    fn job_objective_without_jobs_is_rejected() {
        let mut builder = ProblemBuilder::default();
        let machine = builder.add_machine();
        let task = builder.add_task(Task::new());
        let _ = builder.add_mode(task, 1, [(machine, 1)]);
        builder.set_objective(ObjectiveKind::TotalTardiness);
        let data = builder.build().unwrap();

        let result = compile(
            &data,
            &mut RecordingBackend::default(),
            CompileOptions::default(),
        );

        assert_eq!(
            result.err(),
            Some(CompileError::Configuration(
                ConfigurationError::ObjectiveRequiresJobs
            ))
        );
    }

    #[test]
    fn satisfaction_problem_has_no_objective() {
        let mut builder = ProblemBuilder::default();
        let machine = builder.add_machine();
        let task = builder.add_task(Task::new());
        let _ = builder.add_mode(task, 1, [(machine, 1)]);
        builder.set_objective(Objective::none());
        let data = builder.build().unwrap();
        let mut backend = RecordingBackend::default();

        let compiled = compile(&data, &mut backend, CompileOptions::default()).unwrap();

        assert!(compiled.objective.is_none());
        assert!(backend.model().objective().is_none());
    }

    #[test]
    fn only_jobs_with_due_dates_get_tardiness_variables() {
        let mut builder = ProblemBuilder::default();
        let machine = builder.add_machine();
        let with_due_date = builder.add_job(Job::new().with_due_date(4));
        let without_due_date = builder.add_job(Job::new());
        for job in [with_due_date, without_due_date] {
            let task = builder.add_task(Task::new().in_job(job));
            let _ = builder.add_mode(task, 3, [(machine, 1)]);
        }
        builder.set_objective(Objective {
            weight_makespan: 1,
            weight_total_tardiness: 2,
            ..Objective::none()
        });
        let data = builder.build().unwrap();
        let mut backend = RecordingBackend::default();

        let compiled = compile(&data, &mut backend, CompileOptions::default()).unwrap();

        let objective = compiled.objective.unwrap();
        assert!(objective.makespan.is_some());
        assert!(objective.max_tardiness.is_none());
        assert_eq!(
            objective.due_dates.keys().copied().collect::<Vec<_>>(),
            vec![with_due_date]
        );
        assert_eq!(backend.model().objective(), Some(objective.value));
    }

    #[test]
    fn objective_bound_beyond_32_bits_is_rejected() {
        let mut builder = ProblemBuilder::default();
        let machine = builder.add_machine();
        let task = builder.add_task(Task::new());
        let _ = builder.add_mode(task, 1, [(machine, 1)]);
        builder.set_objective(Objective {
            weight_makespan: i32::MAX,
            ..Objective::none()
        });
        let data = builder.build().unwrap();

        let result = compile(
            &data,
            &mut RecordingBackend::default(),
            CompileOptions::with_horizon(10),
        );

        assert_eq!(
            result.err(),
            Some(CompileError::Configuration(
                ConfigurationError::ObjectiveOutOfRange
            ))
        );
    }

    #[test]
    fn lateness_beyond_32_bits_is_rejected() {
        let mut builder = ProblemBuilder::default();
        let machine = builder.add_machine();
        let job = builder.add_job(Job::new().with_due_date(i32::MIN));
        let task = builder.add_task(Task::new().in_job(job));
        let _ = builder.add_mode(task, 1, [(machine, 1)]);
        builder.set_objective(ObjectiveKind::TotalTardiness);
        let data = builder.build().unwrap();

        let result = compile(
            &data,
            &mut RecordingBackend::default(),
            CompileOptions::default(),
        );

        assert_eq!(
            result.err(),
            Some(CompileError::Configuration(
                ConfigurationError::DueDateOutOfRange(job)
            ))
        );
    }
}
