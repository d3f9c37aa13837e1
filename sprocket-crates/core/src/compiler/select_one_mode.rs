//! Selects exactly one mode per task, and lets the selected mode decide the duration of the
//! task, the resources it is assigned to and its demand on each of them.

use super::context::CompilationContext;
use super::CompileError;
use crate::backend;
use crate::backend::Backend;
use crate::topology;

pub(crate) fn run<B: Backend + ?Sized>(
    context: &mut CompilationContext<'_, B>,
) -> Result<(), CompileError> {
    let data = context.data;
    let variables = &context.variables;
    let solver = &mut context.backend;

    for (task_id, modes) in topology::task_modes(data).iter_with_keys() {
        let task = &data.tasks()[task_id];
        let task_var = variables.task_var(task_id);

        solver.post(backend::exactly_one(
            modes.iter().map(|&mode| variables.mode_var(mode).presence),
        ))?;

        for &mode_id in modes {
            let mode = &data.modes()[mode_id];
            let selected = [variables.mode_var(mode_id).presence];

            let duration = if task.has_fixed_duration() {
                backend::equals([task_var.duration.into()], mode.duration())
            } else {
                backend::greater_than_or_equals([task_var.duration.into()], mode.duration())
            };
            solver.post_implied_by(duration, &selected)?;

            for (resource, assign) in variables.assignments_of_task(task_id) {
                let required = i32::from(mode.uses(resource));
                solver.post_implied_by(
                    backend::equals([assign.presence.into()], required),
                    &selected,
                )?;
            }

            for (resource, demand) in mode.requirements() {
                // Every resource of a mode of the task has an assignment.
                let Some(assign) = variables.assign_var(task_id, resource) else {
                    continue;
                };
                solver.post_implied_by(backend::equals([assign.demand.into()], demand), &selected)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::backend::Constraint;
    use crate::backend::RecordingBackend;
    use crate::compiler::compile;
    use crate::compiler::CompileOptions;
    use crate::problem::ProblemBuilder;
    use crate::problem::Task;

    #[test]
    fn one_exactly_one_per_task_over_its_modes() {
        let mut builder = ProblemBuilder::default();
        let machines = [builder.add_machine(), builder.add_machine()];
        for _ in 0..5 {
            let task = builder.add_task(Task::new());
            for machine in machines {
                let _ = builder.add_mode(task, 2, [(machine, 1)]);
            }
        }
        let data = builder.build().unwrap();
        let mut backend = RecordingBackend::default();

        let compiled = compile(&data, &mut backend, CompileOptions::default()).unwrap();

        let exactly_ones = backend
            .model()
            .hard_constraints()
            .filter_map(|constraint| match constraint {
                Constraint::ExactlyOne(literals) => Some(literals.clone()),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(exactly_ones.len(), 5);
        for (task, literals) in data.tasks().keys().zip(exactly_ones) {
            let expected = data
                .modes()
                .iter_with_keys()
                .filter(|(_, mode)| mode.task() == task)
                .map(|(mode, _)| compiled.variables.mode_var(mode).presence)
                .collect::<Vec<_>>();
            assert_eq!(literals, expected);
        }
    }

    #[test]
    fn variable_duration_is_a_lower_bound() {
        let mut builder = ProblemBuilder::default();
        let machine = builder.add_machine();
        let task = builder.add_task(Task::new().with_fixed_duration(false));
        let mode = builder.add_mode(task, 4, [(machine, 1)]);
        let data = builder.build().unwrap();
        let mut backend = RecordingBackend::default();

        let compiled = compile(&data, &mut backend, CompileOptions::default()).unwrap();

        let presence = compiled.variables.mode_var(mode).presence;
        let duration = compiled.variables.task_var(task).duration;
        assert!(backend
            .model()
            .constraints_enforced_by(presence)
            .any(|recorded| recorded.constraint
                == crate::backend::greater_than_or_equals([duration.into()], 4)));
    }
}
