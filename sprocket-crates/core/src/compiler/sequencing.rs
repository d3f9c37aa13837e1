//! Orders the tasks on every sequenced machine with a circuit, and enforces the setup time
//! between each task and its direct successor.
//!
//! Node 0 of the circuit is a dummy which closes the cycle; the task at position `i` of the
//! sequence is node `i + 1`. A task skips its node when it is not processed on the machine,
//! and the dummy skips its node when the machine is empty.

use super::context::CompilationContext;
use super::CompileError;
use super::ConfigurationError;
use crate::backend;
use crate::backend::Backend;
use crate::backend::CircuitArc;
use crate::topology;

pub(crate) fn run<B: Backend + ?Sized>(
    context: &mut CompilationContext<'_, B>,
) -> Result<(), CompileError> {
    let data = context.data;
    let variables = &context.variables;
    let solver = &mut context.backend;

    for sequence in variables.sequence_vars() {
        let machine = sequence.resource();
        let setup_times = topology::setup_matrix(data, machine);

        let node = |position: usize| position + 1;
        let presences = sequence
            .tasks()
            .iter()
            .map(|&task| {
                variables
                    .assign_var(task, machine)
                    .map(|assign| assign.presence)
                    .ok_or(ConfigurationError::TaskNotOnMachine { task, machine })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut arcs = vec![CircuitArc {
            tail: 0,
            head: 0,
            literal: sequence.empty(),
        }];
        for (position, (&task, &presence)) in sequence.tasks().iter().zip(&presences).enumerate() {
            let first = sequence.first(task);
            let last = sequence.last(task);
            arcs.extend(first.map(|literal| CircuitArc {
                tail: 0,
                head: node(position),
                literal,
            }));
            arcs.extend(last.map(|literal| CircuitArc {
                tail: node(position),
                head: 0,
                literal,
            }));
            arcs.push(CircuitArc {
                tail: node(position),
                head: node(position),
                literal: !presence,
            });
        }
        let task_arcs = sequence
            .tasks()
            .iter()
            .enumerate()
            .flat_map(|(tail, &from)| {
                sequence.tasks().iter().enumerate().filter_map(move |(head, &to)| {
                    sequence
                        .arc(from, to)
                        .map(|literal| (tail, head, literal))
                })
            })
            .collect::<Vec<_>>();
        arcs.extend(task_arcs.iter().map(|&(tail, head, literal)| CircuitArc {
            tail: node(tail),
            head: node(head),
            literal,
        }));
        solver.post(backend::circuit(arcs))?;

        // A machine which processes a task is not empty.
        for &presence in &presences {
            solver.post_implied_by(backend::equals([sequence.empty().into()], 0), &[presence])?;
        }

        for (tail, head, literal) in task_arcs {
            let from = sequence.tasks()[tail];
            let to = sequence.tasks()[head];

            solver.post_implied_by(
                backend::greater_than_or_equals([presences[tail].into(), presences[head].into()], 2),
                &[literal],
            )?;

            let setup = setup_times
                .as_ref()
                .map_or(0, |matrix| matrix.get(from, to));
            let from_var = variables.task_var(from);
            let to_var = variables.task_var(to);
            // end(from) + setup <= start(to)
            solver.post_implied_by(
                backend::less_than_or_equals([from_var.end.scaled(1), to_var.start.scaled(-1)], -setup),
                &[literal],
            )?;
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
    fn setup_precedence_is_only_enforced_by_its_arc() {
        let mut builder = ProblemBuilder::default();
        let machine = builder.add_machine();
        let first = builder.add_task(Task::new());
        let second = builder.add_task(Task::new());
        let _ = builder.add_mode(first, 2, [(machine, 1)]);
        let _ = builder.add_mode(second, 3, [(machine, 1)]);
        builder.add_setup_time(machine, first, second, 5);
        let data = builder.build().unwrap();
        let mut backend = RecordingBackend::default();

        let compiled = compile(&data, &mut backend, CompileOptions::default()).unwrap();

        let sequence = compiled.variables.sequence_var(machine).unwrap();
        let arc = sequence.arc(first, second).unwrap();
        let end = compiled.variables.task_var(first).end;
        let start = compiled.variables.task_var(second).start;
        let setup =
            crate::backend::less_than_or_equals([end.scaled(1), start.scaled(-1)], -5);

        let model = backend.model();
        let enforcing = model
            .constraints()
            .iter()
            .filter(|recorded| recorded.constraint == setup)
            .map(|recorded| recorded.enforcement.clone())
            .collect::<Vec<_>>();
        assert_eq!(enforcing, vec![vec![arc]]);
        assert!(!model.hard_constraints().any(|constraint| *constraint == setup));
    }

    #[test]
    fn circuit_has_a_node_per_task_and_a_dummy() {
        let mut builder = ProblemBuilder::default();
        let machine = builder.add_machine();
        let tasks = [
            builder.add_task(Task::new()),
            builder.add_task(Task::new()),
            builder.add_task(Task::new()),
        ];
        for task in tasks {
            let _ = builder.add_mode(task, 1, [(machine, 1)]);
        }
        builder.add_setup_time(machine, tasks[0], tasks[2], 1);
        let data = builder.build().unwrap();
        let mut backend = RecordingBackend::default();

        let _ = compile(&data, &mut backend, CompileOptions::default()).unwrap();

        let arcs = backend
            .model()
            .hard_constraints()
            .find_map(|constraint| match constraint {
                Constraint::Circuit(arcs) => Some(arcs.clone()),
                _ => None,
            })
            .unwrap();
        // dummy self-loop, 3 x (first, last, self-loop) and 3 x 2 task arcs
        assert_eq!(arcs.len(), 1 + 3 * 3 + 6);
        assert!(arcs.iter().all(|arc| arc.tail <= 3 && arc.head <= 3));
    }
}
