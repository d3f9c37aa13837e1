//! Two machines process corresponding tasks in the same order.

use super::context::CompilationContext;
use super::CompileError;
use super::ConfigurationError;
use crate::backend;
use crate::backend::Backend;
use crate::backend::Literal;
use crate::problem::TaskId;
use crate::variables::SequenceVar;

pub(crate) fn run<B: Backend + ?Sized>(
    context: &mut CompilationContext<'_, B>,
) -> Result<(), CompileError> {
    let data = context.data;
    let variables = &context.variables;
    let solver = &mut context.backend;

    for same_sequence in data.constraints().same_sequence() {
        let first = variables.sequence_var(same_sequence.first_machine)?;
        let second = variables.sequence_var(same_sequence.second_machine)?;
        let pairs = same_sequence
            .first_tasks
            .iter()
            .copied()
            .zip(same_sequence.second_tasks.iter().copied())
            .collect::<Vec<_>>();

        let mut equalities = vec![];
        for &(first_task, second_task) in &pairs {
            equalities.push((
                lookup(first, first_task, SequenceVar::first)?,
                lookup(second, second_task, SequenceVar::first)?,
            ));
            equalities.push((
                lookup(first, first_task, SequenceVar::last)?,
                lookup(second, second_task, SequenceVar::last)?,
            ));
        }

        for (k, &(first_from, second_from)) in pairs.iter().enumerate() {
            for (l, &(first_to, second_to)) in pairs.iter().enumerate() {
                if k == l {
                    continue;
                }

                equalities.push((
                    lookup(first, first_from, |sequence, task| sequence.arc(task, first_to))?,
                    lookup(second, second_from, |sequence, task| {
                        sequence.arc(task, second_to)
                    })?,
                ));
            }
        }

        for (lhs, rhs) in equalities {
            solver.post(backend::equals([lhs.scaled(1), rhs.scaled(-1)], 0))?;
        }
    }

    Ok(())
}

fn lookup(
    sequence: &SequenceVar,
    task: TaskId,
    literal: impl Fn(&SequenceVar, TaskId) -> Option<Literal>,
) -> Result<Literal, ConfigurationError> {
    literal(sequence, task).ok_or(ConfigurationError::TaskNotOnMachine {
        task,
        machine: sequence.resource(),
    })
}
