//! Relates the start and end times of pairs of tasks.

use super::context::CompilationContext;
use super::CompileError;
use super::ConfigurationError;
use crate::backend;
use crate::backend::Backend;
use crate::problem::TimingKind;

pub(crate) fn run<B: Backend + ?Sized>(
    context: &mut CompilationContext<'_, B>,
) -> Result<(), CompileError> {
    for timing in context.data.constraints().timing() {
        let first = context.variables.task_var(timing.first);
        let second = context.variables.task_var(timing.second);

        let (from, to) = match timing.kind {
            TimingKind::StartBeforeStart => (first.start, second.start),
            TimingKind::StartBeforeEnd => (first.start, second.end),
            TimingKind::EndBeforeStart => (first.end, second.start),
            TimingKind::EndBeforeEnd => (first.end, second.end),
        };

        let rhs = timing
            .delay
            .checked_neg()
            .ok_or(ConfigurationError::DelayOutOfRange {
                first: timing.first,
                second: timing.second,
            })?;

        // from + delay <= to
        context.backend.post(backend::less_than_or_equals(
            [from.scaled(1), to.scaled(-1)],
            rhs,
        ))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::backend::RecordingBackend;
    use crate::compiler::compile;
    use crate::compiler::CompileError;
    use crate::compiler::CompileOptions;
    use crate::compiler::ConfigurationError;
    use crate::problem::ProblemBuilder;
    use crate::problem::Task;

    #[test]
    fn delay_which_cannot_be_negated_is_rejected() {
        let mut builder = ProblemBuilder::default();
        let machine = builder.add_machine();
        let first = builder.add_task(Task::new());
        let second = builder.add_task(Task::new());
        for task in [first, second] {
            let _ = builder.add_mode(task, 1, [(machine, 1)]);
        }
        builder.add_start_before_start(first, second, i32::MIN);
        let data = builder.build().unwrap();

        let result = compile(
            &data,
            &mut RecordingBackend::default(),
            CompileOptions::default(),
        );

        assert_eq!(
            result.err(),
            Some(CompileError::Configuration(
                ConfigurationError::DelayOutOfRange { first, second }
            ))
        );
    }
}
