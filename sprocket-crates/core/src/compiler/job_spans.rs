//! Ties the span of every job to its tasks.

use log::debug;

use super::context::CompilationContext;
use super::CompileError;
use crate::backend;
use crate::backend::Backend;

pub(crate) fn run<B: Backend + ?Sized>(
    context: &mut CompilationContext<'_, B>,
) -> Result<(), CompileError> {
    for (job_id, job) in context.data.jobs().iter_with_keys() {
        if job.tasks().is_empty() {
            debug!("{job_id} has no tasks; its span is left unconstrained");
            continue;
        }

        let job_var = context.variables.job_var(job_id);
        let tasks = job
            .tasks()
            .iter()
            .map(|&task| context.variables.task_var(task))
            .collect::<Vec<_>>();

        context.backend.post(backend::minimum_equals(
            job_var.start,
            tasks.iter().map(|task| task.start),
        ))?;
        context.backend.post(backend::maximum_equals(
            job_var.end,
            tasks.iter().map(|task| task.end),
        ))?;
    }

    Ok(())
}
