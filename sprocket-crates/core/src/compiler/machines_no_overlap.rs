//! No two tasks can be processed on the same machine at the same time.

use log::debug;

use super::context::CompilationContext;
use super::CompileError;
use crate::backend;
use crate::backend::Backend;
use crate::problem::Resource;

pub(crate) fn run<B: Backend + ?Sized>(
    context: &mut CompilationContext<'_, B>,
) -> Result<(), CompileError> {
    for (resource_id, resource) in context.data.resources().iter_with_keys() {
        match resource {
            Resource::Machine(_) => {}
            Resource::Renewable(_) | Resource::NonRenewable(_) => continue,
        }

        let intervals = context
            .variables
            .assignments_of_resource(resource_id)
            .map(|(_, assign)| assign.interval)
            .collect::<Vec<_>>();

        if intervals.is_empty() {
            debug!("Skipping no-overlap on {resource_id}, which no mode uses");
            continue;
        }

        context.backend.post(backend::no_overlap(intervals))?;
    }

    Ok(())
}
