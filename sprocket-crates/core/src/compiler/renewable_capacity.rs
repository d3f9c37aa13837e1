//! At any point in time, the tasks processed on a renewable resource demand at most its
//! capacity.

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
        let capacity = match resource {
            Resource::Renewable(renewable) => renewable.capacity,
            Resource::Machine(_) | Resource::NonRenewable(_) => continue,
        };

        let (zero_demand, assignments): (Vec<_>, Vec<_>) = context
            .variables
            .assignments_of_resource(resource_id)
            .partition(|(_, assign)| assign.max_demand == 0);

        for (task, _) in zero_demand {
            debug!("{task} never demands anything of {resource_id}; omitted from its cumulative");
        }

        if assignments.is_empty() {
            debug!("Skipping cumulative on {resource_id}, which no mode demands");
            continue;
        }

        let (intervals, demands) = assignments
            .into_iter()
            .map(|(_, assign)| (assign.interval, assign.demand))
            .unzip();
        context
            .backend
            .post(backend::cumulative(intervals, demands, capacity))?;
    }

    Ok(())
}
