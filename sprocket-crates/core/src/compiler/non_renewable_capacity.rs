//! The modes selected over the whole schedule demand at most the capacity of every
//! non-renewable resource.

use log::debug;

use super::context::CompilationContext;
use super::CompileError;
use crate::backend;
use crate::backend::Backend;
use crate::problem::Resource;
use crate::topology;

pub(crate) fn run<B: Backend + ?Sized>(
    context: &mut CompilationContext<'_, B>,
) -> Result<(), CompileError> {
    let by_resource = topology::resource_modes_and_demands(context.data);

    for (resource_id, resource) in context.data.resources().iter_with_keys() {
        let capacity = match resource {
            Resource::NonRenewable(non_renewable) => non_renewable.capacity,
            Resource::Machine(_) | Resource::Renewable(_) => continue,
        };

        let (modes, demands) = &by_resource[resource_id];
        let terms = modes
            .iter()
            .zip(demands)
            .filter(|&(_, &demand)| demand != 0)
            .map(|(&mode, &demand)| context.variables.mode_var(mode).presence.scaled(demand))
            .collect::<Vec<_>>();

        if terms.is_empty() {
            debug!("Skipping capacity of {resource_id}, which no mode demands");
            continue;
        }

        context
            .backend
            .post(backend::less_than_or_equals(terms, capacity))?;
    }

    Ok(())
}
