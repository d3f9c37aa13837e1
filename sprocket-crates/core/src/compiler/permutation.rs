//! In a permutation problem every machine processes the jobs in one shared order, which is a
//! circuit over a source node and one node per job.

use itertools::iproduct;

use super::context::CompilationContext;
use super::CompileError;
use super::ConfigurationError;
use crate::backend;
use crate::backend::Backend;
use crate::backend::CircuitArc;
use crate::containers::StorageKey;
use crate::problem::JobId;
use crate::problem::Resource;
use crate::variables::JobOrder;

pub(crate) fn run<B: Backend + ?Sized>(
    context: &mut CompilationContext<'_, B>,
) -> Result<Option<JobOrder>, CompileError> {
    let data = context.data;
    if !data.is_permutation() {
        return Ok(None);
    }

    if data.num_jobs() == 0 {
        return Err(ConfigurationError::PermutationWithoutJobs.into());
    }
    for (resource_id, resource) in data.resources().iter_with_keys() {
        match resource {
            Resource::Machine(_) => {}
            Resource::Renewable(_) | Resource::NonRenewable(_) => {
                return Err(ConfigurationError::PermutationOnNonMachine(resource_id).into())
            }
        }
    }

    let order = JobOrder::new(&mut context.backend, data.jobs().keys())?;
    let variables = &context.variables;
    let solver = &mut context.backend;

    let node = |job: JobId| job.index() + 1;
    let arcs = data
        .jobs()
        .keys()
        .flat_map(|job| {
            [
                CircuitArc {
                    tail: 0,
                    head: node(job),
                    literal: order.first(job),
                },
                CircuitArc {
                    tail: node(job),
                    head: 0,
                    literal: order.last(job),
                },
            ]
        })
        .chain(order.arcs().map(|(from, to, literal)| CircuitArc {
            tail: node(from),
            head: node(to),
            literal,
        }))
        .collect::<Vec<_>>();
    solver.post(backend::circuit(arcs))?;

    for machine in data.resources().keys() {
        for (from_job, to_job, literal) in order.arcs() {
            let from_tasks = data.jobs()[from_job].tasks();
            let to_tasks = data.jobs()[to_job].tasks();

            for (&from, &to) in iproduct!(from_tasks, to_tasks) {
                let (Some(from_assign), Some(to_assign)) = (
                    variables.assign_var(from, machine),
                    variables.assign_var(to, machine),
                ) else {
                    continue;
                };

                let setup = data.setup_time(machine, from, to);
                let from_end = variables.task_var(from).end;
                let to_start = variables.task_var(to).start;
                // end(from) + setup <= start(to)
                solver.post_implied_by(
                    backend::less_than_or_equals(
                        [from_end.scaled(1), to_start.scaled(-1)],
                        -setup,
                    ),
                    &[literal, from_assign.presence, to_assign.presence],
                )?;
            }
        }
    }

    Ok(Some(order))
}
