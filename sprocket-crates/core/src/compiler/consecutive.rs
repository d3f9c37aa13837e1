//! When two tasks of a consecutive constraint end up on the same machine, the second directly
//! follows the first on it.

use log::warn;

use super::context::CompilationContext;
use super::CompileError;
use super::ConfigurationError;
use crate::backend;
use crate::backend::Backend;
use crate::topology;

pub(crate) fn run<B: Backend + ?Sized>(
    context: &mut CompilationContext<'_, B>,
) -> Result<(), CompileError> {
    let data = context.data;
    let variables = &context.variables;
    let solver = &mut context.backend;

    for &(first, second) in data.constraints().consecutive() {
        if first == second {
            warn!("Ignoring consecutive constraint of {first} with itself");
            continue;
        }

        for (first_mode, second_mode, shared) in topology::intersecting_modes(data, first, second)
        {
            let selected = [
                variables.mode_var(first_mode).presence,
                variables.mode_var(second_mode).presence,
            ];

            for machine in shared
                .into_iter()
                .filter(|&resource| data.resources()[resource].is_machine())
            {
                let arc = variables
                    .sequence_var(machine)?
                    .arc(first, second)
                    .ok_or(ConfigurationError::TaskNotOnMachine {
                        task: first,
                        machine,
                    })?;

                solver.post_implied_by(backend::equals([arc.into()], 1), &selected)?;
            }
        }
    }

    Ok(())
}
