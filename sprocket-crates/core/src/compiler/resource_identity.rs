//! Identical-resources and different-resources constraints between pairs of tasks.

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

    for &(first, second) in data.constraints().identical_resources() {
        // A selected mode of `first` needs a selected mode of `second` with the same resources.
        for (mode, compatible) in topology::identical_mode_pairs(data, first, second) {
            let terms = std::iter::once(variables.mode_var(mode).presence.scaled(1)).chain(
                compatible
                    .iter()
                    .map(|&other| variables.mode_var(other).presence.scaled(-1)),
            );
            solver.post(backend::less_than_or_equals(terms, 0))?;
        }
    }

    for &(first, second) in data.constraints().different_resources() {
        for (mode, conflicting) in topology::different_mode_pairs(data, first, second) {
            let selected = [variables.mode_var(mode).presence];
            for other in conflicting {
                solver.post_implied_by(
                    backend::equals([variables.mode_var(other).presence.into()], 0),
                    &selected,
                )?;
            }
        }
    }

    Ok(())
}
