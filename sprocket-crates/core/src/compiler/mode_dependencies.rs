//! If a mode is selected, then one of the modes it depends on is selected as well.

use super::context::CompilationContext;
use super::CompileError;
use crate::backend;
use crate::backend::Backend;

pub(crate) fn run<B: Backend + ?Sized>(
    context: &mut CompilationContext<'_, B>,
) -> Result<(), CompileError> {
    for dependency in context.data.constraints().mode_dependencies() {
        let mode = context.variables.mode_var(dependency.mode).presence;
        let terms = std::iter::once(mode.scaled(1))
            .chain(
                dependency
                    .dependents
                    .iter()
                    .map(|&dependent| context.variables.mode_var(dependent).presence.scaled(-1)),
            )
            .collect::<Vec<_>>();

        context
            .backend
            .post(backend::less_than_or_equals(terms, 0))?;
    }

    Ok(())
}
