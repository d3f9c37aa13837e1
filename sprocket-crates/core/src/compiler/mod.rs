//! Compiles a [`ProblemData`] into a constraint model through a [`Backend`].
//!
//! Compilation allocates every variable first and then runs a fixed sequence of passes, each
//! of which posts one family of constraints. The sequence of requests made to the backend only
//! depends on the problem and the options, so compiling the same problem twice produces the
//! same model.

mod consecutive;
mod context;
mod error;
mod job_spans;
mod machines_no_overlap;
mod mode_dependencies;
mod non_renewable_capacity;
mod objective;
mod options;
mod permutation;
mod renewable_capacity;
mod resource_identity;
mod same_sequence;
mod select_one_mode;
mod sequencing;
mod timing_constraints;

use context::CompilationContext;
use context::CountingBackend;
pub use error::*;
use log::debug;
pub use objective::DueDateVars;
pub use objective::ObjectiveVars;
pub use options::*;

use crate::backend::Backend;
use crate::problem::ProblemData;
use crate::statistics::CompilationStatistics;
use crate::topology;
use crate::variables::JobOrder;
use crate::variables::SequencingPlan;
use crate::variables::Variables;

/// The handles of a compiled model, needed to read a schedule back from the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledModel {
    pub variables: Variables,
    /// `None` for a satisfaction problem.
    pub objective: Option<ObjectiveVars>,
    /// The shared job order of a permutation problem.
    pub job_order: Option<JobOrder>,
    pub statistics: CompilationStatistics,
    /// The upper bound which was used for every time variable.
    pub horizon: i32,
}

/// Compile `data` into `backend`.
///
/// # Example
/// ```
/// # use sprocket_core::backend::RecordingBackend;
/// # use sprocket_core::compiler::compile;
/// # use sprocket_core::compiler::CompileOptions;
/// # use sprocket_core::problem::ProblemBuilder;
/// # use sprocket_core::problem::Task;
/// let mut builder = ProblemBuilder::default();
/// let machine = builder.add_machine();
/// let task = builder.add_task(Task::new());
/// let _ = builder.add_mode(task, 4, [(machine, 1)]);
/// let data = builder.build().unwrap();
///
/// let mut backend = RecordingBackend::default();
/// let compiled = compile(&data, &mut backend, CompileOptions::with_horizon(10)).unwrap();
///
/// assert_eq!(compiled.horizon, 10);
/// assert_eq!(backend.model().objective(), compiled.objective.map(|objective| objective.value));
/// ```
pub fn compile<B: Backend + ?Sized>(
    data: &ProblemData,
    backend: &mut B,
    options: CompileOptions,
) -> Result<CompiledModel, CompileError> {
    let horizon = options.horizon.unwrap_or_else(|| topology::horizon(data));
    let plan = SequencingPlan::new(data)?;

    let mut backend = CountingBackend::new(backend);
    let variables = Variables::new(data, &mut backend, horizon, &plan)?;
    backend.statistics.num_sequence_variables = variables.sequence_vars().count();

    let mut context = CompilationContext {
        data,
        horizon,
        variables,
        backend,
    };

    job_spans::run(&mut context)?;
    select_one_mode::run(&mut context)?;
    machines_no_overlap::run(&mut context)?;
    renewable_capacity::run(&mut context)?;
    non_renewable_capacity::run(&mut context)?;
    timing_constraints::run(&mut context)?;
    resource_identity::run(&mut context)?;
    mode_dependencies::run(&mut context)?;
    sequencing::run(&mut context)?;
    consecutive::run(&mut context)?;
    same_sequence::run(&mut context)?;
    let job_order = permutation::run(&mut context)?;
    let objective = objective::run(&mut context)?;

    let statistics = context.backend.statistics;
    debug!(
        "Compiled {} constraints over {} integer variables and {} literals",
        statistics.total_constraints(),
        statistics.num_integer_variables,
        statistics.num_literals
    );

    Ok(CompiledModel {
        variables: context.variables,
        objective,
        job_order,
        statistics,
        horizon,
    })
}
