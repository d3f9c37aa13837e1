use log::trace;

use crate::backend::Backend;
use crate::backend::BackendError;
use crate::backend::Constraint;
use crate::backend::IntVar;
use crate::backend::Interval;
use crate::backend::IntervalVar;
use crate::backend::Literal;
use crate::problem::ProblemData;
use crate::statistics::CompilationStatistics;
use crate::variables::Variables;

/// Forwards every request to the wrapped backend and counts what was created and posted.
pub(crate) struct CountingBackend<'a, B: ?Sized> {
    backend: &'a mut B,
    pub(crate) statistics: CompilationStatistics,
}

impl<'a, B: Backend + ?Sized> CountingBackend<'a, B> {
    pub(crate) fn new(backend: &'a mut B) -> CountingBackend<'a, B> {
        CountingBackend {
            backend,
            statistics: CompilationStatistics::default(),
        }
    }
}

impl<B: Backend + ?Sized> Backend for CountingBackend<'_, B> {
    fn new_integer(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
        name: &str,
    ) -> Result<IntVar, BackendError> {
        let variable = self.backend.new_integer(lower_bound, upper_bound, name)?;
        self.statistics.num_integer_variables += 1;
        Ok(variable)
    }

    fn new_literal(&mut self, name: &str) -> Result<Literal, BackendError> {
        let literal = self.backend.new_literal(name)?;
        self.statistics.num_literals += 1;
        Ok(literal)
    }

    fn new_interval(
        &mut self,
        interval: Interval,
        name: &str,
    ) -> Result<IntervalVar, BackendError> {
        let interval = self.backend.new_interval(interval, name)?;
        self.statistics.num_intervals += 1;
        Ok(interval)
    }

    fn post(&mut self, constraint: Constraint) -> Result<(), BackendError> {
        trace!("post {constraint:?}");
        self.statistics.record_constraint(&constraint, false);
        self.backend.post(constraint)
    }

    fn post_implied_by(
        &mut self,
        constraint: Constraint,
        enforcement: &[Literal],
    ) -> Result<(), BackendError> {
        trace!("post {enforcement:?} -> {constraint:?}");
        self.statistics
            .record_constraint(&constraint, !enforcement.is_empty());
        self.backend.post_implied_by(constraint, enforcement)
    }

    fn minimise(&mut self, objective: IntVar) -> Result<(), BackendError> {
        self.backend.minimise(objective)
    }
}

pub(crate) struct CompilationContext<'a, B: ?Sized> {
    /// The problem being compiled.
    pub(crate) data: &'a ProblemData,
    /// The upper bound of every time variable.
    pub(crate) horizon: i32,
    /// The variables allocated for the problem before any constraint was posted.
    pub(crate) variables: Variables,
    /// The backend to post the constraints to.
    pub(crate) backend: CountingBackend<'a, B>,
}
