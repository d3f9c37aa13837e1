//! The capabilities the compiler needs from a constraint-programming backend.
//!
//! The compiler only talks to a [`Backend`]; it never depends on a particular solver. A backend
//! creates variables, hands out handles ([`IntVar`], [`Literal`] and [`IntervalVar`]) and accepts
//! [`Constraint`]s over those handles, either unconditionally through [`Backend::post`] or
//! half-reified through [`Backend::post_implied_by`].
//!
//! [`RecordingBackend`] records everything it is asked to do into a [`RecordedModel`].
//!
//! # Example
//! ```
//! # use sprocket_core::backend;
//! # use sprocket_core::backend::Backend;
//! # use sprocket_core::backend::RecordingBackend;
//! let mut backend = RecordingBackend::default();
//!
//! let x = backend.new_integer(0, 10, "x").unwrap();
//! let y = backend.new_integer(0, 10, "y").unwrap();
//! let flag = backend.new_literal("flag").unwrap();
//!
//! // flag -> x + 3 <= y
//! backend
//!     .post_implied_by(backend::less_than_or_equals([x.scaled(1), y.scaled(-1)], -3), &[flag])
//!     .unwrap();
//!
//! assert_eq!(backend.model().constraints().len(), 1);
//! ```

mod constraint;
mod recording;
mod variables;

pub use constraint::*;
pub use recording::*;
use thiserror::Error;
pub use variables::*;

pub trait Backend {
    /// Create an integer variable with domain `[lower_bound, upper_bound]`.
    fn new_integer(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
        name: &str,
    ) -> Result<IntVar, BackendError>;

    /// Create a new boolean variable, returned as its positive literal.
    fn new_literal(&mut self, name: &str) -> Result<Literal, BackendError>;

    /// Create an interval variable from existing integer variables. The backend enforces
    /// `start + duration = end` whenever the interval is present.
    fn new_interval(&mut self, interval: Interval, name: &str)
        -> Result<IntervalVar, BackendError>;

    fn post(&mut self, constraint: Constraint) -> Result<(), BackendError>;

    /// Post `enforcement[0] /\ ... /\ enforcement[n] -> constraint`.
    fn post_implied_by(
        &mut self,
        constraint: Constraint,
        enforcement: &[Literal],
    ) -> Result<(), BackendError>;

    /// Declare `objective` as the variable to minimise.
    fn minimise(&mut self, objective: IntVar) -> Result<(), BackendError>;
}

/// A backend refused a request. For the compiler, this always indicates a defect: every
/// request it makes should be valid by construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("the domain [{lower_bound}, {upper_bound}] of '{name}' is empty")]
    EmptyDomain {
        name: String,
        lower_bound: i32,
        upper_bound: i32,
    },

    #[error("'{0}' does not refer to a variable of this backend")]
    UnknownVariable(String),

    #[error("constraint rejected: {0}")]
    RejectedConstraint(String),

    #[error("an objective has already been declared")]
    ObjectiveAlreadySet,
}
