//! Verifies value assignments against a [`RecordedModel`].
//!
//! The checker evaluates every recorded constraint under an [`Assignment`] without doing any
//! search. Together with [`ScheduleCandidate`], which derives the value of every compiled
//! variable from a plain schedule, it makes it possible to test the semantics of a compiled model
//! by enumerating schedules.

mod assignment;
mod evaluation;
mod schedule;

pub use assignment::*;
use log::debug;
pub use schedule::*;
use sprocket_core::backend::IntVar;
use sprocket_core::backend::IntervalVar;
use sprocket_core::backend::Literal;
use sprocket_core::backend::RecordedModel;
use thiserror::Error;

/// Verify that `assignment` satisfies every variable domain, every interval and every
/// constraint of `model`.
///
/// A constraint only has to hold when all its enforcement literals are true.
pub fn verify_assignment(model: &RecordedModel, assignment: &Assignment) -> Result<(), CheckError> {
    for (variable, domain) in model.integers().iter_with_keys() {
        let value = assignment.integer_value(variable)?;
        if !domain.contains(value) {
            return Err(CheckError::OutOfDomain {
                variable: domain.name.clone(),
                value,
                lower_bound: domain.lower_bound,
                upper_bound: domain.upper_bound,
            });
        }
    }

    for (variable, name) in model.booleans().iter_with_keys() {
        if assignment.literal(Literal::new(variable)).is_none() {
            return Err(CheckError::MissingValue(name.clone()));
        }
    }

    for (interval, recorded) in model.intervals().iter_with_keys() {
        if !evaluation::interval_is_consistent(model, assignment, interval)? {
            return Err(CheckError::InconsistentInterval {
                interval: recorded.name.clone(),
            });
        }
    }

    for (index, recorded) in model.constraints().iter().enumerate() {
        let mut enforced = true;
        for &literal in &recorded.enforcement {
            enforced &= assignment.literal_value(literal)?;
        }
        if !enforced {
            continue;
        }

        if let Some(reason) = evaluation::evaluate(model, assignment, &recorded.constraint)? {
            debug!("constraint {index} is violated: {reason}");
            return Err(CheckError::Violated { index, reason });
        }
    }

    Ok(())
}

/// The value of the objective variable of `model`, if it has one and it is assigned.
pub fn objective_value(model: &RecordedModel, assignment: &Assignment) -> Option<i32> {
    model
        .objective()
        .and_then(|objective| assignment.integer(objective))
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("'{0}' has no value")]
    MissingValue(String),

    #[error("{variable} = {value} lies outside [{lower_bound}, {upper_bound}]")]
    OutOfDomain {
        variable: String,
        value: i32,
        lower_bound: i32,
        upper_bound: i32,
    },

    #[error("the present interval '{interval}' does not satisfy start + duration = end")]
    InconsistentInterval { interval: String },

    #[error("constraint {index} is violated: {reason}")]
    Violated { index: usize, reason: Violation },
}

/// The way in which a constraint is violated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("the linear expression evaluates to {lhs}, which does not satisfy the comparison with {rhs}")]
    Linear { lhs: i64, rhs: i32 },

    #[error("{target} is {actual} rather than {expected}")]
    Extremum {
        target: IntVar,
        actual: i32,
        expected: i32,
    },

    #[error("{0} literals are true rather than exactly one")]
    ExactlyOne(usize),

    #[error("{first} and {second} overlap")]
    Overlap {
        first: IntervalVar,
        second: IntervalVar,
    },

    #[error("the load at time {time} is {load}, exceeding the capacity {capacity}")]
    CapacityExceeded { time: i32, load: i64, capacity: i32 },

    #[error("node {node} has {outgoing} outgoing and {incoming} incoming arcs")]
    CircuitDegree {
        node: usize,
        outgoing: usize,
        incoming: usize,
    },

    #[error("the cycle through node {node} visits {visited} of the {expected} nodes which are not skipped")]
    Subtour {
        node: usize,
        visited: usize,
        expected: usize,
    },
}
