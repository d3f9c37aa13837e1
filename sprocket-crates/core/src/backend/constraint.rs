//! The constraints a [`Backend`](super::Backend) has to be able to post.
//!
//! They are plain descriptions; it is up to the backend to translate them into whatever its
//! solver understands.

use super::IntVar;
use super::IntervalVar;
use super::Literal;

/// A variable appearing in a linear expression.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum TermVariable {
    Integer(IntVar),
    /// Contributes 1 when the literal is true and 0 otherwise.
    Literal(Literal),
}

/// `coefficient * variable`
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Term {
    pub coefficient: i32,
    pub variable: TermVariable,
}

impl Term {
    pub fn integer(variable: IntVar, coefficient: i32) -> Term {
        Term {
            coefficient,
            variable: TermVariable::Integer(variable),
        }
    }

    pub fn literal(literal: Literal, coefficient: i32) -> Term {
        Term {
            coefficient,
            variable: TermVariable::Literal(literal),
        }
    }
}

impl From<IntVar> for Term {
    fn from(variable: IntVar) -> Self {
        Term::integer(variable, 1)
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::literal(literal, 1)
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Comparison {
    LessThanOrEqual,
    Equal,
    GreaterThanOrEqual,
}

/// `sum(terms) <comparison> rhs`
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct LinearConstraint {
    pub terms: Vec<Term>,
    pub comparison: Comparison,
    pub rhs: i32,
}

/// An arc `tail -> head` of a circuit which is taken when `literal` is true. An arc from a node
/// to itself means the node is skipped.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct CircuitArc {
    pub tail: usize,
    pub head: usize,
    pub literal: Literal,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Constraint {
    Linear(LinearConstraint),
    /// `target = min(operands)`
    MinimumEquals {
        target: IntVar,
        operands: Vec<IntVar>,
    },
    /// `target = max(operands)`
    MaximumEquals {
        target: IntVar,
        operands: Vec<IntVar>,
    },
    /// Exactly one of the literals is true.
    ExactlyOne(Vec<Literal>),
    /// The present intervals do not overlap in time.
    NoOverlap(Vec<IntervalVar>),
    /// At every point in time, the demands of the present intervals which are active at that
    /// point sum to at most `capacity`.
    Cumulative {
        intervals: Vec<IntervalVar>,
        demands: Vec<IntVar>,
        capacity: i32,
    },
    /// The true arcs form a single cycle over the nodes which are not skipped. Every node has
    /// exactly one true outgoing and one true incoming arc.
    Circuit(Vec<CircuitArc>),
}

fn linear(terms: impl IntoIterator<Item = Term>, comparison: Comparison, rhs: i32) -> Constraint {
    Constraint::Linear(LinearConstraint {
        terms: terms.into_iter().collect(),
        comparison,
        rhs,
    })
}

/// `sum(terms) <= rhs`
pub fn less_than_or_equals(terms: impl IntoIterator<Item = Term>, rhs: i32) -> Constraint {
    linear(terms, Comparison::LessThanOrEqual, rhs)
}

/// `sum(terms) = rhs`
pub fn equals(terms: impl IntoIterator<Item = Term>, rhs: i32) -> Constraint {
    linear(terms, Comparison::Equal, rhs)
}

/// `sum(terms) >= rhs`
pub fn greater_than_or_equals(terms: impl IntoIterator<Item = Term>, rhs: i32) -> Constraint {
    linear(terms, Comparison::GreaterThanOrEqual, rhs)
}

pub fn minimum_equals(target: IntVar, operands: impl IntoIterator<Item = IntVar>) -> Constraint {
    Constraint::MinimumEquals {
        target,
        operands: operands.into_iter().collect(),
    }
}

pub fn maximum_equals(target: IntVar, operands: impl IntoIterator<Item = IntVar>) -> Constraint {
    Constraint::MaximumEquals {
        target,
        operands: operands.into_iter().collect(),
    }
}

pub fn exactly_one(literals: impl IntoIterator<Item = Literal>) -> Constraint {
    Constraint::ExactlyOne(literals.into_iter().collect())
}

pub fn no_overlap(intervals: impl IntoIterator<Item = IntervalVar>) -> Constraint {
    Constraint::NoOverlap(intervals.into_iter().collect())
}

/// The intervals and demands have to be of the same length.
pub fn cumulative(intervals: Vec<IntervalVar>, demands: Vec<IntVar>, capacity: i32) -> Constraint {
    Constraint::Cumulative {
        intervals,
        demands,
        capacity,
    }
}

pub fn circuit(arcs: impl IntoIterator<Item = CircuitArc>) -> Constraint {
    Constraint::Circuit(arcs.into_iter().collect())
}
