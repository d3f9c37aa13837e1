use std::ops::Not;

use super::Term;
use crate::containers::storage_key;

storage_key!(
    /// A handle to an integer variable created by a [`Backend`](super::Backend).
    IntVar,
    "x"
);
storage_key!(
    /// A handle to a boolean variable created by a [`Backend`](super::Backend). Constraints refer
    /// to boolean variables through [`Literal`]s.
    BoolVar,
    "b"
);
storage_key!(
    /// A handle to an interval variable created by a [`Backend`](super::Backend).
    IntervalVar,
    "i"
);

/// A boolean variable or its negation.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Literal {
    variable: BoolVar,
    negated: bool,
}

impl Literal {
    /// The positive literal of `variable`.
    pub fn new(variable: BoolVar) -> Literal {
        Literal {
            variable,
            negated: false,
        }
    }

    pub fn variable(&self) -> BoolVar {
        self.variable
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// The literal as a 0-1 term in a linear expression.
    pub fn scaled(self, coefficient: i32) -> Term {
        Term::literal(self, coefficient)
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        Literal {
            variable: self.variable,
            negated: !self.negated,
        }
    }
}

impl IntVar {
    pub fn scaled(self, coefficient: i32) -> Term {
        Term::integer(self, coefficient)
    }
}

/// The parts an interval variable is made of. `start + duration = end` holds whenever the
/// interval is present; an interval without a presence literal is always present.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Interval {
    pub start: IntVar,
    pub duration: IntVar,
    pub end: IntVar,
    pub presence: Option<Literal>,
}

impl Interval {
    pub fn is_optional(&self) -> bool {
        self.presence.is_some()
    }
}
