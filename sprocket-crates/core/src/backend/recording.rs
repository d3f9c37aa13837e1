use log::trace;

use super::Backend;
use super::BackendError;
use super::BoolVar;
use super::Constraint;
use super::IntVar;
use super::Interval;
use super::IntervalVar;
use super::Literal;
use super::TermVariable;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;

/// The domain of an integer variable in a [`RecordedModel`].
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct IntegerDomain {
    pub lower_bound: i32,
    pub upper_bound: i32,
    pub name: String,
}

impl IntegerDomain {
    pub fn contains(&self, value: i32) -> bool {
        self.lower_bound <= value && value <= self.upper_bound
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct RecordedInterval {
    pub interval: Interval,
    pub name: String,
}

/// A constraint together with the literals which enforce it. An empty enforcement means the
/// constraint always holds.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct RecordedConstraint {
    pub constraint: Constraint,
    pub enforcement: Vec<Literal>,
}

/// Everything that was created and posted through a [`RecordingBackend`], in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordedModel {
    integers: KeyedVec<IntVar, IntegerDomain>,
    booleans: KeyedVec<BoolVar, String>,
    intervals: KeyedVec<IntervalVar, RecordedInterval>,
    constraints: Vec<RecordedConstraint>,
    objective: Option<IntVar>,
}

impl RecordedModel {
    pub fn integers(&self) -> &KeyedVec<IntVar, IntegerDomain> {
        &self.integers
    }

    pub fn booleans(&self) -> &KeyedVec<BoolVar, String> {
        &self.booleans
    }

    pub fn intervals(&self) -> &KeyedVec<IntervalVar, RecordedInterval> {
        &self.intervals
    }

    pub fn constraints(&self) -> &[RecordedConstraint] {
        &self.constraints
    }

    pub fn objective(&self) -> Option<IntVar> {
        self.objective
    }

    pub fn interval(&self, interval: IntervalVar) -> &Interval {
        &self.intervals[interval].interval
    }

    pub fn domain(&self, variable: IntVar) -> &IntegerDomain {
        &self.integers[variable]
    }

    /// The constraints which hold unconditionally.
    pub fn hard_constraints(&self) -> impl Iterator<Item = &Constraint> + '_ {
        self.constraints
            .iter()
            .filter(|recorded| recorded.enforcement.is_empty())
            .map(|recorded| &recorded.constraint)
    }

    /// The constraints which are enforced by the given literal (among others).
    pub fn constraints_enforced_by(
        &self,
        literal: Literal,
    ) -> impl Iterator<Item = &RecordedConstraint> + '_ {
        self.constraints
            .iter()
            .filter(move |recorded| recorded.enforcement.contains(&literal))
    }
}

/// A [`Backend`] which records every request in a [`RecordedModel`].
///
/// It is strict about degenerate input: global constraints without any operands, cumulative
/// constraints with a demand that can only be zero and references to unknown variables are
/// all rejected.
#[derive(Clone, Debug, Default)]
pub struct RecordingBackend {
    model: RecordedModel,
}

impl RecordingBackend {
    pub fn model(&self) -> &RecordedModel {
        &self.model
    }

    pub fn into_model(self) -> RecordedModel {
        self.model
    }

    fn check_integer(&self, variable: IntVar) -> Result<(), BackendError> {
        if variable.index() < self.model.integers.len() {
            Ok(())
        } else {
            Err(BackendError::UnknownVariable(variable.to_string()))
        }
    }

    fn check_literal(&self, literal: Literal) -> Result<(), BackendError> {
        if literal.variable().index() < self.model.booleans.len() {
            Ok(())
        } else {
            Err(BackendError::UnknownVariable(literal.variable().to_string()))
        }
    }

    fn check_interval(&self, interval: IntervalVar) -> Result<(), BackendError> {
        if interval.index() < self.model.intervals.len() {
            Ok(())
        } else {
            Err(BackendError::UnknownVariable(interval.to_string()))
        }
    }

    fn check_constraint(&self, constraint: &Constraint) -> Result<(), BackendError> {
        match constraint {
            Constraint::Linear(linear) => {
                for term in &linear.terms {
                    match term.variable {
                        TermVariable::Integer(variable) => self.check_integer(variable)?,
                        TermVariable::Literal(literal) => self.check_literal(literal)?,
                    }
                }
            }
            Constraint::MinimumEquals { target, operands }
            | Constraint::MaximumEquals { target, operands } => {
                if operands.is_empty() {
                    return Err(rejected("minimum/maximum over no operands"));
                }
                self.check_integer(*target)?;
                operands
                    .iter()
                    .try_for_each(|&operand| self.check_integer(operand))?;
            }
            Constraint::ExactlyOne(literals) => {
                if literals.is_empty() {
                    return Err(rejected("exactly-one over no literals"));
                }
                literals
                    .iter()
                    .try_for_each(|&literal| self.check_literal(literal))?;
            }
            Constraint::NoOverlap(intervals) => {
                if intervals.is_empty() {
                    return Err(rejected("no-overlap over no intervals"));
                }
                intervals
                    .iter()
                    .try_for_each(|&interval| self.check_interval(interval))?;
            }
            Constraint::Cumulative {
                intervals,
                demands,
                capacity,
            } => {
                if intervals.is_empty() {
                    return Err(rejected("cumulative over no intervals"));
                }
                if intervals.len() != demands.len() {
                    return Err(rejected("cumulative with mismatched intervals and demands"));
                }
                if *capacity < 0 {
                    return Err(rejected("cumulative with a negative capacity"));
                }
                intervals
                    .iter()
                    .try_for_each(|&interval| self.check_interval(interval))?;
                for &demand in demands {
                    self.check_integer(demand)?;
                    if self.model.integers[demand].upper_bound <= 0 {
                        return Err(rejected("cumulative with a demand that is always zero"));
                    }
                }
            }
            Constraint::Circuit(arcs) => {
                if arcs.is_empty() {
                    return Err(rejected("circuit without arcs"));
                }
                arcs.iter()
                    .try_for_each(|arc| self.check_literal(arc.literal))?;
            }
        }

        Ok(())
    }
}

fn rejected(reason: &str) -> BackendError {
    BackendError::RejectedConstraint(reason.to_owned())
}

impl Backend for RecordingBackend {
    fn new_integer(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
        name: &str,
    ) -> Result<IntVar, BackendError> {
        if lower_bound > upper_bound {
            return Err(BackendError::EmptyDomain {
                name: name.to_owned(),
                lower_bound,
                upper_bound,
            });
        }

        let variable = self.model.integers.push(IntegerDomain {
            lower_bound,
            upper_bound,
            name: name.to_owned(),
        });
        trace!("new integer {variable} '{name}' in [{lower_bound}, {upper_bound}]");
        Ok(variable)
    }

    fn new_literal(&mut self, name: &str) -> Result<Literal, BackendError> {
        let variable = self.model.booleans.push(name.to_owned());
        trace!("new boolean {variable} '{name}'");
        Ok(Literal::new(variable))
    }

    fn new_interval(
        &mut self,
        interval: Interval,
        name: &str,
    ) -> Result<IntervalVar, BackendError> {
        self.check_integer(interval.start)?;
        self.check_integer(interval.duration)?;
        self.check_integer(interval.end)?;
        if let Some(presence) = interval.presence {
            self.check_literal(presence)?;
        }

        Ok(self.model.intervals.push(RecordedInterval {
            interval,
            name: name.to_owned(),
        }))
    }

    fn post(&mut self, constraint: Constraint) -> Result<(), BackendError> {
        self.post_implied_by(constraint, &[])
    }

    fn post_implied_by(
        &mut self,
        constraint: Constraint,
        enforcement: &[Literal],
    ) -> Result<(), BackendError> {
        self.check_constraint(&constraint)?;
        enforcement
            .iter()
            .try_for_each(|&literal| self.check_literal(literal))?;

        self.model.constraints.push(RecordedConstraint {
            constraint,
            enforcement: enforcement.to_vec(),
        });
        Ok(())
    }

    fn minimise(&mut self, objective: IntVar) -> Result<(), BackendError> {
        self.check_integer(objective)?;
        if self.model.objective.is_some() {
            return Err(BackendError::ObjectiveAlreadySet);
        }

        self.model.objective = Some(objective);
        Ok(())
    }
}
