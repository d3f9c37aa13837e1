use sprocket_core::backend::BoolVar;
use sprocket_core::backend::IntVar;
use sprocket_core::backend::IntervalVar;
use sprocket_core::backend::Literal;
use sprocket_core::backend::RecordedModel;
use sprocket_core::containers::HashMap;

use crate::CheckError;

/// A value for (some of) the variables of a recorded model.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    integers: HashMap<IntVar, i32>,
    booleans: HashMap<BoolVar, bool>,
}

impl Assignment {
    pub fn set_integer(&mut self, variable: IntVar, value: i32) {
        let _ = self.integers.insert(variable, value);
    }

    /// Assign the boolean variable of `literal` such that `literal` evaluates to `value`.
    pub fn set_literal(&mut self, literal: Literal, value: bool) {
        let _ = self
            .booleans
            .insert(literal.variable(), value != literal.is_negated());
    }

    pub fn integer(&self, variable: IntVar) -> Option<i32> {
        self.integers.get(&variable).copied()
    }

    pub fn literal(&self, literal: Literal) -> Option<bool> {
        self.booleans
            .get(&literal.variable())
            .map(|&value| value != literal.is_negated())
    }

    pub(crate) fn integer_value(&self, variable: IntVar) -> Result<i32, CheckError> {
        self.integer(variable)
            .ok_or_else(|| CheckError::MissingValue(variable.to_string()))
    }

    pub(crate) fn literal_value(&self, literal: Literal) -> Result<bool, CheckError> {
        self.literal(literal)
            .ok_or_else(|| CheckError::MissingValue(literal.variable().to_string()))
    }

    /// The value of an interval of `model` under this assignment.
    pub fn interval(
        &self,
        model: &RecordedModel,
        interval: IntervalVar,
    ) -> Result<IntervalValue, CheckError> {
        let parts = model.interval(interval);

        if let Some(presence) = parts.presence {
            if !self.literal_value(presence)? {
                return Ok(IntervalValue::Absent);
            }
        }

        Ok(IntervalValue::Present {
            start: self.integer_value(parts.start)?,
            end: self.integer_value(parts.end)?,
        })
    }
}

/// The value of an interval variable. The start and end of an absent interval are
/// meaningless, so they are not part of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntervalValue {
    Absent,
    Present { start: i32, end: i32 },
}
