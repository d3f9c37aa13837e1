use enum_map::Enum;
use enum_map::EnumMap;

use super::statistic_logging::log_statistic;
use super::statistic_logging::log_statistic_postfix;
use super::statistic_logging::should_log_statistics;
use crate::backend::Constraint;

/// The kinds of constraints a compiled model is made of.
#[derive(Debug, Clone, Copy, Enum, Hash, PartialEq, Eq)]
pub enum ConstraintKind {
    Linear,
    MinimumEquals,
    MaximumEquals,
    ExactlyOne,
    NoOverlap,
    Cumulative,
    Circuit,
}

impl ConstraintKind {
    pub fn of(constraint: &Constraint) -> ConstraintKind {
        match constraint {
            Constraint::Linear(_) => ConstraintKind::Linear,
            Constraint::MinimumEquals { .. } => ConstraintKind::MinimumEquals,
            Constraint::MaximumEquals { .. } => ConstraintKind::MaximumEquals,
            Constraint::ExactlyOne(_) => ConstraintKind::ExactlyOne,
            Constraint::NoOverlap(_) => ConstraintKind::NoOverlap,
            Constraint::Cumulative { .. } => ConstraintKind::Cumulative,
            Constraint::Circuit(_) => ConstraintKind::Circuit,
        }
    }

    fn name(self) -> &'static str {
        match self {
            ConstraintKind::Linear => "linear",
            ConstraintKind::MinimumEquals => "minimum_equals",
            ConstraintKind::MaximumEquals => "maximum_equals",
            ConstraintKind::ExactlyOne => "exactly_one",
            ConstraintKind::NoOverlap => "no_overlap",
            ConstraintKind::Cumulative => "cumulative",
            ConstraintKind::Circuit => "circuit",
        }
    }
}

/// Counts of what the compiler created and posted through the backend.
///
/// Two compilations of the same problem produce equal statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilationStatistics {
    pub num_integer_variables: usize,
    pub num_literals: usize,
    pub num_intervals: usize,
    pub num_sequence_variables: usize,
    /// Posted constraints per kind, counting half-reified ones as well.
    pub num_constraints: EnumMap<ConstraintKind, usize>,
    pub num_half_reified: usize,
}

impl CompilationStatistics {
    pub fn total_constraints(&self) -> usize {
        self.num_constraints.values().sum()
    }

    pub(crate) fn record_constraint(&mut self, constraint: &Constraint, half_reified: bool) {
        self.num_constraints[ConstraintKind::of(constraint)] += 1;
        if half_reified {
            self.num_half_reified += 1;
        }
    }

    /// Write the statistics through the configured statistic logger.
    pub fn log(&self) {
        if !should_log_statistics() {
            return;
        }

        log_statistic("num_integer_variables", self.num_integer_variables);
        log_statistic("num_literals", self.num_literals);
        log_statistic("num_intervals", self.num_intervals);
        log_statistic("num_sequence_variables", self.num_sequence_variables);
        for (kind, count) in &self.num_constraints {
            log_statistic(format!("num_{}_constraints", kind.name()), count);
        }
        log_statistic("num_half_reified", self.num_half_reified);
        log_statistic_postfix();
    }
}
