use std::str::FromStr;

use crate::compiler::ConfigurationError;

/// A weighted combination of scheduling objectives. All weights are non-negative; components
/// with a weight of zero are not part of the compiled objective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Objective {
    pub weight_makespan: i32,
    pub weight_total_flow_time: i32,
    pub weight_total_tardiness: i32,
    pub weight_total_earliness: i32,
    pub weight_max_tardiness: i32,
}

impl Default for Objective {
    fn default() -> Self {
        Objective::from(ObjectiveKind::Makespan)
    }
}

impl Objective {
    /// An objective where every weight is zero; the compiled model is then a satisfaction
    /// problem.
    pub fn none() -> Objective {
        Objective {
            weight_makespan: 0,
            weight_total_flow_time: 0,
            weight_total_tardiness: 0,
            weight_total_earliness: 0,
            weight_max_tardiness: 0,
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Objective::none()
    }

    /// Whether any component that is defined in terms of jobs has a non-zero weight.
    pub fn uses_jobs(&self) -> bool {
        self.weight_total_flow_time > 0
            || self.weight_total_tardiness > 0
            || self.weight_total_earliness > 0
            || self.weight_max_tardiness > 0
    }

    pub(crate) fn weights(&self) -> [i32; 5] {
        [
            self.weight_makespan,
            self.weight_total_flow_time,
            self.weight_total_tardiness,
            self.weight_total_earliness,
            self.weight_max_tardiness,
        ]
    }
}

/// The single-component objectives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ObjectiveKind {
    /// Minimise the latest completion time over all tasks.
    Makespan,
    /// Minimise the weighted sum of `end - release date` over all jobs.
    TotalFlowTime,
    /// Minimise the weighted sum of `max(0, end - due date)` over all jobs.
    TotalTardiness,
    /// Minimise the weighted sum of `max(0, due date - end)` over all jobs.
    TotalEarliness,
    /// Minimise the largest tardiness over all jobs.
    MaxTardiness,
}

impl From<ObjectiveKind> for Objective {
    fn from(kind: ObjectiveKind) -> Self {
        let mut objective = Objective::none();
        match kind {
            ObjectiveKind::Makespan => objective.weight_makespan = 1,
            ObjectiveKind::TotalFlowTime => objective.weight_total_flow_time = 1,
            ObjectiveKind::TotalTardiness => objective.weight_total_tardiness = 1,
            ObjectiveKind::TotalEarliness => objective.weight_total_earliness = 1,
            ObjectiveKind::MaxTardiness => objective.weight_max_tardiness = 1,
        }
        objective
    }
}

impl FromStr for ObjectiveKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "makespan" => Ok(ObjectiveKind::Makespan),
            "total-flow-time" | "total_flow_time" => Ok(ObjectiveKind::TotalFlowTime),
            "total-tardiness" | "total_tardiness" => Ok(ObjectiveKind::TotalTardiness),
            "total-earliness" | "total_earliness" => Ok(ObjectiveKind::TotalEarliness),
            "max-tardiness" | "max_tardiness" => Ok(ObjectiveKind::MaxTardiness),
            other => Err(ConfigurationError::UnknownObjective(other.to_owned())),
        }
    }
}
