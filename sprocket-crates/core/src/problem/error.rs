use thiserror::Error;

use super::JobId;
use super::ModeId;
use super::ResourceId;
use super::TaskId;

/// The reasons why [`ProblemBuilder::build`] can reject a problem.
///
/// [`ProblemBuilder::build`]: super::ProblemBuilder::build
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProblemError {
    #[error("{0} has no modes")]
    TaskWithoutModes(TaskId),

    #[error("{0} does not require any resource")]
    ModeWithoutResources(ModeId),

    #[error("{mode} requires {resource} more than once")]
    DuplicateModeResource { mode: ModeId, resource: ResourceId },

    #[error("{mode} has {resources} resources but {demands} demands")]
    DemandsMismatch {
        mode: ModeId,
        resources: usize,
        demands: usize,
    },

    #[error("{0} has a negative duration")]
    NegativeDuration(ModeId),

    #[error("{mode} has a negative demand on {resource}")]
    NegativeDemand { mode: ModeId, resource: ResourceId },

    #[error("{0} has a negative capacity")]
    NegativeCapacity(ResourceId),

    #[error("setup time on {resource} between {from} and {to} is negative")]
    NegativeSetupTime {
        resource: ResourceId,
        from: TaskId,
        to: TaskId,
    },

    #[error("{0} has a negative weight")]
    NegativeJobWeight(JobId),

    #[error("the objective has a negative weight")]
    NegativeObjectiveWeight,

    #[error("{0} has an empty time window")]
    EmptyTimeWindow(TaskId),

    #[error("the deadline of {0} lies before its release date")]
    EmptyJobWindow(JobId),

    #[error("{task} cannot be scheduled between the release date and deadline of {job}")]
    TaskOutsideJobWindow { task: TaskId, job: JobId },

    #[error("reference to unknown {0}")]
    UnknownTask(TaskId),

    #[error("reference to unknown {0}")]
    UnknownJob(JobId),

    #[error("reference to unknown {0}")]
    UnknownMode(ModeId),

    #[error("reference to unknown {0}")]
    UnknownResource(ResourceId),

    #[error("same-sequence constraint relates {first} tasks to {second} tasks")]
    SameSequenceLengthMismatch { first: usize, second: usize },
}
