use thiserror::Error;

use crate::backend::BackendError;
use crate::problem::JobId;
use crate::problem::ResourceId;
use crate::problem::TaskId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A sequencing constraint refers to a machine for which no sequence variables were
    /// allocated.
    #[error("{0} has no sequence variables")]
    MissingSequenceVariables(ResourceId),

    #[error("the backend rejected a request: {0}")]
    Backend(#[from] BackendError),
}

/// The problem asks for something which cannot be compiled. These errors are fatal; compiling
/// the same problem again fails in the same way.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("permutation problems can only contain machines, but {0} is not a machine")]
    PermutationOnNonMachine(ResourceId),

    #[error("a permutation problem needs at least one job")]
    PermutationWithoutJobs,

    #[error("{0} is not a machine and cannot be sequenced")]
    SequencingOnNonMachine(ResourceId),

    #[error("{task} is sequenced on {machine}, but none of its modes uses that machine")]
    TaskNotOnMachine { task: TaskId, machine: ResourceId },

    #[error("unknown objective '{0}'")]
    UnknownObjective(String),

    #[error("the objective is defined over jobs, but the problem has none")]
    ObjectiveRequiresJobs,

    #[error("the weighted objective can exceed the 32-bit range of the backend")]
    ObjectiveOutOfRange,

    #[error("the delay between {first} and {second} cannot be negated within 32 bits")]
    DelayOutOfRange { first: TaskId, second: TaskId },

    #[error("the lateness of {0} does not fit in 32 bits")]
    DueDateOutOfRange(JobId),
}
