use crate::backend::IntVar;
use crate::backend::IntervalVar;
use crate::backend::Literal;

/// The span of a job: the earliest start and the latest end over its tasks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct JobVar {
    pub start: IntVar,
    pub end: IntVar,
}

/// The main variables of a task. The interval is always present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskVar {
    pub start: IntVar,
    pub end: IntVar,
    pub duration: IntVar,
    pub interval: IntervalVar,
}

/// The selection of one mode of a task. The interval shares the time variables of the task and
/// is present exactly when the mode is selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModeVar {
    pub presence: Literal,
    pub interval: IntervalVar,
}

/// The assignment of a task to a resource which one of its modes can use.
///
/// The interval shares the time variables of the task. `demand` lies in `[0, max_demand]`,
/// where `max_demand` is the largest demand any mode of the task places on the resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AssignVar {
    pub presence: Literal,
    pub demand: IntVar,
    pub interval: IntervalVar,
    pub max_demand: i32,
}
