use crate::containers::StorageKey;
use crate::problem::TaskId;

/// The setup times of a single resource, indexed by `(predecessor, successor)` task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetupMatrix {
    num_tasks: usize,
    durations: Vec<i32>,
}

impl SetupMatrix {
    pub(crate) fn zeroed(num_tasks: usize) -> SetupMatrix {
        SetupMatrix {
            num_tasks,
            durations: vec![0; num_tasks * num_tasks],
        }
    }

    pub(crate) fn set(&mut self, from: TaskId, to: TaskId, duration: i32) {
        let index = self.offset(from, to);
        self.durations[index] = duration;
    }

    /// The time needed between the end of `from` and the start of `to` when `to` directly
    /// follows `from`.
    pub fn get(&self, from: TaskId, to: TaskId) -> i32 {
        self.durations[self.offset(from, to)]
    }

    fn offset(&self, from: TaskId, to: TaskId) -> usize {
        from.index() * self.num_tasks + to.index()
    }
}
