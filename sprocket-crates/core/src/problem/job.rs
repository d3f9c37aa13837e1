use super::TaskId;

/// A collection of tasks which share a common envelope: the job starts when its first task
/// starts and ends when its last task ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    pub(crate) weight: i32,
    pub(crate) release_date: i32,
    pub(crate) deadline: Option<i32>,
    pub(crate) due_date: Option<i32>,
    pub(crate) name: Option<String>,
    /// Filled in by the builder from the `job` field of the tasks, in declaration order.
    pub(crate) tasks: Vec<TaskId>,
}

impl Default for Job {
    fn default() -> Self {
        Job {
            weight: 1,
            release_date: 0,
            deadline: None,
            due_date: None,
            name: None,
            tasks: vec![],
        }
    }
}

impl Job {
    pub fn new() -> Job {
        Job::default()
    }

    /// The weight of the job in the weighted objective components.
    pub fn with_weight(mut self, weight: i32) -> Job {
        self.weight = weight;
        self
    }

    /// The job cannot start before its release date.
    pub fn with_release_date(mut self, release_date: i32) -> Job {
        self.release_date = release_date;
        self
    }

    /// The job has to be completed by its deadline.
    pub fn with_deadline(mut self, deadline: i32) -> Job {
        self.deadline = Some(deadline);
        self
    }

    /// The due date is soft; completing after it is penalised by the tardiness objectives.
    pub fn with_due_date(mut self, due_date: i32) -> Job {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Job {
        self.name = Some(name.into());
        self
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }

    pub fn release_date(&self) -> i32 {
        self.release_date
    }

    pub fn deadline(&self) -> Option<i32> {
        self.deadline
    }

    pub fn due_date(&self) -> Option<i32> {
        self.due_date
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn tasks(&self) -> &[TaskId] {
        &self.tasks
    }
}
