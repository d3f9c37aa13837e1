use super::JobId;

/// A unit of work. Exactly one of its modes is selected in every solution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub(crate) job: Option<JobId>,
    pub(crate) fixed_duration: bool,
    pub(crate) earliest_start: Option<i32>,
    pub(crate) latest_start: Option<i32>,
    pub(crate) earliest_end: Option<i32>,
    pub(crate) latest_end: Option<i32>,
    pub(crate) name: Option<String>,
}

impl Default for Task {
    fn default() -> Self {
        Task {
            job: None,
            fixed_duration: true,
            earliest_start: None,
            latest_start: None,
            earliest_end: None,
            latest_end: None,
            name: None,
        }
    }
}

impl Task {
    pub fn new() -> Task {
        Task::default()
    }

    pub fn in_job(mut self, job: JobId) -> Task {
        self.job = Some(job);
        self
    }

    /// If `false`, the duration of the selected mode is a lower bound on the duration of the
    /// task rather than its exact value.
    pub fn with_fixed_duration(mut self, fixed_duration: bool) -> Task {
        self.fixed_duration = fixed_duration;
        self
    }

    pub fn with_start_window(mut self, earliest: Option<i32>, latest: Option<i32>) -> Task {
        self.earliest_start = earliest;
        self.latest_start = latest;
        self
    }

    pub fn with_end_window(mut self, earliest: Option<i32>, latest: Option<i32>) -> Task {
        self.earliest_end = earliest;
        self.latest_end = latest;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Task {
        self.name = Some(name.into());
        self
    }

    pub fn job(&self) -> Option<JobId> {
        self.job
    }

    pub fn has_fixed_duration(&self) -> bool {
        self.fixed_duration
    }

    pub fn earliest_start(&self) -> Option<i32> {
        self.earliest_start
    }

    pub fn latest_start(&self) -> Option<i32> {
        self.latest_start
    }

    pub fn earliest_end(&self) -> Option<i32> {
        self.earliest_end
    }

    pub fn latest_end(&self) -> Option<i32> {
        self.latest_end
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
