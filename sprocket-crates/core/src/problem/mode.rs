use super::ResourceId;
use super::TaskId;

/// One way of processing a task: a duration together with the resources it occupies and the
/// demand it places on each of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mode {
    pub(crate) task: TaskId,
    pub(crate) duration: i32,
    pub(crate) resources: Vec<ResourceId>,
    /// Parallel to `resources`.
    pub(crate) demands: Vec<i32>,
}

impl Mode {
    pub fn task(&self) -> TaskId {
        self.task
    }

    pub fn duration(&self) -> i32 {
        self.duration
    }

    pub fn resources(&self) -> &[ResourceId] {
        &self.resources
    }

    pub fn demands(&self) -> &[i32] {
        &self.demands
    }

    /// Iterate over the `(resource, demand)` pairs of this mode.
    pub fn requirements(&self) -> impl Iterator<Item = (ResourceId, i32)> + '_ {
        self.resources
            .iter()
            .copied()
            .zip(self.demands.iter().copied())
    }

    pub fn uses(&self, resource: ResourceId) -> bool {
        self.resources.contains(&resource)
    }

    /// The demand of this mode on `resource`, or `None` if the mode does not use it.
    pub fn demand_for(&self, resource: ResourceId) -> Option<i32> {
        self.requirements()
            .find(|(candidate, _)| *candidate == resource)
            .map(|(_, demand)| demand)
    }
}
