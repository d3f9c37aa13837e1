//! Relations between the entities of a [`ProblemData`] which the compiler needs, but which are
//! not stored directly.
//!
//! Every function here is pure. An empty result is meaningful: it tells the compiler that
//! there is nothing to constrain.

mod setup_matrix;

use itertools::iproduct;
use itertools::Itertools;
pub use setup_matrix::*;

use crate::containers::KeyedVec;
use crate::problem::ModeId;
use crate::problem::ProblemData;
use crate::problem::ResourceId;
use crate::problem::TaskId;

/// The modes of every task, in declaration order.
pub fn task_modes(data: &ProblemData) -> KeyedVec<TaskId, Vec<ModeId>> {
    let mut task_modes: KeyedVec<TaskId, Vec<ModeId>> =
        KeyedVec::from_fn(data.num_tasks(), |_| vec![]);

    for (mode_id, mode) in data.modes().iter_with_keys() {
        task_modes[mode.task()].push(mode_id);
    }

    task_modes
}

/// The modes of `task`, in declaration order.
pub fn modes_of_task(data: &ProblemData, task: TaskId) -> Vec<ModeId> {
    data.modes()
        .iter_with_keys()
        .filter(|(_, mode)| mode.task() == task)
        .map(|(mode_id, _)| mode_id)
        .collect()
}

/// For every resource, the modes which use it together with their demand on it. The two
/// sequences are parallel.
pub fn resource_modes_and_demands(
    data: &ProblemData,
) -> KeyedVec<ResourceId, (Vec<ModeId>, Vec<i32>)> {
    let mut result: KeyedVec<ResourceId, (Vec<ModeId>, Vec<i32>)> =
        KeyedVec::from_fn(data.num_resources(), |_| (vec![], vec![]));

    for (mode_id, mode) in data.modes().iter_with_keys() {
        for (resource, demand) in mode.requirements() {
            let (modes, demands) = &mut result[resource];
            modes.push(mode_id);
            demands.push(demand);
        }
    }

    result
}

/// The modes which use `resource` and their demands on it, as parallel sequences.
pub fn modes_of_resource(data: &ProblemData, resource: ResourceId) -> (Vec<ModeId>, Vec<i32>) {
    data.modes()
        .iter_with_keys()
        .filter_map(|(mode_id, mode)| {
            mode.demand_for(resource)
                .map(|demand| (mode_id, demand))
        })
        .unzip()
}

/// The setup times of `resource`, or `None` if it has no nonzero setup time.
pub fn setup_matrix(data: &ProblemData, resource: ResourceId) -> Option<SetupMatrix> {
    let mut matrix = None;

    for ((setup_resource, from, to), duration) in data.setup_times() {
        if setup_resource != resource {
            continue;
        }

        matrix
            .get_or_insert_with(|| SetupMatrix::zeroed(data.num_tasks()))
            .set(from, to, duration);
    }

    matrix
}

/// For every mode of `first`, the modes of `second` which require exactly the same set of
/// resources.
pub fn identical_mode_pairs(
    data: &ProblemData,
    first: TaskId,
    second: TaskId,
) -> Vec<(ModeId, Vec<ModeId>)> {
    let second_modes = modes_of_task(data, second);

    modes_of_task(data, first)
        .into_iter()
        .map(|mode| {
            let resources = resource_set(data, mode);
            let identical = second_modes
                .iter()
                .copied()
                .filter(|&other| resource_set(data, other) == resources)
                .collect();
            (mode, identical)
        })
        .collect()
}

/// For every mode of `first`, the modes of `second` which share at least one resource with it.
/// These are the modes which conflict when the tasks have to use different resources.
pub fn different_mode_pairs(
    data: &ProblemData,
    first: TaskId,
    second: TaskId,
) -> Vec<(ModeId, Vec<ModeId>)> {
    let second_modes = modes_of_task(data, second);

    modes_of_task(data, first)
        .into_iter()
        .map(|mode| {
            let conflicting = second_modes
                .iter()
                .copied()
                .filter(|&other| !shared_resources(data, mode, other).is_empty())
                .collect();
            (mode, conflicting)
        })
        .collect()
}

/// Every pair of a mode of `first` and a mode of `second` which share a resource, together
/// with the shared resources.
pub fn intersecting_modes(
    data: &ProblemData,
    first: TaskId,
    second: TaskId,
) -> Vec<(ModeId, ModeId, Vec<ResourceId>)> {
    iproduct!(modes_of_task(data, first), modes_of_task(data, second))
        .filter_map(|(mode1, mode2)| {
            let shared = shared_resources(data, mode1, mode2);
            (!shared.is_empty()).then_some((mode1, mode2, shared))
        })
        .collect()
}

/// For every resource, the tasks which have a mode using it, ordered by task.
pub fn resource_tasks(data: &ProblemData) -> KeyedVec<ResourceId, Vec<TaskId>> {
    let mut result: KeyedVec<ResourceId, Vec<TaskId>> =
        KeyedVec::from_fn(data.num_resources(), |_| vec![]);

    for (task, modes) in task_modes(data).iter_with_keys() {
        modes
            .iter()
            .flat_map(|&mode| data.modes()[mode].resources().iter().copied())
            .unique()
            .for_each(|resource| result[resource].push(task));
    }

    result
}

/// An upper bound on every time point of a schedule which is not otherwise bounded.
///
/// The bound is the latest release date or earliest time window, plus for every task its
/// longest mode and its longest outgoing setup time, plus every positive timing delay.
pub fn horizon(data: &ProblemData) -> i32 {
    let earliest = data
        .jobs()
        .iter()
        .map(|job| job.release_date())
        .chain(
            data.tasks()
                .iter()
                .flat_map(|task| [task.earliest_start(), task.earliest_end()])
                .flatten(),
        )
        .fold(0, i32::max);

    let processing = task_modes(data)
        .iter()
        .map(|modes| {
            modes
                .iter()
                .map(|&mode| data.modes()[mode].duration())
                .max()
                .unwrap_or(0)
        })
        .fold(0, i32::saturating_add);

    let mut longest_setup: KeyedVec<TaskId, i32> =
        KeyedVec::from_fn(data.num_tasks(), |_| 0);
    for ((_, from, _), duration) in data.setup_times() {
        longest_setup[from] = longest_setup[from].max(duration);
    }
    let setups = longest_setup.iter().copied().fold(0, i32::saturating_add);

    let delays = data
        .constraints()
        .timing()
        .iter()
        .map(|timing| timing.delay.max(0))
        .fold(0, i32::saturating_add);

    earliest
        .saturating_add(processing)
        .saturating_add(setups)
        .saturating_add(delays)
}

fn resource_set(data: &ProblemData, mode: ModeId) -> Vec<ResourceId> {
    data.modes()[mode]
        .resources()
        .iter()
        .copied()
        .sorted()
        .collect()
}

fn shared_resources(data: &ProblemData, first: ModeId, second: ModeId) -> Vec<ResourceId> {
    let second = &data.modes()[second];

    data.modes()[first]
        .resources()
        .iter()
        .copied()
        .filter(|&resource| second.uses(resource))
        .collect()
}
