#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use std::collections::BTreeSet;

use itertools::iproduct;
use itertools::Itertools;
use sprocket_checker::objective_value;
use sprocket_checker::verify_assignment;
use sprocket_checker::CheckError;
use sprocket_checker::ScheduleCandidate;
use sprocket_checker::Violation;
use sprocket_core::backend::RecordedModel;
use sprocket_core::backend::RecordingBackend;
use sprocket_core::compile;
use sprocket_core::problem::Job;
use sprocket_core::problem::ModeId;
use sprocket_core::problem::Objective;
use sprocket_core::problem::ProblemBuilder;
use sprocket_core::problem::ProblemData;
use sprocket_core::problem::Task;
use sprocket_core::problem::TaskId;
use sprocket_core::topology;
use sprocket_core::CompileOptions;
use sprocket_core::CompiledModel;

fn compile_recorded(data: &ProblemData) -> (CompiledModel, RecordedModel) {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut backend = RecordingBackend::default();
    let compiled = compile(data, &mut backend, CompileOptions::default()).unwrap();
    (compiled, backend.into_model())
}

fn accepts(
    data: &ProblemData,
    compiled: &CompiledModel,
    model: &RecordedModel,
    selection: impl IntoIterator<Item = (ModeId, i32)>,
) -> bool {
    let assignment = ScheduleCandidate::new(data, compiled, selection).into_assignment();
    verify_assignment(model, &assignment).is_ok()
}

/// Two jobs of two tasks each, where every task can run on either of two machines.
fn two_machine_flow_shop() -> ProblemData {
    let mut builder = ProblemBuilder::default();
    let machines = [builder.add_machine(), builder.add_machine()];

    for _ in 0..2 {
        let job = builder.add_job(Job::new());
        let first = builder.add_task(Task::new().in_job(job));
        let second = builder.add_task(Task::new().in_job(job));
        for (machine, duration) in machines.into_iter().zip([3, 5]) {
            let _ = builder.add_mode(first, duration, [(machine, 1)]);
        }
        for (machine, duration) in machines.into_iter().zip([4, 2]) {
            let _ = builder.add_mode(second, duration, [(machine, 1)]);
        }
        builder.add_end_before_start(first, second, 0);
    }

    builder.build().unwrap()
}

#[test]
fn smallest_accepted_makespan_is_the_optimum() {
    let data = two_machine_flow_shop();
    let (compiled, model) = compile_recorded(&data);
    let mode_options = data
        .tasks()
        .keys()
        .map(|task| topology::modes_of_task(&data, task))
        .collect::<Vec<_>>();

    let mut best: Option<i32> = None;
    for modes in mode_options.iter().multi_cartesian_product() {
        for starts in (0..data.num_tasks()).map(|_| 0..=7).multi_cartesian_product() {
            let candidate = ScheduleCandidate::new(
                &data,
                &compiled,
                modes.iter().map(|&&mode| mode).zip(starts),
            );
            let makespan = candidate.makespan();
            if best.is_some_and(|best| makespan >= best) {
                continue;
            }

            let assignment = candidate.into_assignment();
            if verify_assignment(&model, &assignment).is_ok() {
                assert_eq!(objective_value(&model, &assignment), Some(makespan));
                best = Some(makespan);
            }
        }
    }

    assert_eq!(best, Some(7));
}

#[test]
fn known_optimal_schedule_is_accepted() {
    let data = two_machine_flow_shop();
    let (compiled, model) = compile_recorded(&data);
    let tasks = data.tasks().keys().collect::<Vec<_>>();
    let modes = |task: TaskId| topology::modes_of_task(&data, task);

    // The first job stays on the first machine and the second job on the second machine.
    let selection = [
        (modes(tasks[0])[0], 0),
        (modes(tasks[1])[0], 3),
        (modes(tasks[2])[1], 0),
        (modes(tasks[3])[1], 5),
    ];

    let assignment = ScheduleCandidate::new(&data, &compiled, selection).into_assignment();

    assert_eq!(verify_assignment(&model, &assignment), Ok(()));
    assert_eq!(objective_value(&model, &assignment), Some(7));
}

#[test]
fn precedence_violation_is_rejected() {
    let data = two_machine_flow_shop();
    let (compiled, model) = compile_recorded(&data);
    let tasks = data.tasks().keys().collect::<Vec<_>>();
    let modes = |task: TaskId| topology::modes_of_task(&data, task);

    // The second task of the first job starts before the first one ends.
    let selection = [
        (modes(tasks[0])[0], 0),
        (modes(tasks[1])[1], 2),
        (modes(tasks[2])[1], 4),
        (modes(tasks[3])[0], 9),
    ];

    assert!(!accepts(&data, &compiled, &model, selection));
}

#[test]
fn non_renewable_capacity_limits_the_selected_modes() {
    let mut builder = ProblemBuilder::default();
    let budget = builder.add_non_renewable(10);
    let crew = builder.add_renewable(3);
    let mut tasks = vec![];
    for _ in 0..3 {
        let task = builder.add_task(Task::new());
        let expensive = builder.add_mode(task, 1, [(budget, 4)]);
        let free = builder.add_mode(task, 3, [(crew, 1)]);
        tasks.push([expensive, free]);
    }
    builder.set_objective(Objective::none());
    let data = builder.build().unwrap();
    let (compiled, model) = compile_recorded(&data);

    for choice in (0..3).map(|_| 0..2).multi_cartesian_product() {
        let num_expensive = choice.iter().filter(|&&option| option == 0).count();
        let selection = tasks
            .iter()
            .zip(&choice)
            .map(|(modes, &option)| (modes[option], 0));

        assert_eq!(
            accepts(&data, &compiled, &model, selection),
            num_expensive <= 2,
            "{choice:?}"
        );
    }
}

#[test]
fn setup_time_only_applies_to_the_direct_successor() {
    let mut builder = ProblemBuilder::default();
    let machine = builder.add_machine();
    let first = builder.add_task(Task::new());
    let second = builder.add_task(Task::new());
    let first_mode = builder.add_mode(first, 2, [(machine, 1)]);
    let second_mode = builder.add_mode(second, 2, [(machine, 1)]);
    builder.add_setup_time(machine, first, second, 5);
    builder.set_objective(Objective::none());
    let data = builder.build().unwrap();
    let (compiled, model) = compile_recorded(&data);

    let schedule = |first_start, second_start| {
        [(first_mode, first_start), (second_mode, second_start)]
    };

    assert!(!accepts(&data, &compiled, &model, schedule(0, 2)));
    assert!(!accepts(&data, &compiled, &model, schedule(0, 6)));
    assert!(accepts(&data, &compiled, &model, schedule(0, 7)));
    // Without a setup time in the other direction, the reverse order may be tight.
    assert!(accepts(&data, &compiled, &model, schedule(2, 0)));
    assert!(!accepts(&data, &compiled, &model, schedule(1, 0)));
}

/// The schedules accepted for two unit tasks on two machines, where the tasks have to use the
/// same machine.
fn identical_resource_schedules(swap: bool) -> BTreeSet<Vec<(ModeId, i32)>> {
    let mut builder = ProblemBuilder::default();
    let machines = [builder.add_machine(), builder.add_machine()];
    let tasks = [builder.add_task(Task::new()), builder.add_task(Task::new())];
    for task in tasks {
        for machine in machines {
            let _ = builder.add_mode(task, 1, [(machine, 1)]);
        }
    }
    if swap {
        builder.add_identical_resources(tasks[1], tasks[0]);
    } else {
        builder.add_identical_resources(tasks[0], tasks[1]);
    }
    builder.set_objective(Objective::none());
    let data = builder.build().unwrap();
    let (compiled, model) = compile_recorded(&data);

    let mut accepted = BTreeSet::new();
    for modes in tasks
        .iter()
        .map(|&task| topology::modes_of_task(&data, task))
        .multi_cartesian_product()
    {
        for starts in (0..2).map(|_| 0..=2).multi_cartesian_product() {
            let selection = modes.iter().copied().zip(starts).collect::<Vec<_>>();
            if accepts(&data, &compiled, &model, selection.clone()) {
                let [(first, _), (second, _)] = selection[..] else {
                    unreachable!()
                };
                assert_eq!(
                    data.modes()[first].resources(),
                    data.modes()[second].resources()
                );
                let _ = accepted.insert(selection);
            }
        }
    }
    accepted
}

#[test]
fn identical_resources_is_symmetric() {
    let forward = identical_resource_schedules(false);
    let backward = identical_resource_schedules(true);

    assert!(!forward.is_empty());
    assert_eq!(forward, backward);
}

#[test]
fn permutation_admits_a_single_job_order_for_a_schedule() {
    let mut builder = ProblemBuilder::default();
    let machines = [builder.add_machine(), builder.add_machine()];
    let mut selection = vec![];
    for index in 0..3 {
        let job = builder.add_job(Job::new());
        let mut previous = None;
        for (stage, machine) in machines.into_iter().enumerate() {
            let task = builder.add_task(Task::new().in_job(job));
            let mode = builder.add_mode(task, 1, [(machine, 1)]);
            selection.push((mode, index + stage as i32));
            if let Some(previous) = previous {
                builder.add_end_before_start(previous, task, 0);
            }
            previous = Some(task);
        }
    }
    builder.set_permutation(true);
    let data = builder.build().unwrap();
    let (compiled, model) = compile_recorded(&data);
    let job_order = compiled.job_order.clone().unwrap();
    let literals = job_order.literals().collect::<Vec<_>>();
    assert_eq!(literals.len(), 12);

    let schedule = ScheduleCandidate::new(&data, &compiled, selection).into_assignment();
    assert_eq!(verify_assignment(&model, &schedule), Ok(()));

    let mut num_accepted = 0;
    for values in (0..literals.len())
        .map(|_| [false, true])
        .multi_cartesian_product()
    {
        let mut assignment = schedule.clone();
        for (&literal, value) in literals.iter().zip(values) {
            assignment.set_literal(literal, value);
        }
        if verify_assignment(&model, &assignment).is_ok() {
            num_accepted += 1;
        }
    }

    assert_eq!(num_accepted, 1);
}

#[test]
fn selecting_two_modes_violates_exactly_one() {
    let mut builder = ProblemBuilder::default();
    let machines = [builder.add_machine(), builder.add_machine()];
    let task = builder.add_task(Task::new());
    let modes = machines.map(|machine| builder.add_mode(task, 2, [(machine, 1)]));
    let data = builder.build().unwrap();
    let (compiled, model) = compile_recorded(&data);

    let mut assignment = ScheduleCandidate::new(&data, &compiled, [(modes[0], 0)]).into_assignment();
    assert_eq!(verify_assignment(&model, &assignment), Ok(()));

    assignment.set_literal(compiled.variables.mode_var(modes[1]).presence, true);

    assert!(matches!(
        verify_assignment(&model, &assignment),
        Err(CheckError::Violated {
            reason: Violation::ExactlyOne(2),
            ..
        })
    ));
}

#[test]
fn start_beyond_the_horizon_is_out_of_domain() {
    let mut builder = ProblemBuilder::default();
    let machine = builder.add_machine();
    let task = builder.add_task(Task::new());
    let mode = builder.add_mode(task, 2, [(machine, 1)]);
    let data = builder.build().unwrap();
    let (compiled, model) = compile_recorded(&data);

    let assignment =
        ScheduleCandidate::new(&data, &compiled, [(mode, compiled.horizon)]).into_assignment();

    assert!(matches!(
        verify_assignment(&model, &assignment),
        Err(CheckError::OutOfDomain { .. })
    ));
}

/// Two unit tasks which can each run on either of two machines.
fn two_flexible_tasks(builder: &mut ProblemBuilder) -> ([TaskId; 2], [[ModeId; 2]; 2]) {
    let machines = [builder.add_machine(), builder.add_machine()];
    let tasks = [builder.add_task(Task::new()), builder.add_task(Task::new())];
    let modes = tasks.map(|task| machines.map(|machine| builder.add_mode(task, 1, [(machine, 1)])));
    (tasks, modes)
}

#[test]
fn different_resources_rule_out_sharing_a_machine() {
    let mut builder = ProblemBuilder::default();
    let (tasks, modes) = two_flexible_tasks(&mut builder);
    builder.add_different_resources(tasks[0], tasks[1]);
    builder.set_objective(Objective::none());
    let data = builder.build().unwrap();
    let (compiled, model) = compile_recorded(&data);

    for (first, second) in iproduct!(0..2, 0..2) {
        let selection = [(modes[0][first], 0), (modes[1][second], 1)];
        assert_eq!(
            accepts(&data, &compiled, &model, selection),
            first != second,
            "{first} {second}"
        );
    }
}

#[test]
fn mode_dependency_requires_one_of_the_dependents() {
    let mut builder = ProblemBuilder::default();
    let (_, modes) = two_flexible_tasks(&mut builder);
    builder.add_mode_dependency(modes[0][0], vec![modes[1][1]]);
    builder.set_objective(Objective::none());
    let data = builder.build().unwrap();
    let (compiled, model) = compile_recorded(&data);

    let schedule = |first: ModeId, second: ModeId| [(first, 0), (second, 1)];

    assert!(!accepts(&data, &compiled, &model, schedule(modes[0][0], modes[1][0])));
    assert!(accepts(&data, &compiled, &model, schedule(modes[0][0], modes[1][1])));
    assert!(accepts(&data, &compiled, &model, schedule(modes[0][1], modes[1][0])));
    assert!(accepts(&data, &compiled, &model, schedule(modes[0][1], modes[1][1])));
}

#[test]
fn consecutive_tasks_cannot_be_separated_on_their_machine() {
    let mut builder = ProblemBuilder::default();
    let machine = builder.add_machine();
    let modes = [0, 1, 2].map(|_| {
        let task = builder.add_task(Task::new());
        (task, builder.add_mode(task, 1, [(machine, 1)]))
    });
    let [(first, first_mode), (second, second_mode), (_, third_mode)] = modes;
    builder.add_consecutive(first, second);
    builder.set_objective(Objective::none());
    let data = builder.build().unwrap();
    let (compiled, model) = compile_recorded(&data);

    let schedule = |starts: [i32; 3]| {
        [first_mode, second_mode, third_mode]
            .into_iter()
            .zip(starts)
    };

    assert!(accepts(&data, &compiled, &model, schedule([0, 1, 2])));
    assert!(accepts(&data, &compiled, &model, schedule([1, 2, 0])));
    assert!(!accepts(&data, &compiled, &model, schedule([0, 2, 1])));
    assert!(!accepts(&data, &compiled, &model, schedule([1, 0, 2])));
}

#[test]
fn same_sequence_machines_process_corresponding_tasks_in_one_order() {
    let mut builder = ProblemBuilder::default();
    let machines = [builder.add_machine(), builder.add_machine()];
    let tasks = machines.map(|machine| {
        [0, 1].map(|_| {
            let task = builder.add_task(Task::new());
            (task, builder.add_mode(task, 1, [(machine, 1)]))
        })
    });
    builder.add_same_sequence(
        machines[0],
        machines[1],
        tasks[0].iter().map(|&(task, _)| task).collect(),
        tasks[1].iter().map(|&(task, _)| task).collect(),
    );
    builder.set_objective(Objective::none());
    let data = builder.build().unwrap();
    let (compiled, model) = compile_recorded(&data);

    let schedule = |starts: [i32; 4]| {
        tasks
            .iter()
            .flatten()
            .map(|&(_, mode)| mode)
            .zip(starts)
            .collect::<Vec<_>>()
    };

    assert!(accepts(&data, &compiled, &model, schedule([0, 1, 0, 1])));
    assert!(accepts(&data, &compiled, &model, schedule([1, 0, 1, 0])));
    assert!(!accepts(&data, &compiled, &model, schedule([0, 1, 1, 0])));
}
