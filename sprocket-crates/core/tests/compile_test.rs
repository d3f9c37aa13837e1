#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use sprocket_core::backend;
use sprocket_core::backend::Constraint;
use sprocket_core::backend::RecordingBackend;
use sprocket_core::compile;
use sprocket_core::compiler::ConfigurationError;
use sprocket_core::problem::Job;
use sprocket_core::problem::ObjectiveKind;
use sprocket_core::problem::ProblemBuilder;
use sprocket_core::problem::ProblemData;
use sprocket_core::problem::Task;
use sprocket_core::statistics::ConstraintKind;
use sprocket_core::CompileError;
use sprocket_core::CompileOptions;

/// A hybrid flow shop with a renewable crew, setup times and a few side constraints.
fn hybrid_flow_shop() -> ProblemData {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut builder = ProblemBuilder::default();
    let stage_one = [builder.add_machine(), builder.add_machine()];
    let stage_two = builder.add_machine();
    let crew = builder.add_renewable(2);
    let budget = builder.add_non_renewable(9);

    let mut tasks = vec![];
    for index in 0..3 {
        let job = builder.add_job(Job::new().with_due_date(6 + index).with_weight(index + 1));
        let first = builder.add_task(Task::new().in_job(job));
        let second = builder.add_task(Task::new().in_job(job));
        for (offset, machine) in stage_one.into_iter().enumerate() {
            let duration = 2 + offset as i32 + index;
            let _ = builder.add_mode(first, duration, [(machine, 1), (crew, 1), (budget, 2)]);
        }
        let _ = builder.add_mode(second, 3, [(stage_two, 1), (crew, 1)]);
        builder.add_end_before_start(first, second, 0);
        tasks.push((first, second));
    }

    builder.add_setup_time(stage_two, tasks[0].1, tasks[1].1, 2);
    builder.add_setup_time(stage_two, tasks[1].1, tasks[2].1, 1);
    builder.add_different_resources(tasks[0].0, tasks[1].0);
    builder.set_objective(ObjectiveKind::TotalTardiness);

    builder.build().expect("valid problem")
}

#[test]
fn compiling_twice_records_the_same_model() {
    let data = hybrid_flow_shop();

    let mut first_backend = RecordingBackend::default();
    let first = compile(&data, &mut first_backend, CompileOptions::default()).unwrap();
    let mut second_backend = RecordingBackend::default();
    let second = compile(&data, &mut second_backend, CompileOptions::default()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_backend.into_model(), second_backend.into_model());
}

#[test]
fn statistics_count_what_the_backend_received() {
    let data = hybrid_flow_shop();
    let mut backend = RecordingBackend::default();

    let compiled = compile(&data, &mut backend, CompileOptions::default()).unwrap();

    let model = backend.model();
    let statistics = &compiled.statistics;
    assert_eq!(statistics.num_integer_variables, model.integers().len());
    assert_eq!(statistics.num_literals, model.booleans().len());
    assert_eq!(statistics.num_intervals, model.intervals().len());
    assert_eq!(statistics.total_constraints(), model.constraints().len());
    assert_eq!(
        statistics.num_half_reified,
        model
            .constraints()
            .iter()
            .filter(|recorded| !recorded.enforcement.is_empty())
            .count()
    );
    assert_eq!(statistics.num_sequence_variables, 1);
    assert_eq!(statistics.num_constraints[ConstraintKind::Circuit], 1);
    assert_eq!(statistics.num_constraints[ConstraintKind::Cumulative], 1);
    assert_eq!(statistics.num_constraints[ConstraintKind::NoOverlap], 3);
}

#[test]
fn cumulative_uses_the_declared_capacity() {
    let data = hybrid_flow_shop();
    let mut backend = RecordingBackend::default();

    let _ = compile(&data, &mut backend, CompileOptions::default()).unwrap();

    let capacities = backend
        .model()
        .hard_constraints()
        .filter_map(|constraint| match constraint {
            Constraint::Cumulative {
                intervals,
                capacity,
                ..
            } => Some((intervals.len(), *capacity)),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(capacities, vec![(6, 2)]);
}

#[test]
fn zero_demand_assignments_are_left_out_of_the_cumulative() {
    let mut builder = ProblemBuilder::default();
    let crew = builder.add_renewable(1);
    let machine = builder.add_machine();
    let busy = builder.add_task(Task::new());
    let idle = builder.add_task(Task::new());
    let _ = builder.add_mode(busy, 2, [(crew, 1)]);
    let _ = builder.add_mode(idle, 2, [(crew, 0), (machine, 1)]);
    let data = builder.build().unwrap();
    let mut backend = RecordingBackend::default();

    let compiled = compile(&data, &mut backend, CompileOptions::default()).unwrap();

    let busy_interval = compiled.variables.assign_var(busy, crew).unwrap().interval;
    let cumulative = backend
        .model()
        .hard_constraints()
        .find(|constraint| matches!(constraint, Constraint::Cumulative { .. }))
        .cloned();
    assert_eq!(
        cumulative,
        Some(backend::cumulative(
            vec![busy_interval],
            vec![compiled.variables.assign_var(busy, crew).unwrap().demand],
            1
        ))
    );
}

#[test]
fn resources_without_modes_are_skipped() {
    let mut builder = ProblemBuilder::default();
    let used = builder.add_machine();
    let _unused_machine = builder.add_machine();
    let _unused_crew = builder.add_renewable(3);
    let task = builder.add_task(Task::new());
    let _ = builder.add_mode(task, 2, [(used, 1)]);
    let data = builder.build().unwrap();
    let mut backend = RecordingBackend::default();

    let compiled = compile(&data, &mut backend, CompileOptions::default()).unwrap();

    assert_eq!(compiled.statistics.num_constraints[ConstraintKind::NoOverlap], 1);
    assert_eq!(compiled.statistics.num_constraints[ConstraintKind::Cumulative], 0);
}

#[test]
fn permutation_over_a_renewable_resource_is_rejected() {
    let mut builder = ProblemBuilder::default();
    let machine = builder.add_machine();
    let crew = builder.add_renewable(1);
    let job = builder.add_job(Job::new());
    let task = builder.add_task(Task::new().in_job(job));
    let _ = builder.add_mode(task, 2, [(machine, 1), (crew, 1)]);
    builder.set_permutation(true);
    let data = builder.build().unwrap();

    let result = compile(
        &data,
        &mut RecordingBackend::default(),
        CompileOptions::default(),
    );

    assert_eq!(
        result.err(),
        Some(CompileError::Configuration(
            ConfigurationError::PermutationOnNonMachine(crew)
        ))
    );
}

#[test]
fn permutation_without_jobs_is_rejected() {
    let mut builder = ProblemBuilder::default();
    let machine = builder.add_machine();
    let task = builder.add_task(Task::new());
    let _ = builder.add_mode(task, 2, [(machine, 1)]);
    builder.set_permutation(true);
    let data = builder.build().unwrap();

    let result = compile(
        &data,
        &mut RecordingBackend::default(),
        CompileOptions::default(),
    );

    assert_eq!(
        result.err(),
        Some(CompileError::Configuration(
            ConfigurationError::PermutationWithoutJobs
        ))
    );
}

#[test]
fn same_sequence_equates_corresponding_arcs() {
    let mut builder = ProblemBuilder::default();
    let machines = [builder.add_machine(), builder.add_machine()];
    let mut tasks = [vec![], vec![]];
    for (machine, tasks) in machines.into_iter().zip(&mut tasks) {
        for _ in 0..3 {
            let task = builder.add_task(Task::new());
            let _ = builder.add_mode(task, 1, [(machine, 1)]);
            tasks.push(task);
        }
    }
    let [first_tasks, second_tasks] = tasks;
    builder.add_same_sequence(
        machines[0],
        machines[1],
        first_tasks.clone(),
        second_tasks.clone(),
    );
    let data = builder.build().unwrap();
    let mut backend = RecordingBackend::default();

    let compiled = compile(&data, &mut backend, CompileOptions::default()).unwrap();

    let first = compiled.variables.sequence_var(machines[0]).unwrap();
    let second = compiled.variables.sequence_var(machines[1]).unwrap();
    let expected = backend::equals(
        [
            first.arc(first_tasks[2], first_tasks[0]).unwrap().scaled(1),
            second.arc(second_tasks[2], second_tasks[0]).unwrap().scaled(-1),
        ],
        0,
    );
    assert!(backend
        .model()
        .hard_constraints()
        .any(|constraint| *constraint == expected));
}

#[test]
fn consecutive_tasks_force_the_arc_between_them() {
    let mut builder = ProblemBuilder::default();
    let machine = builder.add_machine();
    let first = builder.add_task(Task::new());
    let second = builder.add_task(Task::new());
    let first_mode = builder.add_mode(first, 1, [(machine, 1)]);
    let second_mode = builder.add_mode(second, 1, [(machine, 1)]);
    builder.add_consecutive(first, second);
    let data = builder.build().unwrap();
    let mut backend = RecordingBackend::default();

    let compiled = compile(&data, &mut backend, CompileOptions::default()).unwrap();

    let arc = compiled
        .variables
        .sequence_var(machine)
        .unwrap()
        .arc(first, second)
        .unwrap();
    let recorded = backend
        .model()
        .constraints()
        .iter()
        .find(|recorded| recorded.constraint == backend::equals([arc.into()], 1))
        .unwrap();
    assert_eq!(
        recorded.enforcement,
        vec![
            compiled.variables.mode_var(first_mode).presence,
            compiled.variables.mode_var(second_mode).presence,
        ]
    );
}
