use std::collections::BTreeMap;

use itertools::Itertools;
use sprocket_core::backend::CircuitArc;
use sprocket_core::backend::Comparison;
use sprocket_core::backend::Constraint;
use sprocket_core::backend::IntVar;
use sprocket_core::backend::IntervalVar;
use sprocket_core::backend::LinearConstraint;
use sprocket_core::backend::Literal;
use sprocket_core::backend::RecordedModel;
use sprocket_core::backend::TermVariable;

use crate::Assignment;
use crate::CheckError;
use crate::IntervalValue;
use crate::Violation;

/// Whether a present interval satisfies `start + duration = end`. Absent intervals always do.
pub(crate) fn interval_is_consistent(
    model: &RecordedModel,
    assignment: &Assignment,
    interval: IntervalVar,
) -> Result<bool, CheckError> {
    match assignment.interval(model, interval)? {
        IntervalValue::Absent => Ok(true),
        IntervalValue::Present { start, end } => {
            let duration = assignment.integer_value(model.interval(interval).duration)?;
            Ok(i64::from(start) + i64::from(duration) == i64::from(end))
        }
    }
}

/// Evaluate `constraint` under `assignment`, returning how it is violated if it is.
pub(crate) fn evaluate(
    model: &RecordedModel,
    assignment: &Assignment,
    constraint: &Constraint,
) -> Result<Option<Violation>, CheckError> {
    match constraint {
        Constraint::Linear(linear) => evaluate_linear(assignment, linear),
        Constraint::MinimumEquals { target, operands } => {
            evaluate_extremum(assignment, *target, operands, |values| values.min())
        }
        Constraint::MaximumEquals { target, operands } => {
            evaluate_extremum(assignment, *target, operands, |values| values.max())
        }
        Constraint::ExactlyOne(literals) => evaluate_exactly_one(assignment, literals),
        Constraint::NoOverlap(intervals) => evaluate_no_overlap(model, assignment, intervals),
        Constraint::Cumulative {
            intervals,
            demands,
            capacity,
        } => evaluate_cumulative(model, assignment, intervals, demands, *capacity),
        Constraint::Circuit(arcs) => evaluate_circuit(assignment, arcs),
    }
}

fn evaluate_linear(
    assignment: &Assignment,
    linear: &LinearConstraint,
) -> Result<Option<Violation>, CheckError> {
    let mut lhs: i64 = 0;
    for term in &linear.terms {
        let value = match term.variable {
            TermVariable::Integer(variable) => i64::from(assignment.integer_value(variable)?),
            TermVariable::Literal(literal) => i64::from(assignment.literal_value(literal)?),
        };
        lhs += i64::from(term.coefficient) * value;
    }

    let rhs = i64::from(linear.rhs);
    let satisfied = match linear.comparison {
        Comparison::LessThanOrEqual => lhs <= rhs,
        Comparison::Equal => lhs == rhs,
        Comparison::GreaterThanOrEqual => lhs >= rhs,
    };

    Ok((!satisfied).then_some(Violation::Linear {
        lhs,
        rhs: linear.rhs,
    }))
}

fn evaluate_extremum(
    assignment: &Assignment,
    target: IntVar,
    operands: &[IntVar],
    extremum: impl FnOnce(std::vec::IntoIter<i32>) -> Option<i32>,
) -> Result<Option<Violation>, CheckError> {
    let values = operands
        .iter()
        .map(|&operand| assignment.integer_value(operand))
        .collect::<Result<Vec<_>, _>>()?;
    let actual = assignment.integer_value(target)?;

    match extremum(values.into_iter()) {
        Some(expected) if expected != actual => Ok(Some(Violation::Extremum {
            target,
            actual,
            expected,
        })),
        _ => Ok(None),
    }
}

fn evaluate_exactly_one(
    assignment: &Assignment,
    literals: &[Literal],
) -> Result<Option<Violation>, CheckError> {
    let mut num_true = 0;
    for &literal in literals {
        if assignment.literal_value(literal)? {
            num_true += 1;
        }
    }

    Ok((num_true != 1).then_some(Violation::ExactlyOne(num_true)))
}

/// The present intervals among `intervals` as `(interval, start, end)`.
fn present_intervals(
    model: &RecordedModel,
    assignment: &Assignment,
    intervals: &[IntervalVar],
) -> Result<Vec<(usize, IntervalVar, i32, i32)>, CheckError> {
    let mut present = vec![];
    for (index, &interval) in intervals.iter().enumerate() {
        if let IntervalValue::Present { start, end } = assignment.interval(model, interval)? {
            present.push((index, interval, start, end));
        }
    }
    Ok(present)
}

fn evaluate_no_overlap(
    model: &RecordedModel,
    assignment: &Assignment,
    intervals: &[IntervalVar],
) -> Result<Option<Violation>, CheckError> {
    let present = present_intervals(model, assignment, intervals)?;

    let overlapping = present
        .iter()
        .tuple_combinations()
        .find(|((_, _, start_a, end_a), (_, _, start_b, end_b))| {
            start_a < end_b && start_b < end_a
        });

    Ok(
        overlapping.map(|((_, first, _, _), (_, second, _, _))| Violation::Overlap {
            first: *first,
            second: *second,
        }),
    )
}

fn evaluate_cumulative(
    model: &RecordedModel,
    assignment: &Assignment,
    intervals: &[IntervalVar],
    demands: &[IntVar],
    capacity: i32,
) -> Result<Option<Violation>, CheckError> {
    let present = present_intervals(model, assignment, intervals)?;
    let loads = present
        .iter()
        .map(|&(index, _, _, _)| assignment.integer_value(demands[index]))
        .collect::<Result<Vec<_>, _>>()?;

    // The load can only increase at the start of an interval.
    for &(_, _, time, _) in present.iter().sorted_by_key(|(_, _, start, _)| *start) {
        let load = present
            .iter()
            .zip(&loads)
            .filter(|((_, _, start, end), _)| *start <= time && time < *end)
            .map(|(_, &demand)| i64::from(demand))
            .sum::<i64>();

        if load > i64::from(capacity) {
            return Ok(Some(Violation::CapacityExceeded {
                time,
                load,
                capacity,
            }));
        }
    }

    Ok(None)
}

/// Every node needs exactly one true outgoing and one true incoming arc. A true self-loop skips
/// the node, and the nodes which are not skipped form a single cycle. Skipping every node is
/// allowed.
fn evaluate_circuit(
    assignment: &Assignment,
    arcs: &[CircuitArc],
) -> Result<Option<Violation>, CheckError> {
    // node -> (outgoing, incoming, successor)
    let mut nodes: BTreeMap<usize, (usize, usize, Option<usize>)> = BTreeMap::new();
    for arc in arcs {
        let _ = nodes.entry(arc.tail).or_default();
        let _ = nodes.entry(arc.head).or_default();

        if !assignment.literal_value(arc.literal)? {
            continue;
        }

        if let Some(tail) = nodes.get_mut(&arc.tail) {
            tail.0 += 1;
            tail.2 = Some(arc.head);
        }
        if let Some(head) = nodes.get_mut(&arc.head) {
            head.1 += 1;
        }
    }

    if let Some((&node, &(outgoing, incoming, _))) = nodes
        .iter()
        .find(|(_, (outgoing, incoming, _))| *outgoing != 1 || *incoming != 1)
    {
        return Ok(Some(Violation::CircuitDegree {
            node,
            outgoing,
            incoming,
        }));
    }

    let visited_nodes = nodes
        .iter()
        .filter(|(node, (_, _, successor))| *successor != Some(**node))
        .map(|(&node, _)| node)
        .collect::<Vec<_>>();
    let Some(&start) = visited_nodes.first() else {
        return Ok(None);
    };

    let mut visited = 1;
    let mut current = start;
    while let Some(next) = nodes.get(&current).and_then(|(_, _, successor)| *successor) {
        if next == start || visited > visited_nodes.len() {
            break;
        }
        visited += 1;
        current = next;
    }

    Ok((visited != visited_nodes.len()).then_some(Violation::Subtour {
        node: start,
        visited,
        expected: visited_nodes.len(),
    }))
}
