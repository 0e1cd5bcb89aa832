use std::time::Instant;

use highs::{HighsModelStatus, RowProblem, Sense};

use crate::error::Result;
use crate::model::ScheduleInput;
use crate::output::{Metadata, OutputDocument, SolveStatus};
use crate::solver::{constraints, diagnostics, objective::ObjectiveSpec, projector, variables::VariableTable};

/// Runs one full solve: builds variables, the objective, and hard
/// constraints, hands the model to HiGHS with the configured wall-clock
/// budget, and projects the result back into the output shape (spec
/// §4.6-§4.8). Construction-time failures during variable/constraint
/// building propagate as `Err` rather than producing a document — the
/// CLI boundary (spec §7) is responsible for turning those into an
/// ERROR document.
pub fn solve(input: &ScheduleInput) -> Result<OutputDocument> {
    let started = Instant::now();

    let vars = VariableTable::build(input)?;
    let objective = ObjectiveSpec::build(input, &vars);

    let mut pb = RowProblem::default();
    let cols: Vec<_> = vars.keys().iter().map(|key| pb.add_integer_column(objective.var_coeffs.get(key).copied().unwrap_or(0.0), 0.0..=1.0)).collect();
    let gap_cols: Vec<_> = objective.gap_vars.iter().map(|gap| pb.add_integer_column(gap.weight, 0.0..=1.0)).collect();

    constraints::attach_all(&mut pb, input, &vars, &cols)?;
    constraints::attach_gap_rows(&mut pb, &vars, &cols, &objective.gap_vars, &gap_cols)?;

    let mut model = pb.optimise(Sense::Maximise);
    model.set_option("time_limit", input.time_limit_seconds as f64);
    model.set_option("output_flag", false);
    let solved = model.solve();

    let status = solved.status();
    let solution = solved.get_solution();
    let values = solution.columns();
    let has_values = values.iter().any(|v| *v > 0.0);

    let runtime_ms = started.elapsed().as_millis() as u64;
    let num_slots = input.store.grid.slot_count();
    let slot_minutes = input.store.grid.slot_minutes();

    let solve_status = map_status(status, has_values);

    let (assignments, violations) = match solve_status {
        SolveStatus::Optimal | SolveStatus::Feasible | SolveStatus::TimeLimit if has_values => (projector::project(input, &vars, values), Vec::new()),
        SolveStatus::Infeasible => (Vec::new(), diagnostics::diagnose(input, &vars)),
        _ => (Vec::new(), Vec::new()),
    };

    let objective_score = if !assignments.is_empty() { Some(objective_value(&objective, &vars, values).round() as i64) } else { None };

    let document = OutputDocument {
        success: matches!(solve_status, SolveStatus::Optimal | SolveStatus::Feasible | SolveStatus::TimeLimit),
        metadata: Metadata {
            status: solve_status,
            objective_score,
            runtime_ms,
            mip_gap: None,
            num_crew: input.crew.len(),
            num_slots,
            slot_minutes,
            num_assignments: assignments.len(),
            violations,
        },
        assignments,
    };

    Ok(document)
}

fn objective_value(objective: &ObjectiveSpec, vars: &VariableTable, values: &[f64]) -> f64 {
    let var_total: f64 = vars.keys().iter().enumerate().map(|(idx, key)| objective.var_coeffs.get(key).copied().unwrap_or(0.0) * values[idx]).sum();
    let gap_total: f64 = objective.gap_vars.iter().enumerate().map(|(i, gap)| gap.weight * values[vars.len() + i]).sum();
    var_total + gap_total
}

fn map_status(status: HighsModelStatus, has_solution: bool) -> SolveStatus {
    use HighsModelStatus::*;
    match status {
        Optimal => SolveStatus::Optimal,
        ReachedTimeLimit => SolveStatus::TimeLimit,
        Infeasible | UnboundedOrInfeasible => SolveStatus::Infeasible,
        ReachedIterationLimit if has_solution => SolveStatus::Feasible,
        _ => SolveStatus::Error,
    }
}
