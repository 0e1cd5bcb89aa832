use highs::{Col, RowProblem};

use crate::error::{Error, Result};
use crate::model::ScheduleInput;
use crate::solver::breaks::{self, BreakOutcome};
use crate::solver::variables::VariableTable;

const HOURS_EPSILON: f64 = 1e-6;

/// Attaches every hard constraint (C1, C3-C10; C2 is enforced by
/// [`VariableTable`] omitting variables at construction) to `pb`. `cols`
/// is parallel to `vars.keys()`.
pub fn attach_all(pb: &mut RowProblem, input: &ScheduleInput, vars: &VariableTable, cols: &[Col]) -> Result<()> {
    c1_one_task_per_slot(pb, input, vars, cols);
    c3_hourly_staffing(pb, input, vars, cols)?;
    c4_no_parking_first_hour(pb, input, vars, cols);
    c5_crew_role_hours(pb, input, vars, cols)?;
    c6_coverage_windows(pb, input, vars, cols);
    c7_role_min_max(pb, input, vars, cols);
    c8_meal_break(pb, input, vars, cols)?;
    c9_block_size(pb, input, vars, cols);
    c10_hard_consecutive(pb, input, vars, cols);
    Ok(())
}

fn row(idxs: &[usize], cols: &[Col]) -> Vec<(Col, f64)> {
    idxs.iter().map(|&idx| (cols[idx], 1.0)).collect()
}

/// C1 — every crew member is assigned exactly one role in every shift slot.
fn c1_one_task_per_slot(pb: &mut RowProblem, input: &ScheduleInput, vars: &VariableTable, cols: &[Col]) {
    for crew in &input.crew {
        for k in crew.shift_slots() {
            let idxs: Vec<usize> = vars.for_crew_slot(&crew.id, k).collect();
            pb.add_row(1.0..=1.0, row(&idxs, cols));
        }
    }
}

/// C3 — hourly staffing, enforced per slot.
fn c3_hourly_staffing(pb: &mut RowProblem, input: &ScheduleInput, vars: &VariableTable, cols: &[Col]) -> Result<()> {
    for demand in &input.hourly_requirements {
        for (role, required) in demand.nonzero_requirements() {
            for k in input.store.grid.hour_slots(demand.hour) {
                let idxs: Vec<usize> = vars.for_slot_role(k, role).collect();
                if idxs.is_empty() {
                    return Err(Error::Construction(format!("hourly requirement for '{}' at hour {} has no eligible crew in slot {}", role, demand.hour, k)));
                }
                pb.add_row(required as f64..=required as f64, row(&idxs, cols));
            }
        }
    }
    Ok(())
}

/// C4 — no parking-role assignment in a crew's first post-start hour.
fn c4_no_parking_first_hour(pb: &mut RowProblem, input: &ScheduleInput, vars: &VariableTable, cols: &[Col]) {
    let slots_per_hour = input.store.grid.slots_per_hour();
    for crew in &input.crew {
        let first_hour_end = (crew.shift_start_slot + slots_per_hour).min(crew.shift_end_slot);
        for k in crew.shift_start_slot..first_hour_end {
            for role in input.roles.codes() {
                if !input.roles.is_parking(role) {
                    continue;
                }
                if let Some(idx) = vars.get(&crew.id, k, role) {
                    pb.add_row(0.0..=0.0, vec![(cols[idx], 1.0)]);
                }
            }
        }
    }
}

/// C5 — a crew member's total hours on a role must hit an exact target.
fn c5_crew_role_hours(pb: &mut RowProblem, input: &ScheduleInput, vars: &VariableTable, cols: &[Col]) -> Result<()> {
    let slots_per_hour = input.store.grid.slots_per_hour();
    for req in &input.crew_role_requirements {
        let idxs: Vec<usize> = vars.for_crew_role(&req.crew_id, &req.role).map(|(_, idx)| idx).collect();
        if idxs.is_empty() {
            return Err(Error::Construction(format!("crew '{}' has no legal slots for required role '{}'", req.crew_id, req.role)));
        }
        let required_slots = (req.required_hours * slots_per_hour as f64).round();
        pb.add_row(required_slots..=required_slots, row(&idxs, cols));
    }
    Ok(())
}

/// C6 — coverage windows, enforced per slot like C3.
fn c6_coverage_windows(pb: &mut RowProblem, input: &ScheduleInput, vars: &VariableTable, cols: &[Col]) {
    for window in &input.coverage_windows {
        for h in window.hours() {
            for k in input.store.grid.hour_slots(h) {
                let idxs: Vec<usize> = vars.for_slot_role(k, &window.role).collect();
                let required = window.required_per_hour as f64;
                pb.add_row(required..=required, row(&idxs, cols));
            }
        }
    }
}

/// C7 — per-crew role min/max, with register-hour crew overrides.
fn c7_role_min_max(pb: &mut RowProblem, input: &ScheduleInput, vars: &VariableTable, cols: &[Col]) {
    let slots_per_hour = input.store.grid.slots_per_hour() as f64;
    for crew in &input.crew {
        for role in input.roles.codes() {
            if input.roles.is_break(role) {
                continue;
            }

            let idxs: Vec<usize> = vars.for_crew_role(&crew.id, role).map(|(_, idx)| idx).collect();
            let t = idxs.len() as u32;
            if t == 0 {
                continue;
            }

            let mut eff_min = input.roles.min_slots(role);
            let mut eff_max = input.roles.max_slots(role);

            if role == crate::role_registry::REGISTER {
                if let Some(min_hours) = crew.min_register_hours {
                    let min_slots = ((min_hours * slots_per_hour) - HOURS_EPSILON).ceil().max(0.0) as u32;
                    eff_min = eff_min.max(min_slots);
                }
                if let Some(max_hours) = crew.max_register_hours {
                    let max_slots = ((max_hours * slots_per_hour) + HOURS_EPSILON).floor().max(0.0) as u32;
                    eff_max = eff_max.min(max_slots);
                }
            }

            eff_min = eff_min.min(t);
            eff_max = eff_max.min(t);

            let coeffs = row(&idxs, cols);
            pb.add_row(eff_min as f64.., coeffs.clone());
            pb.add_row(..=eff_max as f64, coeffs);
        }
    }
}

/// C8 — meal break: pin to zero, or exactly one slot inside the window.
fn c8_meal_break(pb: &mut RowProblem, input: &ScheduleInput, vars: &VariableTable, cols: &[Col]) -> Result<()> {
    let Some(break_role) = input.roles.first_break_role() else { return Ok(()) };
    let break_role = break_role.to_string();

    for crew in &input.crew {
        match breaks::break_outcome(crew, &input.store)? {
            BreakOutcome::PinZero => {
                for k in crew.shift_slots() {
                    if let Some(idx) = vars.get(&crew.id, k, &break_role) {
                        pb.add_row(0.0..=0.0, vec![(cols[idx], 1.0)]);
                    }
                }
            }
            BreakOutcome::Window(start, end) => {
                let idxs: Vec<usize> = (start..=end).filter_map(|k| vars.get(&crew.id, k, &break_role)).collect();
                if idxs.is_empty() {
                    return Err(Error::Construction(format!("crew '{}' has no legal meal-break slot in window", crew.id)));
                }
                pb.add_row(1.0..=1.0, row(&idxs, cols));

                for k in crew.shift_slots() {
                    if k >= start && k <= end {
                        continue;
                    }
                    if let Some(idx) = vars.get(&crew.id, k, &break_role) {
                        pb.add_row(0.0..=0.0, vec![(cols[idx], 1.0)]);
                    }
                }
            }
        }
    }
    Ok(())
}

/// C9 — block-size snapping: within each non-overlapping window of
/// `block_size` consecutive slots (starting at shift start), all
/// variables agree, chained as equalities against the window's first slot.
fn c9_block_size(pb: &mut RowProblem, input: &ScheduleInput, vars: &VariableTable, cols: &[Col]) {
    for crew in &input.crew {
        for role in input.roles.codes() {
            let block_size = input.roles.block_size(role);
            if block_size <= 1 {
                continue;
            }

            let mut window_start = crew.shift_start_slot;
            while window_start < crew.shift_end_slot {
                let window_end = (window_start + block_size).min(crew.shift_end_slot);
                let Some(anchor) = vars.get(&crew.id, window_start, role) else {
                    window_start += block_size;
                    continue;
                };
                for k in (window_start + 1)..window_end {
                    if let Some(idx) = vars.get(&crew.id, k, role) {
                        pb.add_row(0.0..=0.0, vec![(cols[anchor], 1.0), (cols[idx], -1.0)]);
                    }
                }
                window_start += block_size;
            }
        }
    }
}

/// C10 — hard must-be-consecutive: forbid straddling a structural gap in
/// the legal-slot list for a (crew, role). Only list-adjacent entries are
/// compared (not every pair) — a role with a legal gap (e.g. a coverage
/// window boundary) cannot have variables selected on both sides of it.
fn c10_hard_consecutive(pb: &mut RowProblem, input: &ScheduleInput, vars: &VariableTable, cols: &[Col]) {
    for crew in &input.crew {
        for role in input.roles.codes() {
            if !input.roles.must_be_consecutive(role) {
                continue;
            }
            let slots: Vec<(u32, usize)> = vars.for_crew_role(&crew.id, role).collect();
            for pair in slots.windows(2) {
                let (k_i, idx_i) = pair[0];
                let (k_j, idx_j) = pair[1];
                if k_j - k_i == 1 {
                    continue;
                }
                pb.add_row(..=1.0, vec![(cols[idx_i], 1.0), (cols[idx_j], 1.0)]);
            }
        }
    }
}

/// Builds the auxiliary gap-variable rows for soft consecutivity
/// (CONSECUTIVE preference and `isConsecutive` domain penalty): each
/// `switch` column is bound below by both `x_k - x_{k+1}` and
/// `x_{k+1} - x_k`, so it is 1 whenever the pair of slots disagree.
pub fn attach_gap_rows(pb: &mut RowProblem, vars: &VariableTable, cols: &[Col], gap_vars: &[crate::solver::objective::GapVarSpec], gap_cols: &[Col]) -> Result<()> {
    for (gap, &gap_col) in gap_vars.iter().zip(gap_cols) {
        let idx_k = vars.require(&gap.crew_id, gap.k, &gap.role, "gap variable")?;
        let idx_k1 = vars.require(&gap.crew_id, gap.k + 1, &gap.role, "gap variable")?;
        pb.add_row(0.0.., vec![(gap_col, 1.0), (cols[idx_k], -1.0), (cols[idx_k1], 1.0)]);
        pb.add_row(0.0.., vec![(gap_col, 1.0), (cols[idx_k], 1.0), (cols[idx_k1], -1.0)]);
    }
    Ok(())
}
