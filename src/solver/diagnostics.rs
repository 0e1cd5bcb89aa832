use crate::model::ScheduleInput;
use crate::solver::breaks::{self, BreakOutcome};
use crate::solver::variables::VariableTable;

/// Independent necessary-condition checks run only when the engine
/// reports INFEASIBLE (spec §4.8). Each failing check contributes one
/// human-readable string; if every check passes, a generic fallback
/// message is returned instead.
pub fn diagnose(input: &ScheduleInput, vars: &VariableTable) -> Vec<String> {
    let mut violations = Vec::new();

    for demand in &input.hourly_requirements {
        for (role, required) in demand.nonzero_requirements() {
            for k in input.store.grid.hour_slots(demand.hour) {
                let available = vars.for_slot_role(k, role).count() as u32;
                if available < required {
                    violations.push(format!("hour {}: role '{}' needs {} but only {} crew can cover slot {}", demand.hour, role, required, available, k));
                }
            }
        }
    }

    for req in &input.crew_role_requirements {
        let slots_per_hour = input.store.grid.slots_per_hour() as f64;
        let required_slots = (req.required_hours * slots_per_hour).round() as usize;
        let available = vars.for_crew_role(&req.crew_id, &req.role).count();
        if available < required_slots {
            violations.push(format!("crew '{}' needs {} slots of role '{}' but only {} are legal", req.crew_id, required_slots, req.role, available));
        }
    }

    for window in &input.coverage_windows {
        for h in window.hours() {
            for k in input.store.grid.hour_slots(h) {
                let available = vars.for_slot_role(k, &window.role).count() as u32;
                if available < window.required_per_hour {
                    violations.push(format!("coverage window for '{}' at hour {} needs {} but only {} crew can cover slot {}", window.role, h, window.required_per_hour, available, k));
                }
            }
        }
    }

    if let Some(break_role) = input.roles.first_break_role() {
        for crew in &input.crew {
            if let Ok(BreakOutcome::Window(start, end)) = breaks::break_outcome(crew, &input.store) {
                let has_variable = (start..=end).any(|k| vars.contains(&crew.id, k, break_role));
                if !has_variable {
                    violations.push(format!("crew '{}' has no legal break-role slot in their break window", crew.id));
                }
            }
        }
    }

    if violations.is_empty() {
        violations.push("infeasible, specific cause not determinable".to_string());
    }

    violations
}
