use crate::model::ScheduleInput;
use crate::output::Assignment;
use crate::solver::variables::VariableTable;

/// Walks every `(c,k,r)` with a solved value of 1 and emits one
/// assignment record per slot. No merging of consecutive identical
/// roles is performed (spec §4.7).
pub fn project(input: &ScheduleInput, vars: &VariableTable, values: &[f64]) -> Vec<Assignment> {
    let m = input.store.grid.slot_minutes();
    let mut assignments = Vec::new();

    for (idx, (crew_id, k, role)) in vars.keys().iter().enumerate() {
        if values[idx] < 0.5 {
            continue;
        }
        assignments.push(Assignment {
            crew_id: crew_id.clone(),
            task_type: role.clone(),
            start_time: k * m,
            end_time: (k + 1) * m,
        });
    }

    assignments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InputDocumentDto, ScheduleInput};

    #[test]
    fn emits_one_assignment_per_solved_slot() {
        let json = r#"{
            "date": "2026-01-05",
            "store": {
                "baseSlotMinutes": 30,
                "openMinutesFromMidnight": 480,
                "closeMinutesFromMidnight": 1260,
                "startRegHour": 8,
                "endRegHour": 21
            },
            "crew": [
                { "id": "c1", "name": "Ann", "shiftStartMin": 540, "shiftEndMin": 600, "eligibleRoles": ["REGISTER"] }
            ]
        }"#;
        let dto: InputDocumentDto = serde_json::from_str(json).unwrap();
        let input = ScheduleInput::from_dto(&dto).unwrap();
        let vars = VariableTable::build(&input).unwrap();
        let values: Vec<f64> = vars.keys().iter().map(|(_, k, r)| if *k == 18 && r == "REGISTER" { 1.0 } else { 0.0 }).collect();

        let assignments = project(&input, &vars, &values);
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].crew_id, "c1");
        assert_eq!(assignments[0].task_type, "REGISTER");
        assert_eq!(assignments[0].start_time, 540);
        assert_eq!(assignments[0].end_time, 570);
    }
}
