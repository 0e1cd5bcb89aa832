use std::collections::HashMap;

use crate::model::preference::PreferenceKind;
use crate::model::ScheduleInput;
use crate::role_registry::RoleRegistry;
use crate::solver::breaks::break_window;
use crate::solver::variables::{VarKey, VariableTable};

const PARKING_DISTANCE_WEIGHT: f64 = 50.0;
const SOFT_CONSECUTIVE_PENALTY: f64 = 500.0;

/// One auxiliary "gap" (switch) boolean introduced for a CONSECUTIVE
/// preference or the `isConsecutive` domain penalty (spec §4.5). Encodes
/// `switch_k = x[c,k,r] XOR x[c,k+1,r]` via two linear inequalities built
/// once the column exists; `weight` is already the (negative) objective
/// coefficient for the switch variable itself.
#[derive(Debug, Clone)]
pub struct GapVarSpec {
    pub crew_id: String,
    pub role: String,
    pub k: u32,
    pub weight: f64,
}

#[derive(Debug, Default, Clone)]
pub struct ObjectiveSpec {
    pub var_coeffs: HashMap<VarKey, f64>,
    pub gap_vars: Vec<GapVarSpec>,
}

impl ObjectiveSpec {
    pub fn build(input: &ScheduleInput, vars: &VariableTable) -> Self {
        let mut spec = ObjectiveSpec::default();

        for pref in &input.preferences {
            let Some(crew) = input.crew.iter().find(|c| c.id == pref.crew_id) else {
                log::warn!("preference references unknown crew '{}', skipping", pref.crew_id);
                continue;
            };

            let Some(weight) = pref.effective_weight() else { continue };

            match pref.kind {
                PreferenceKind::FirstHour => {
                    let Some(role) = &pref.role else { continue };
                    if vars.contains(&crew.id, crew.shift_start_slot, role) {
                        *spec.var_coeffs.entry((crew.id.clone(), crew.shift_start_slot, role.clone())).or_insert(0.0) += weight;
                    }
                }
                PreferenceKind::Favorite => {
                    let Some(role) = &pref.role else { continue };
                    for k in crew.shift_slots() {
                        if vars.contains(&crew.id, k, role) {
                            *spec.var_coeffs.entry((crew.id.clone(), k, role.clone())).or_insert(0.0) += weight;
                        }
                    }
                }
                PreferenceKind::Consecutive => {
                    let Some(role) = &pref.role else { continue };
                    for k in crew.shift_start_slot..crew.shift_end_slot.saturating_sub(1) {
                        if vars.contains(&crew.id, k, role) && vars.contains(&crew.id, k + 1, role) {
                            spec.gap_vars.push(GapVarSpec { crew_id: crew.id.clone(), role: role.clone(), k, weight: -weight });
                        }
                    }
                }
                PreferenceKind::Timing => {
                    let Some(v) = pref.int_value else { continue };
                    let Some(break_role) = input.roles.first_break_role() else { continue };
                    let Some((start, end)) = break_window(crew, &input.store) else { continue };
                    let max_offset = end - start;
                    if max_offset == 0 {
                        continue;
                    }
                    for k in start..=end {
                        if !vars.contains(&crew.id, k, break_role) {
                            continue;
                        }
                        let offset = (k - start) as f64;
                        let ratio = if v > 0 { offset / max_offset as f64 } else { (max_offset as f64 - offset) / max_offset as f64 };
                        *spec.var_coeffs.entry((crew.id.clone(), k, break_role.to_string())).or_insert(0.0) += weight * ratio;
                    }
                }
            }
        }

        apply_domain_penalties(input, vars, &input.roles, &mut spec);

        if spec.var_coeffs.is_empty() && spec.gap_vars.is_empty() {
            for key in vars.keys() {
                *spec.var_coeffs.entry(key.clone()).or_insert(0.0) += 1.0;
            }
        }

        spec
    }
}

fn apply_domain_penalties(input: &ScheduleInput, vars: &VariableTable, roles: &RoleRegistry, spec: &mut ObjectiveSpec) {
    for crew in &input.crew {
        if !crew.can_parking_helms {
            continue;
        }
        let shift_length = crew.shift_slot_count();
        if shift_length <= 1 {
            continue;
        }

        for role in roles.codes() {
            if !roles.is_parking(role) {
                continue;
            }
            for k in (crew.shift_start_slot + 2)..crew.shift_end_slot {
                if !vars.contains(&crew.id, k, role) {
                    continue;
                }
                let ratio = (k - crew.shift_start_slot) as f64 / (shift_length - 1) as f64;
                *spec.var_coeffs.entry((crew.id.clone(), k, role.to_string())).or_insert(0.0) += PARKING_DISTANCE_WEIGHT * ratio;
            }
        }

        for role in roles.codes() {
            if !roles.is_soft_consecutive(role) {
                continue;
            }
            for k in crew.shift_start_slot..crew.shift_end_slot.saturating_sub(1) {
                if vars.contains(&crew.id, k, role) && vars.contains(&crew.id, k + 1, role) {
                    spec.gap_vars.push(GapVarSpec { crew_id: crew.id.clone(), role: role.to_string(), k, weight: -SOFT_CONSECUTIVE_PENALTY });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InputDocumentDto, ScheduleInput};

    fn input_with_favorite_pref() -> ScheduleInput {
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
                { "id": "c1", "name": "Ann", "shiftStartMin": 540, "shiftEndMin": 660, "eligibleRoles": ["REGISTER", "PRODUCT"] }
            ],
            "preferences": [
                { "crewId": "c1", "preferenceType": "FAVORITE", "role": "PRODUCT", "baseWeight": 5.0, "crewWeight": 2.0 }
            ]
        }"#;
        let dto: InputDocumentDto = serde_json::from_str(json).unwrap();
        ScheduleInput::from_dto(&dto).unwrap()
    }

    #[test]
    fn favorite_preference_adds_weight_to_every_shift_slot() {
        let input = input_with_favorite_pref();
        let vars = VariableTable::build(&input).unwrap();
        let spec = ObjectiveSpec::build(&input, &vars);
        for k in 18..22 {
            let key = ("c1".to_string(), k, "PRODUCT".to_string());
            assert_eq!(spec.var_coeffs.get(&key), Some(&10.0));
        }
    }

    #[test]
    fn no_terms_falls_back_to_maximizing_assignment_count() {
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
                { "id": "c1", "name": "Ann", "shiftStartMin": 540, "shiftEndMin": 660, "eligibleRoles": ["REGISTER"], "canParkingHelms": false }
            ]
        }"#;
        let dto: InputDocumentDto = serde_json::from_str(json).unwrap();
        let input = ScheduleInput::from_dto(&dto).unwrap();
        let vars = VariableTable::build(&input).unwrap();
        let spec = ObjectiveSpec::build(&input, &vars);
        assert!(!spec.var_coeffs.is_empty());
        assert!(spec.var_coeffs.values().all(|w| *w == 1.0));
    }
}
