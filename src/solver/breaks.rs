use crate::error::{Error, Result};
use crate::model::crew::CrewMember;
use crate::model::store::StorePolicy;

/// Inclusive `[start_slot, end_slot]` meal-break window for a crew member,
/// or `None` when the crew cannot break, their shift is too short to
/// mandate one, or the computed window is empty (spec §4.4 C8). Shared by
/// the C8 hard constraint and the TIMING objective term (§4.5), which
/// both need exactly the same window.
pub fn break_window(crew: &CrewMember, store: &StorePolicy) -> Option<(u32, u32)> {
    if !crew.can_break {
        return None;
    }

    let m = store.grid.slot_minutes();
    let min_slots_for_break = store.break_policy.min_shift_minutes_for_break.div_ceil(m);
    if crew.shift_slot_count() < min_slots_for_break {
        return None;
    }

    let start = crew.shift_start_slot + store.break_policy.start_offset_minutes / m;
    let raw_end = crew.shift_start_slot + store.break_policy.end_offset_minutes / m;
    let end = raw_end.min(crew.shift_end_slot.saturating_sub(1));

    if start > end {
        return None;
    }

    Some((start, end))
}

/// Outcome of the C8 hard meal-break constraint for one crew member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakOutcome {
    /// Crew cannot break, or their shift is too short to mandate one:
    /// the break-role is pinned to 0 across the whole shift.
    PinZero,
    /// Crew must take exactly one break slot inside `[start, end]`.
    Window(u32, u32),
}

/// Like [`break_window`] but distinguishes the two "pin to zero" cases
/// from a window that reduces to empty despite the crew being eligible
/// for one — the latter is a construction error the C8 builder fails
/// early on, not a silent skip (spec §4.4 C8).
pub fn break_outcome(crew: &CrewMember, store: &StorePolicy) -> Result<BreakOutcome> {
    if !crew.can_break {
        return Ok(BreakOutcome::PinZero);
    }

    let m = store.grid.slot_minutes();
    let min_slots_for_break = store.break_policy.min_shift_minutes_for_break.div_ceil(m);
    if crew.shift_slot_count() < min_slots_for_break {
        return Ok(BreakOutcome::PinZero);
    }

    let start = crew.shift_start_slot + store.break_policy.start_offset_minutes / m;
    let raw_end = crew.shift_start_slot + store.break_policy.end_offset_minutes / m;
    let end = raw_end.min(crew.shift_end_slot.saturating_sub(1));

    if start > end {
        return Err(Error::Construction(format!("crew '{}' meal-break window is empty", crew.id)));
    }

    Ok(BreakOutcome::Window(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InputDocumentDto, ScheduleInput};

    fn six_hour_shift_input() -> ScheduleInput {
        let json = r#"{
            "date": "2026-01-05",
            "store": {
                "baseSlotMinutes": 30,
                "openMinutesFromMidnight": 480,
                "closeMinutesFromMidnight": 1260,
                "startRegHour": 8,
                "endRegHour": 21,
                "minShiftMinutesForBreak": 360,
                "breakWindowStartOffsetMinutes": 180,
                "breakWindowEndOffsetMinutes": 270
            },
            "crew": [
                { "id": "c1", "name": "Ann", "shiftStartMin": 540, "shiftEndMin": 900, "eligibleRoles": ["REGISTER", "PRODUCT"] }
            ]
        }"#;
        let dto: InputDocumentDto = serde_json::from_str(json).unwrap();
        ScheduleInput::from_dto(&dto).unwrap()
    }

    #[test]
    fn six_hour_shift_gets_a_break_window_between_noon_and_1330() {
        let input = six_hour_shift_input();
        let crew = &input.crew[0];
        let (start, end) = break_window(crew, &input.store).unwrap();
        let (start_min, _) = input.store.grid.slot_minute_bounds(start);
        let (end_start_min, _) = input.store.grid.slot_minute_bounds(end);
        assert!(start_min >= 720 && start_min <= 810, "start_min={}", start_min);
        assert!(end_start_min >= 720 && end_start_min <= 810, "end_start_min={}", end_start_min);
    }

    #[test]
    fn crew_that_cannot_break_gets_no_window() {
        let mut input = six_hour_shift_input();
        input.crew[0].can_break = false;
        assert!(break_window(&input.crew[0], &input.store).is_none());
    }
}
