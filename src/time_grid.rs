use crate::error::{Error, Result};

/// Fixed-length time grid the whole day is partitioned into.
///
/// Slot `k` covers the minute interval `[k * slot_minutes, (k + 1) * slot_minutes)`.
/// `slot_minutes` must be positive and must divide 60 — this keeps hour
/// boundaries aligned to slot boundaries, which every hourly-demand and
/// coverage-window constraint relies on.
#[derive(Debug, Clone, Copy)]
pub struct TimeGrid {
    slot_minutes: u32,
    slot_count: u32,
    slots_per_hour: u32,
}

impl TimeGrid {
    pub const MINUTES_PER_DAY: u32 = 1440;

    pub fn new(slot_minutes: u32) -> Result<Self> {
        if slot_minutes == 0 {
            return Err(Error::Construction("baseSlotMinutes must be positive".to_string()));
        }
        if 60 % slot_minutes != 0 {
            return Err(Error::Construction(format!("baseSlotMinutes {} does not divide 60", slot_minutes)));
        }

        Ok(TimeGrid {
            slot_minutes,
            slot_count: Self::MINUTES_PER_DAY / slot_minutes,
            slots_per_hour: 60 / slot_minutes,
        })
    }

    pub fn slot_minutes(&self) -> u32 {
        self.slot_minutes
    }

    pub fn slot_count(&self) -> u32 {
        self.slot_count
    }

    pub fn slots_per_hour(&self) -> u32 {
        self.slots_per_hour
    }

    /// Minute interval `[start, end)` covered by slot `k`.
    pub fn slot_minute_bounds(&self, k: u32) -> (u32, u32) {
        (k * self.slot_minutes, (k + 1) * self.slot_minutes)
    }

    /// Slots owned by hour `h`: `[h * slots_per_hour, (h + 1) * slots_per_hour)`.
    pub fn hour_slots(&self, h: u32) -> std::ops::Range<u32> {
        let start = h * self.slots_per_hour;
        start..(start + self.slots_per_hour)
    }

    /// Rounds a shift-start minute mark down to its containing slot.
    pub fn start_to_slot(&self, start_minute: u32) -> u32 {
        start_minute / self.slot_minutes
    }

    /// Rounds a shift-end minute mark up to its containing slot, clamped to `slot_count`.
    pub fn end_to_slot(&self, end_minute: u32) -> u32 {
        let slot = end_minute.div_ceil(self.slot_minutes);
        slot.min(self.slot_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_divisor_slot_length() {
        assert!(TimeGrid::new(7).is_err());
        assert!(TimeGrid::new(0).is_err());
    }

    #[test]
    fn accepts_common_slot_lengths() {
        for m in [1, 2, 3, 4, 5, 6, 10, 12, 15, 20, 30, 60] {
            assert!(TimeGrid::new(m).is_ok(), "slot length {} should divide 60", m);
        }
    }

    #[test]
    fn thirty_minute_grid_has_expected_shape() {
        let grid = TimeGrid::new(30).unwrap();
        assert_eq!(grid.slot_count(), 48);
        assert_eq!(grid.slots_per_hour(), 2);
        assert_eq!(grid.hour_slots(9), 18..20);
        assert_eq!(grid.slot_minute_bounds(18), (540, 570));
    }

    #[test]
    fn shift_bounds_snap_to_grid() {
        let grid = TimeGrid::new(30).unwrap();
        assert_eq!(grid.start_to_slot(540), 18);
        assert_eq!(grid.end_to_slot(660), 22);
        assert_eq!(grid.end_to_slot(1439), 48);
        assert_eq!(grid.end_to_slot(1440), 48);
    }
}
