use serde::Deserialize;

use crate::error::{Error, Result};
use crate::time_grid::TimeGrid;

fn default_min_shift_minutes_for_break() -> u32 {
    360
}
fn default_break_window_start_offset() -> u32 {
    180
}
fn default_break_window_end_offset() -> u32 {
    270
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorePolicyDto {
    pub base_slot_minutes: u32,
    pub open_minutes_from_midnight: u32,
    pub close_minutes_from_midnight: u32,
    pub start_reg_hour: u32,
    pub end_reg_hour: u32,
    #[serde(default = "default_min_shift_minutes_for_break")]
    pub min_shift_minutes_for_break: u32,
    #[serde(default = "default_break_window_start_offset")]
    pub break_window_start_offset_minutes: u32,
    #[serde(default = "default_break_window_end_offset")]
    pub break_window_end_offset_minutes: u32,
}

/// Meal-break rule: minimum shift length that mandates a break, and the
/// earliest/latest break offsets measured from the start of the shift.
#[derive(Debug, Clone)]
pub struct BreakPolicy {
    pub min_shift_minutes_for_break: u32,
    pub start_offset_minutes: u32,
    pub end_offset_minutes: u32,
}

#[derive(Debug, Clone)]
pub struct StorePolicy {
    pub grid: TimeGrid,
    pub open_minute: u32,
    pub close_minute: u32,
    /// Register-eligibility sub-window, in hours-from-midnight.
    pub register_window_hours: (u32, u32),
    pub break_policy: BreakPolicy,
}

impl StorePolicy {
    pub fn from_dto(dto: &StorePolicyDto) -> Result<Self> {
        let grid = TimeGrid::new(dto.base_slot_minutes)?;

        if dto.close_minutes_from_midnight <= dto.open_minutes_from_midnight {
            return Err(Error::Construction("store close time must be after open time".to_string()));
        }
        if dto.end_reg_hour < dto.start_reg_hour {
            return Err(Error::Construction("endRegHour must be >= startRegHour".to_string()));
        }

        let open_hour = dto.open_minutes_from_midnight / 60;
        let close_hour = dto.close_minutes_from_midnight.div_ceil(60);
        if dto.start_reg_hour < open_hour || dto.end_reg_hour > close_hour {
            return Err(Error::Construction("register window must be a sub-interval of store-open hours".to_string()));
        }

        Ok(StorePolicy {
            grid,
            open_minute: dto.open_minutes_from_midnight,
            close_minute: dto.close_minutes_from_midnight,
            register_window_hours: (dto.start_reg_hour, dto.end_reg_hour),
            break_policy: BreakPolicy {
                min_shift_minutes_for_break: dto.min_shift_minutes_for_break,
                start_offset_minutes: dto.break_window_start_offset_minutes,
                end_offset_minutes: dto.break_window_end_offset_minutes,
            },
        })
    }

    /// True if slot `k` lies within `[open, close)`.
    pub fn slot_within_store_hours(&self, k: u32) -> bool {
        let (start, end) = self.grid.slot_minute_bounds(k);
        start >= self.open_minute && end <= self.close_minute
    }

    /// True if slot `k` lies within the register sub-window.
    pub fn slot_within_register_window(&self, k: u32) -> bool {
        let (start_hour, end_hour) = self.register_window_hours;
        let hour = k / self.grid.slots_per_hour();
        hour >= start_hour && hour < end_hour
    }
}
