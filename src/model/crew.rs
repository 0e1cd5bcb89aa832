use std::collections::HashSet;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::time_grid::TimeGrid;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewDto {
    pub id: String,
    pub name: String,
    pub shift_start_min: u32,
    pub shift_end_min: u32,
    #[serde(default)]
    pub eligible_roles: Vec<String>,
    #[serde(default = "default_true")]
    pub can_break: bool,
    #[serde(default = "default_true")]
    pub can_parking_helms: bool,
    pub min_register_hours: Option<f64>,
    pub max_register_hours: Option<f64>,
}

/// A crew member with a fixed shift, eligible task roles, and the
/// solve-time slot bounds their shift snaps to.
#[derive(Debug, Clone)]
pub struct CrewMember {
    pub id: String,
    pub name: String,
    pub shift_start_min: u32,
    pub shift_end_min: u32,
    pub shift_start_slot: u32,
    pub shift_end_slot: u32,
    pub eligible_roles: HashSet<String>,
    pub can_break: bool,
    pub can_parking_helms: bool,
    pub min_register_hours: Option<f64>,
    pub max_register_hours: Option<f64>,
}

impl CrewMember {
    pub fn from_dto(dto: &CrewDto, grid: &TimeGrid) -> Result<Self> {
        if dto.shift_start_min > TimeGrid::MINUTES_PER_DAY || dto.shift_end_min > TimeGrid::MINUTES_PER_DAY {
            return Err(Error::Construction(format!("crew '{}' shift bounds must lie within [0, 1440]", dto.id)));
        }
        if dto.shift_end_min <= dto.shift_start_min {
            return Err(Error::Construction(format!("crew '{}' shift end must be after shift start", dto.id)));
        }

        Ok(CrewMember {
            id: dto.id.clone(),
            name: dto.name.clone(),
            shift_start_min: dto.shift_start_min,
            shift_end_min: dto.shift_end_min,
            shift_start_slot: grid.start_to_slot(dto.shift_start_min),
            shift_end_slot: grid.end_to_slot(dto.shift_end_min),
            eligible_roles: dto.eligible_roles.iter().cloned().collect(),
            can_break: dto.can_break,
            can_parking_helms: dto.can_parking_helms,
            min_register_hours: dto.min_register_hours,
            max_register_hours: dto.max_register_hours,
        })
    }

    pub fn shift_slots(&self) -> std::ops::Range<u32> {
        self.shift_start_slot..self.shift_end_slot
    }

    pub fn shift_slot_count(&self) -> u32 {
        self.shift_end_slot - self.shift_start_slot
    }

    pub fn is_eligible(&self, role: &str) -> bool {
        self.eligible_roles.contains(role)
    }
}
