pub mod coverage;
pub mod crew;
pub mod demand;
pub mod preference;
pub mod requirement;
pub mod store;

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::role_registry::{RoleMetadataDto, RoleRegistry};

use coverage::{CoverageWindow, CoverageWindowDto};
use crew::{CrewDto, CrewMember};
use demand::{HourlyDemand, HourlyDemandDto};
use preference::{Preference, PreferenceDto};
use requirement::{CrewRoleRequirement, CrewRoleRequirementDto};
use store::{StorePolicy, StorePolicyDto};

fn default_time_limit_seconds() -> i64 {
    300
}

/// Top-level input document, deserialized directly from the JSON read on
/// stdin (spec §6). Unknown fields are ignored; every optional field
/// defaults rather than rejects, matching the original Python reader's
/// `dict.get(key, default)` style (SPEC_FULL §6).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDocumentDto {
    pub date: NaiveDate,
    pub store: StorePolicyDto,
    #[serde(default)]
    pub crew: Vec<CrewDto>,
    #[serde(default)]
    pub role_metadata: Vec<RoleMetadataDto>,
    #[serde(default)]
    pub hourly_requirements: Vec<HourlyDemandDto>,
    #[serde(default)]
    pub crew_role_requirements: Vec<CrewRoleRequirementDto>,
    #[serde(default)]
    pub coverage_windows: Vec<CoverageWindowDto>,
    #[serde(default)]
    pub preferences: Vec<PreferenceDto>,
    #[serde(default = "default_time_limit_seconds")]
    pub time_limit_seconds: i64,
}

/// Validated, typed view of the whole input document. Built once,
/// immutable for the duration of one solve (spec §3 "Ownership and
/// lifecycle").
#[derive(Debug, Clone)]
pub struct ScheduleInput {
    pub date: NaiveDate,
    pub store: StorePolicy,
    pub crew: Vec<CrewMember>,
    pub roles: RoleRegistry,
    pub hourly_requirements: Vec<HourlyDemand>,
    pub crew_role_requirements: Vec<CrewRoleRequirement>,
    pub coverage_windows: Vec<CoverageWindow>,
    pub preferences: Vec<Preference>,
    pub time_limit_seconds: u32,
}

impl ScheduleInput {
    pub fn from_dto(dto: &InputDocumentDto) -> Result<Self> {
        let store = StorePolicy::from_dto(&dto.store)?;
        let grid = store.grid;

        let crew: Vec<CrewMember> = dto.crew.iter().map(|c| CrewMember::from_dto(c, &grid)).collect::<Result<_>>()?;

        let hourly_requirements: Vec<HourlyDemand> = dto.hourly_requirements.iter().map(HourlyDemand::from).collect();
        let crew_role_requirements: Vec<CrewRoleRequirement> = dto.crew_role_requirements.iter().map(CrewRoleRequirement::from).collect();
        let coverage_windows: Vec<CoverageWindow> = dto.coverage_windows.iter().map(CoverageWindow::from).collect();
        let preferences: Vec<Preference> = dto.preferences.iter().map(Preference::from_dto).collect::<Result<_>>()?;

        let mut observed_codes: HashSet<String> = HashSet::new();
        for c in &crew {
            observed_codes.extend(c.eligible_roles.iter().cloned());
        }
        for r in &crew_role_requirements {
            observed_codes.insert(r.role.clone());
        }
        for w in &coverage_windows {
            observed_codes.insert(w.role.clone());
        }
        for p in &preferences {
            if let Some(role) = &p.role {
                observed_codes.insert(role.clone());
            }
        }

        let roles = RoleRegistry::build(&dto.role_metadata, &observed_codes, grid.slot_count());

        let time_limit_seconds = if dto.time_limit_seconds <= 0 { default_time_limit_seconds() } else { dto.time_limit_seconds } as u32;

        let input = ScheduleInput {
            date: dto.date,
            store,
            crew,
            roles,
            hourly_requirements,
            crew_role_requirements,
            coverage_windows,
            preferences,
            time_limit_seconds,
        };

        input.validate()?;
        Ok(input)
    }

    /// The five invariants from spec §3, checked once at construction
    /// time so the rest of the solve never has to re-derive them.
    fn validate(&self) -> Result<()> {
        for c in &self.crew {
            if c.shift_end_min > crate::time_grid::TimeGrid::MINUTES_PER_DAY {
                return Err(Error::Construction(format!("crew '{}' shift end exceeds 1440 minutes", c.id)));
            }
        }

        for req in &self.crew_role_requirements {
            let crew = self.crew.iter().find(|c| c.id == req.crew_id).ok_or_else(|| Error::Construction(format!("crewRoleRequirement references unknown crew '{}'", req.crew_id)))?;

            let role_is_universal = self.roles.is_universal(&req.role);
            if !role_is_universal && !crew.is_eligible(&req.role) {
                return Err(Error::Construction(format!("crew '{}' is not eligible for required role '{}'", crew.id, req.role)));
            }

            let shift_hours = crew.shift_slot_count() as f64 / self.store.grid.slots_per_hour() as f64;
            if req.required_hours > shift_hours + f64::EPSILON {
                return Err(Error::Construction(format!("crew '{}' required hours for '{}' ({}) exceed shift length ({} h)", crew.id, req.role, req.required_hours, shift_hours)));
            }
        }

        Ok(())
    }
}
