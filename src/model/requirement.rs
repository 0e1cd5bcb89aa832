use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewRoleRequirementDto {
    pub crew_id: String,
    pub role: String,
    pub required_hours: f64,
}

/// A crew member must total exactly `required_hours` on `role` across
/// the day (C5).
#[derive(Debug, Clone)]
pub struct CrewRoleRequirement {
    pub crew_id: String,
    pub role: String,
    pub required_hours: f64,
}

impl From<&CrewRoleRequirementDto> for CrewRoleRequirement {
    fn from(dto: &CrewRoleRequirementDto) -> Self {
        CrewRoleRequirement { crew_id: dto.crew_id.clone(), role: dto.role.clone(), required_hours: dto.required_hours }
    }
}
