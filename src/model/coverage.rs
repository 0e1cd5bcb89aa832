use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageWindowDto {
    pub role: String,
    pub start_hour: u32,
    pub end_hour: u32,
    pub required_per_hour: u32,
}

/// Exactly `required_per_hour` distinct crew assigned to `role` in every
/// slot of every hour in `[start_hour, end_hour)` (C6).
#[derive(Debug, Clone)]
pub struct CoverageWindow {
    pub role: String,
    pub start_hour: u32,
    pub end_hour: u32,
    pub required_per_hour: u32,
}

impl From<&CoverageWindowDto> for CoverageWindow {
    fn from(dto: &CoverageWindowDto) -> Self {
        CoverageWindow { role: dto.role.clone(), start_hour: dto.start_hour, end_hour: dto.end_hour, required_per_hour: dto.required_per_hour }
    }
}

impl CoverageWindow {
    pub fn hours(&self) -> std::ops::Range<u32> {
        self.start_hour..self.end_hour
    }
}
