use serde::Serialize;

/// Native solver status, mapped from whatever status the engine reports
/// (spec §4.6, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SolveStatus {
    #[serde(rename = "OPTIMAL")]
    Optimal,
    #[serde(rename = "FEASIBLE")]
    Feasible,
    #[serde(rename = "INFEASIBLE")]
    Infeasible,
    #[serde(rename = "TIME_LIMIT")]
    TimeLimit,
    #[serde(rename = "ERROR")]
    Error,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub status: SolveStatus,
    pub objective_score: Option<i64>,
    pub runtime_ms: u64,
    pub mip_gap: Option<f64>,
    pub num_crew: usize,
    pub num_slots: u32,
    pub slot_minutes: u32,
    pub num_assignments: usize,
    pub violations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub crew_id: String,
    pub task_type: String,
    pub start_time: u32,
    pub end_time: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputDocument {
    pub success: bool,
    pub metadata: Metadata,
    pub assignments: Vec<Assignment>,
}

impl OutputDocument {
    pub fn error(message: String) -> Self {
        OutputDocument {
            success: false,
            metadata: Metadata {
                status: SolveStatus::Error,
                objective_score: None,
                runtime_ms: 0,
                mip_gap: None,
                num_crew: 0,
                num_slots: 0,
                slot_minutes: 0,
                num_assignments: 0,
                violations: vec![message],
            },
            assignments: Vec::new(),
        }
    }
}
