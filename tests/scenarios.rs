use crew_shift_scheduler::model::InputDocumentDto;
use crew_shift_scheduler::output::SolveStatus;
use crew_shift_scheduler::run;

fn parse(json: &str) -> InputDocumentDto {
    serde_json::from_str(json).expect("fixture should parse")
}

#[test]
fn smallest_feasible_schedule_assigns_register_every_slot() {
    let dto = parse(
        r#"{
            "date": "2026-01-05",
            "store": {
                "baseSlotMinutes": 30,
                "openMinutesFromMidnight": 480,
                "closeMinutesFromMidnight": 1260,
                "startRegHour": 8,
                "endRegHour": 21
            },
            "crew": [
                { "id": "c1", "name": "Ann", "shiftStartMin": 540, "shiftEndMin": 660, "eligibleRoles": ["REGISTER"] }
            ],
            "hourlyRequirements": [
                { "hour": 9, "requiredRegister": 1 },
                { "hour": 10, "requiredRegister": 1 }
            ]
        }"#,
    );

    let document = run(&dto).expect("construction should succeed");
    assert!(matches!(document.metadata.status, SolveStatus::Optimal | SolveStatus::Feasible));
    assert_eq!(document.assignments.len(), 4);

    let mut windows: Vec<(u32, u32)> = document.assignments.iter().map(|a| (a.start_time, a.end_time)).collect();
    windows.sort();
    assert_eq!(windows, vec![(540, 570), (570, 600), (600, 630), (630, 660)]);
    assert!(document.assignments.iter().all(|a| a.task_type == "REGISTER" && a.crew_id == "c1"));
}

#[test]
fn break_trigger_produces_one_meal_break_in_window_and_no_early_parking() {
    let dto = parse(
        r#"{
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
        }"#,
    );

    let document = run(&dto).expect("construction should succeed");
    assert!(matches!(document.metadata.status, SolveStatus::Optimal | SolveStatus::Feasible));
    assert_eq!(document.assignments.len(), 12);

    let breaks: Vec<_> = document.assignments.iter().filter(|a| a.task_type == "MEAL_BREAK").collect();
    assert_eq!(breaks.len(), 1);
    assert!(breaks[0].start_time >= 720 && breaks[0].end_time <= 840);

    let first_hour: Vec<_> = document.assignments.iter().filter(|a| a.start_time < 600).collect();
    assert!(first_hour.iter().all(|a| a.task_type != "PARKING_HELM"));
}

#[test]
fn infeasible_demand_reports_a_precise_violation() {
    let dto = parse(
        r#"{
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
            ],
            "hourlyRequirements": [
                { "hour": 9, "requiredRegister": 2 }
            ]
        }"#,
    );

    let document = run(&dto).expect("one eligible crew member is still a legal variable, so this reaches the engine");
    assert_eq!(document.metadata.status, SolveStatus::Infeasible);
    assert!(document.assignments.is_empty());
    assert!(document.metadata.violations.iter().any(|v| v.contains("REGISTER")), "violations: {:?}", document.metadata.violations);
}

#[test]
fn coverage_window_is_exclusive_to_its_hours() {
    let dto = parse(
        r#"{
            "date": "2026-01-05",
            "store": {
                "baseSlotMinutes": 60,
                "openMinutesFromMidnight": 480,
                "closeMinutesFromMidnight": 960,
                "startRegHour": 8,
                "endRegHour": 16
            },
            "crew": [
                { "id": "c1", "name": "Ann", "shiftStartMin": 480, "shiftEndMin": 960, "eligibleRoles": ["DEMO", "PRODUCT"] },
                { "id": "c2", "name": "Bea", "shiftStartMin": 480, "shiftEndMin": 960, "eligibleRoles": ["DEMO", "PRODUCT"] },
                { "id": "c3", "name": "Cal", "shiftStartMin": 480, "shiftEndMin": 960, "eligibleRoles": ["DEMO", "PRODUCT"] }
            ],
            "coverageWindows": [
                { "role": "DEMO", "startHour": 10, "endHour": 13, "requiredPerHour": 1 }
            ]
        }"#,
    );

    let document = run(&dto).expect("construction should succeed");
    assert!(matches!(document.metadata.status, SolveStatus::Optimal | SolveStatus::Feasible));

    for hour in 10..13 {
        let start = hour * 60;
        let on_demo = document.assignments.iter().filter(|a| a.task_type == "DEMO" && a.start_time == start).count();
        assert_eq!(on_demo, 1, "hour {} should have exactly one DEMO assignment", hour);
    }

    let outside_window_demo = document.assignments.iter().filter(|a| a.task_type == "DEMO" && (a.start_time < 600 || a.start_time >= 780)).count();
    assert_eq!(outside_window_demo, 0);
}

#[test]
fn block_size_two_keeps_assignments_on_hour_boundaries() {
    let dto = parse(
        r#"{
            "date": "2026-01-05",
            "store": {
                "baseSlotMinutes": 30,
                "openMinutesFromMidnight": 480,
                "closeMinutesFromMidnight": 1260,
                "startRegHour": 8,
                "endRegHour": 21
            },
            "crew": [
                { "id": "c1", "name": "Ann", "shiftStartMin": 480, "shiftEndMin": 600, "eligibleRoles": ["STOCK"] }
            ],
            "roleMetadata": [
                { "role": "STOCK", "blockSize": 2, "allowOutsideStoreHours": true }
            ],
            "crewRoleRequirements": [
                { "crewId": "c1", "role": "STOCK", "requiredHours": 2.0 }
            ]
        }"#,
    );

    let document = run(&dto).expect("construction should succeed");
    assert!(matches!(document.metadata.status, SolveStatus::Optimal | SolveStatus::Feasible));

    let mut stock_starts: Vec<u32> = document.assignments.iter().filter(|a| a.task_type == "STOCK").map(|a| a.start_time).collect();
    stock_starts.sort();
    assert_eq!(stock_starts, vec![480, 510, 540, 570]);
}

#[test]
fn hard_consecutive_role_forms_a_single_run() {
    let dto = parse(
        r#"{
            "date": "2026-01-05",
            "store": {
                "baseSlotMinutes": 30,
                "openMinutesFromMidnight": 480,
                "closeMinutesFromMidnight": 1260,
                "startRegHour": 8,
                "endRegHour": 21
            },
            "crew": [
                { "id": "c1", "name": "Ann", "shiftStartMin": 480, "shiftEndMin": 960, "eligibleRoles": ["ORDER_WRITER", "PRODUCT"] }
            ],
            "roleMetadata": [
                { "role": "ORDER_WRITER", "slotsMustBeConsecutive": true }
            ],
            "crewRoleRequirements": [
                { "crewId": "c1", "role": "ORDER_WRITER", "requiredHours": 2.0 }
            ]
        }"#,
    );

    let document = run(&dto).expect("construction should succeed");
    assert!(matches!(document.metadata.status, SolveStatus::Optimal | SolveStatus::Feasible));

    let mut writer_starts: Vec<u32> = document.assignments.iter().filter(|a| a.task_type == "ORDER_WRITER").map(|a| a.start_time).collect();
    writer_starts.sort();
    assert_eq!(writer_starts.len(), 4);
    for pair in writer_starts.windows(2) {
        assert_eq!(pair[1] - pair[0], 30, "ORDER_WRITER slots must be contiguous");
    }
}
