//! End-to-end transform scenarios: resolve, project, sort, plan

use serde_json::json;
use sheetforge::core::merge::{plan, plan_with, MergeRange, TrailingRun};
use sheetforge::core::transform::{project, resolve, sort_rows};
use sheetforge::domain::{CellValue, FieldMapping, Record, Row};

fn timesheet(name: &str, code: &str, date: &str, hours: f64) -> Record {
    Record::from(json!({
        "timesheet_user": {
            "full_name": name,
            "employee_code": code,
            "division": {"name": "Operations"},
            "branch": {"name": "Kathmandu"},
            "email": format!("{}@example.com", code.to_lowercase()),
        },
        "shift": {"name": "Morning"},
        "timesheet_for": date,
        "punch_in": "09:00",
        "worked_hours": hours,
    }))
}

fn mapping() -> FieldMapping {
    FieldMapping::from_pairs([
        ("timesheet_user.full_name", "Full Name"),
        ("timesheet_user.employee_code", "Employee Code"),
        ("timesheet_user.division.name", "Division"),
        ("timesheet_user.branch.name", "Branch"),
        ("timesheet_user.email", "Email"),
        ("shift.name", "Shift"),
        ("timesheet_for", "Date"),
        ("punch_in", "Punch In"),
        ("worked_hours", "Worked Hours"),
    ])
    .unwrap()
}

#[test]
fn test_resolve_scenario() {
    let record = Record::from(json!({"a": {"b": 1}}));
    assert_eq!(resolve(&record, "a.b"), CellValue::from(1));
    assert_eq!(resolve(&record, "a.c").render(), "");
    assert_eq!(resolve(&record, "x.y").render(), "");
}

#[test]
fn test_four_day_run_merges_as_one_range() {
    // Input order deliberately shuffled; sorting restores contiguity
    let records = vec![
        timesheet("Alice Brown", "E003", "2024-11-05", 7.5),
        timesheet("Alice Brown", "E003", "2024-11-03", 2.0),
        timesheet("Aaron Shah", "E001", "2024-11-02", 8.0),
        timesheet("Alice Brown", "E003", "2024-11-03", 3.0),
        timesheet("Alice Brown", "E003", "2024-11-04", 8.0),
        timesheet("Alice Brown", "E003", "2024-11-03", 1.5),
        timesheet("Aaron Shah", "E001", "2024-11-01", 8.0),
        timesheet("Alice Brown", "E003", "2024-11-03", 1.0),
    ];

    let mut table = project(&records, &mapping());
    assert_eq!(table.len(), records.len());

    sort_rows(
        &mut table,
        &[
            "Full Name".to_string(),
            "Employee Code".to_string(),
            "Date".to_string(),
        ],
    )
    .unwrap();

    // Rows 2-3 Aaron, rows 4-7 Alice on 11-03, then 11-04 and 11-05
    let dates: Vec<String> = table.rows().iter().map(|r| r.values()[6].render()).collect();
    assert_eq!(
        dates,
        [
            "2024-11-01",
            "2024-11-02",
            "2024-11-03",
            "2024-11-03",
            "2024-11-03",
            "2024-11-03",
            "2024-11-04",
            "2024-11-05",
        ]
    );

    let ranges = plan_with(table.rows(), 7, 9, TrailingRun::Close);
    assert_eq!(
        ranges,
        vec![MergeRange {
            column: 9,
            first_row: 4,
            last_row: 7
        }]
    );

    // Stable sort keeps the 11-03 rows in input order
    let hours: Vec<String> = table.rows()[2..6]
        .iter()
        .map(|r| r.values()[8].render())
        .collect();
    assert_eq!(hours, ["2.0", "3.0", "1.5", "1.0"]);
}

#[test]
fn test_plan_is_idempotent() {
    let rows: Vec<Row> = ["A", "A", "A", "B", "C", "C"]
        .into_iter()
        .map(|v| Row::from_iter([v]))
        .collect();

    let first = plan(&rows, 1);
    let second = plan(&rows, 1);
    assert_eq!(first, second);
    assert_eq!(
        first,
        vec![
            MergeRange {
                column: 1,
                first_row: 2,
                last_row: 4
            },
            MergeRange {
                column: 1,
                first_row: 6,
                last_row: 7
            },
        ]
    );
}

#[test]
fn test_trailing_run_policy() {
    let rows: Vec<Row> = ["A", "A", "B", "B"]
        .into_iter()
        .map(|v| Row::from_iter([v]))
        .collect();

    assert_eq!(plan_with(&rows, 1, 1, TrailingRun::Close).len(), 2);
    assert_eq!(
        plan_with(&rows, 1, 1, TrailingRun::Drop),
        vec![MergeRange {
            column: 1,
            first_row: 2,
            last_row: 3
        }]
    );
}

#[test]
fn test_all_distinct_yields_no_ranges() {
    let rows: Vec<Row> = ["A", "B", "C", "D"]
        .into_iter()
        .map(|v| Row::from_iter([v]))
        .collect();
    assert!(plan(&rows, 1).is_empty());
}
