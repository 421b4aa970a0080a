//! Row projection
//!
//! Applies a [`FieldMapping`] over a record set. Total: every record yields
//! exactly one complete row, in input order.

use crate::core::transform::flatten::resolve;
use crate::domain::record::Record;
use crate::domain::table::{CellValue, FieldMapping, Row, Table};

/// Project records into a table whose headers follow the mapping order
///
/// # Examples
///
/// ```
/// use sheetforge::core::transform::project::project;
/// use sheetforge::domain::{FieldMapping, Record};
/// use serde_json::json;
///
/// let records = vec![Record::from(json!({"user": {"name": "Ada"}}))];
/// let mapping = FieldMapping::from_pairs([("user.name", "Name"), ("user.email", "Email")]).unwrap();
///
/// let table = project(&records, &mapping);
/// assert_eq!(table.headers(), ["Name", "Email"]);
/// assert_eq!(table.rows()[0].values()[1].render(), "");
/// ```
pub fn project(records: &[Record], mapping: &FieldMapping) -> Table {
    let headers: Vec<String> = mapping
        .fields()
        .iter()
        .map(|field| field.header.clone())
        .collect();

    let rows: Vec<Row> = records
        .iter()
        .map(|record| project_record(record, mapping))
        .collect();

    tracing::debug!(
        records = records.len(),
        columns = headers.len(),
        "Projected records into rows"
    );

    Table::from_uniform(headers, rows)
}

fn project_record(record: &Record, mapping: &FieldMapping) -> Row {
    Row::new(
        mapping
            .fields()
            .iter()
            .map(|field| resolve(record, &field.path))
            .collect::<Vec<CellValue>>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapping() -> FieldMapping {
        FieldMapping::from_pairs([
            ("timesheet_user.full_name", "Full Name"),
            ("timesheet_for", "Timesheet For"),
            ("timesheet_user.employee_code", "Employee Code"),
            ("timesheet_entries", "Timesheet Entries"),
        ])
        .unwrap()
    }

    fn records() -> Vec<Record> {
        vec![
            Record::from(json!({
                "timesheet_for": "2025-04-17",
                "timesheet_user": {"full_name": "Employee 1", "employee_code": "EMP00001"},
                "timesheet_entries": []
            })),
            Record::from(json!({"timesheet_for": "2025-04-18"})),
            Record::from(json!({
                "timesheet_for": "2025-04-19",
                "timesheet_user": {"full_name": "Employee 3", "employee_code": "EMP00003"}
            })),
        ]
    }

    #[test]
    fn test_row_count_matches_records() {
        let table = project(&records(), &mapping());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_headers_follow_mapping_order() {
        let table = project(&records(), &mapping());
        assert_eq!(
            table.headers(),
            ["Full Name", "Timesheet For", "Employee Code", "Timesheet Entries"]
        );
    }

    #[test]
    fn test_rows_keep_input_order() {
        let table = project(&records(), &mapping());
        let dates: Vec<String> = table
            .rows()
            .iter()
            .map(|r| r.values()[1].render())
            .collect();
        assert_eq!(dates, ["2025-04-17", "2025-04-18", "2025-04-19"]);
    }

    #[test]
    fn test_partial_record_still_produces_full_row() {
        let table = project(&records(), &mapping());
        let sparse = &table.rows()[1];
        assert_eq!(sparse.len(), 4);
        assert_eq!(sparse.values()[0], CellValue::Empty);
        assert_eq!(sparse.values()[3], CellValue::Empty);
    }

    #[test]
    fn test_empty_record_set() {
        let table = project(&[], &mapping());
        assert!(table.is_empty());
        assert_eq!(table.headers().len(), 4);
    }
}
