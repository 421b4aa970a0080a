//! Dotted-path resolution
//!
//! Resolves paths like `"timesheet_user.organization.name"` against a
//! [`Record`]. Resolution is total: a path that cannot be followed yields
//! [`CellValue::Empty`] so one malformed record degrades to a blank cell
//! instead of aborting the export.

use crate::domain::record::{Record, Scalar};
use crate::domain::table::CellValue;

/// Path segment separator
pub const PATH_SEPARATOR: char = '.';

/// Resolve a dotted path against a record
///
/// Returns [`CellValue::Empty`] when:
/// - any segment is missing,
/// - an intermediate value is a scalar,
/// - the final value is `null` or an empty mapping.
///
/// A segment that parses as an unsigned integer indexes into a sequence.
/// Empty sequences are kept and render as `[]`.
///
/// # Examples
///
/// ```
/// use sheetforge::core::transform::flatten::resolve;
/// use sheetforge::domain::{CellValue, Record};
/// use serde_json::json;
///
/// let record = Record::from(json!({"a": {"b": 1}}));
/// assert_eq!(resolve(&record, "a.b"), CellValue::from(1));
/// assert_eq!(resolve(&record, "a.c"), CellValue::Empty);
/// assert_eq!(resolve(&record, "x.y"), CellValue::Empty);
/// ```
pub fn resolve(record: &Record, dotted_path: &str) -> CellValue {
    let mut current = record;

    for segment in dotted_path.split(PATH_SEPARATOR) {
        let next = match current {
            Record::Container(_) => current.field(segment),
            Record::Sequence(_) => segment.parse::<usize>().ok().and_then(|i| current.item(i)),
            Record::Absent | Record::Scalar(_) => None,
        };

        match next {
            Some(value) => current = value,
            None => {
                tracing::trace!(path = %dotted_path, segment = %segment, "Path not resolved");
                return CellValue::Empty;
            }
        }
    }

    to_cell(current)
}

fn to_cell(value: &Record) -> CellValue {
    match value {
        Record::Absent | Record::Scalar(Scalar::Null) => CellValue::Empty,
        Record::Scalar(Scalar::Bool(b)) => CellValue::Bool(*b),
        Record::Scalar(Scalar::Number(n)) => CellValue::Number(n.clone()),
        Record::Scalar(Scalar::Text(s)) => CellValue::Text(s.clone()),
        Record::Container(fields) if fields.is_empty() => CellValue::Empty,
        Record::Container(_) | Record::Sequence(_) => CellValue::Nested(value.clone()),
    }
}
