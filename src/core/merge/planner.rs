//! Merge planner
//!
//! Scans rows top to bottom tracking the current group's value and start row.
//! When the group column changes value, the group just closed is emitted as a
//! [`MergeRange`] if it spans more than one row. Single pass, one comparison
//! per row. The planner never sorts; callers order rows on their grouping
//! keys first.
//!
//! Coordinates are 1-based sheet coordinates: row 1 is the header, data rows
//! start at [`FIRST_DATA_ROW`], column 1 is the first column.

use crate::domain::table::{CellValue, Row};
use serde::{Deserialize, Serialize};

/// Sheet row holding the column headers
pub const HEADER_ROW: usize = 1;

/// Sheet row of the first data row
pub const FIRST_DATA_ROW: usize = HEADER_ROW + 1;

/// Vertical merge of one column over an inclusive row span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergeRange {
    /// 1-based sheet column
    pub column: usize,
    /// First sheet row of the span
    pub first_row: usize,
    /// Last sheet row of the span, always greater than `first_row`
    pub last_row: usize,
}

impl MergeRange {
    /// Number of rows covered
    pub fn height(&self) -> usize {
        self.last_row - self.first_row + 1
    }
}

/// What to do with the group still open when the scan ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingRun {
    /// Close and merge the final group like any other
    #[default]
    Close,
    /// Leave the final group unmerged (the legacy "close gaps only" behavior)
    Drop,
}

/// Plan merges of the grouping column itself, closing the trailing run
///
/// # Examples
///
/// ```
/// use sheetforge::core::merge::{plan, MergeRange};
/// use sheetforge::domain::Row;
///
/// let rows: Vec<Row> = ["A", "A", "A", "B", "C", "C"]
///     .into_iter()
///     .map(|v| Row::from_iter([v]))
///     .collect();
///
/// assert_eq!(
///     plan(&rows, 1),
///     vec![
///         MergeRange { column: 1, first_row: 2, last_row: 4 },
///         MergeRange { column: 1, first_row: 6, last_row: 7 },
///     ]
/// );
/// ```
pub fn plan(rows: &[Row], group_column: usize) -> Vec<MergeRange> {
    plan_with(rows, group_column, group_column, TrailingRun::Close)
}

/// Plan merges of `merge_column` over runs of equal values in `group_column`
///
/// Both columns are 1-based. A column outside the row width yields no
/// ranges.
pub fn plan_with(
    rows: &[Row],
    group_column: usize,
    merge_column: usize,
    trailing: TrailingRun,
) -> Vec<MergeRange> {
    let mut ranges = Vec::new();

    let width = rows.first().map(Row::len).unwrap_or(0);
    if !(1..=width).contains(&group_column) || !(1..=width).contains(&merge_column) {
        if !rows.is_empty() {
            tracing::warn!(
                group_column,
                merge_column,
                width,
                "Merge column outside sheet width, no merges planned"
            );
        }
        return ranges;
    }

    let mut close = |first_row: usize, last_row: usize| {
        if first_row < last_row {
            ranges.push(MergeRange {
                column: merge_column,
                first_row,
                last_row,
            });
        }
    };

    let mut current: Option<&CellValue> = None;
    let mut start_row = FIRST_DATA_ROW;

    for (offset, row) in rows.iter().enumerate() {
        let sheet_row = FIRST_DATA_ROW + offset;
        let value = row.get(group_column - 1);

        if offset == 0 {
            current = value;
            continue;
        }

        if value != current {
            close(start_row, sheet_row - 1);
            current = value;
            start_row = sheet_row;
        }
    }

    if trailing == TrailingRun::Close && !rows.is_empty() {
        close(start_row, FIRST_DATA_ROW + rows.len() - 1);
    }

    tracing::debug!(
        rows = rows.len(),
        group_column,
        merge_column,
        ranges = ranges.len(),
        "Planned merge ranges"
    );
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[&str]) -> Vec<Row> {
        values.iter().map(|v| Row::from_iter([*v])).collect()
    }

    fn range(column: usize, first_row: usize, last_row: usize) -> MergeRange {
        MergeRange {
            column,
            first_row,
            last_row,
        }
    }

    #[test]
    fn test_runs_with_singleton_in_between() {
        let rows = column(&["A", "A", "A", "B", "C", "C"]);
        assert_eq!(plan(&rows, 1), vec![range(1, 2, 4), range(1, 6, 7)]);
    }

    #[test]
    fn test_trailing_run_dropped_on_request() {
        let rows = column(&["A", "A", "A", "B", "C", "C"]);
        assert_eq!(
            plan_with(&rows, 1, 1, TrailingRun::Drop),
            vec![range(1, 2, 4)]
        );
    }

    #[test]
    fn test_all_distinct_yields_nothing() {
        let rows = column(&["A", "B", "C", "D"]);
        assert!(plan(&rows, 1).is_empty());
    }

    #[test]
    fn test_single_group_spans_everything() {
        let rows = column(&["A", "A", "A"]);
        assert_eq!(plan(&rows, 1), vec![range(1, 2, 4)]);
        assert!(plan_with(&rows, 1, 1, TrailingRun::Drop).is_empty());
    }

    #[test]
    fn test_empty_and_single_row() {
        assert!(plan(&[], 1).is_empty());
        assert!(plan(&column(&["A"]), 1).is_empty());
    }

    #[test]
    fn test_plan_is_idempotent() {
        let rows = column(&["x", "x", "y", "y", "y", "z"]);
        assert_eq!(plan(&rows, 1), plan(&rows, 1));
    }

    #[test]
    fn test_blank_cells_group_together() {
        let rows = vec![
            Row::new(vec![CellValue::Empty]),
            Row::new(vec![CellValue::Empty]),
            Row::from_iter(["A"]),
        ];
        assert_eq!(plan(&rows, 1), vec![range(1, 2, 3)]);
    }

    #[test]
    fn test_merge_column_differs_from_group_column() {
        let rows = vec![
            Row::from_iter(["2024-11-01", "2"]),
            Row::from_iter(["2024-11-01", "2"]),
            Row::from_iter(["2024-11-02", "1"]),
        ];
        assert_eq!(plan_with(&rows, 1, 2, TrailingRun::Close), vec![range(2, 2, 3)]);
    }

    #[test]
    fn test_out_of_range_column_yields_nothing() {
        let rows = column(&["A", "A"]);
        assert!(plan(&rows, 0).is_empty());
        assert!(plan(&rows, 2).is_empty());
        assert!(plan_with(&rows, 1, 5, TrailingRun::Close).is_empty());
    }

    #[test]
    fn test_ranges_are_disjoint_and_below_header() {
        let rows = column(&["a", "a", "b", "b", "c", "d", "d", "d"]);
        let ranges = plan(&rows, 1);
        assert!(ranges.iter().all(|r| r.first_row > HEADER_ROW));
        assert!(ranges.iter().all(|r| r.first_row < r.last_row));
        for pair in ranges.windows(2) {
            assert!(pair[0].last_row < pair[1].first_row);
        }
        assert_eq!(ranges.iter().map(MergeRange::height).sum::<usize>(), 7);
    }
}
