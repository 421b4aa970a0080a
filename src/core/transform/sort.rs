//! Caller-side row ordering
//!
//! The merge planner only sees contiguous runs, so exports that merge cells
//! sort their rows first. Sorting is a per-export policy and lives here, not
//! in the planner.

use crate::domain::errors::SheetforgeError;
use crate::domain::table::Table;
use crate::domain::Result;
use std::cmp::Ordering;

/// Stable sort of the table rows on the given headers, in priority order
///
/// Rows that compare equal on every key keep their input order.
///
/// # Errors
///
/// Returns a validation error if a sort header is not a table column.
pub fn sort_rows(table: &mut Table, sort_headers: &[String]) -> Result<()> {
    if sort_headers.is_empty() {
        return Ok(());
    }

    let columns = sort_headers
        .iter()
        .map(|header| {
            table.column_of(header).ok_or_else(|| {
                SheetforgeError::Validation(format!("Unknown sort header '{header}'"))
            })
        })
        .collect::<Result<Vec<usize>>>()?;

    table.rows_mut().sort_by(|a, b| {
        columns
            .iter()
            .map(|&column| match (a.get(column), b.get(column)) {
                (Some(x), Some(y)) => x.sort_cmp(y),
                _ => Ordering::Equal,
            })
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });

    tracing::debug!(keys = ?sort_headers, rows = table.len(), "Sorted rows");
    Ok(())
}
