//! XLSX writer backed by `rust_xlsxwriter`
//!
//! Layout: optional description lines, then the bold header row (with any
//! header notes), then data, then a blank row and optional footer lines.
//! Merge ranges arrive relative to the header row and are shifted down by the
//! number of description lines.

use crate::adapters::writer::naming::{export_file_name, file_url, sanitize_sheet_title};
use crate::adapters::writer::traits::{SheetRequest, SheetWriter};
use crate::core::merge::FIRST_DATA_ROW;
use crate::domain::errors::WriteError;
use crate::domain::job::FileLocation;
use crate::domain::table::CellValue;
use crate::domain::Result;
use async_trait::async_trait;
use chrono::Local;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Note, Workbook, Worksheet, XlsxError};
use std::path::PathBuf;

/// Writes workbooks into a directory and serves them under a base URL
#[derive(Debug, Clone)]
pub struct XlsxSheetWriter {
    output_dir: PathBuf,
    public_base_url: String,
}

impl XlsxSheetWriter {
    /// Create a writer for `output_dir`, publishing files under `public_base_url`
    pub fn new(output_dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            public_base_url: public_base_url.into(),
        }
    }
}

#[async_trait]
impl SheetWriter for XlsxSheetWriter {
    async fn write(&self, request: SheetRequest) -> Result<FileLocation> {
        let file_name = export_file_name(&request.filename_stem, &Local::now());
        let rows = request.table.len();

        let buffer = tokio::task::spawn_blocking(move || encode_workbook(&request))
            .await
            .map_err(|e| WriteError::Encoding(format!("encoder task failed: {e}")))??;

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| WriteError::Io(format!("{}: {e}", self.output_dir.display())))?;
        let path = self.output_dir.join(&file_name);
        tokio::fs::write(&path, &buffer)
            .await
            .map_err(|e| WriteError::Io(format!("{}: {e}", path.display())))?;

        tracing::info!(
            path = %path.display(),
            rows,
            bytes = buffer.len(),
            "Workbook written"
        );

        Ok(FileLocation {
            path: path.to_string_lossy().to_string(),
            url: file_url(&self.public_base_url, &file_name),
        })
    }
}

/// Encode the request as an in-memory XLSX workbook
pub fn encode_workbook(request: &SheetRequest) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sanitize_sheet_title(&request.sheet_title))
        .map_err(encoding_error)?;

    let fmt_description = Format::new().set_bold();
    let fmt_header = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);
    let fmt_merged = Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let fmt_plain = Format::new();

    for (idx, line) in request.description.iter().enumerate() {
        worksheet
            .write_string_with_format(cast_row_num(idx)?, 0, line, &fmt_description)
            .map_err(encoding_error)?;
    }

    // 0-based worksheet row of the header
    let header_row = request.description.len();

    for (col_idx, header) in request.table.headers().iter().enumerate() {
        worksheet
            .write_string_with_format(
                cast_row_num(header_row)?,
                cast_col_num(col_idx)?,
                header,
                &fmt_header,
            )
            .map_err(encoding_error)?;
    }

    for (row_offset, row) in request.table.rows().iter().enumerate() {
        let row_idx = header_row + 1 + row_offset;
        for (col_idx, value) in row.values().iter().enumerate() {
            write_cell(worksheet, row_idx, col_idx, value, &fmt_plain)?;
        }
    }

    for note in &request.header_notes {
        let col_idx = request.table.column_of(&note.header).ok_or_else(|| {
            WriteError::Layout(format!("note on unknown header '{}'", note.header))
        })?;
        let mut xlsx_note = Note::new(&note.text);
        if let Some(author) = &note.author {
            xlsx_note = xlsx_note.set_author(author);
        }
        worksheet
            .insert_note(cast_row_num(header_row)?, cast_col_num(col_idx)?, &xlsx_note)
            .map_err(encoding_error)?;
    }

    let data_rows = request.table.rows();
    for merge in &request.merges {
        let outside = || {
            WriteError::Layout(format!(
                "merge {}:{}..{} outside the data area",
                merge.column, merge.first_row, merge.last_row
            ))
        };

        // 0-based data indices; sheet row FIRST_DATA_ROW is data index 0
        let first_idx = merge.first_row.checked_sub(FIRST_DATA_ROW).ok_or_else(outside)?;
        let last_idx = merge.last_row.checked_sub(FIRST_DATA_ROW).ok_or_else(outside)?;
        if last_idx < first_idx || last_idx >= data_rows.len() {
            return Err(outside().into());
        }
        let col_idx = merge.column.checked_sub(1).ok_or_else(|| {
            WriteError::Layout(format!("merge column must be 1-based, got {}", merge.column))
        })?;

        let value = data_rows[first_idx].get(col_idx).ok_or_else(outside)?;
        let first_row = header_row + 1 + first_idx;
        let last_row = header_row + 1 + last_idx;

        worksheet
            .merge_range(
                cast_row_num(first_row)?,
                cast_col_num(col_idx)?,
                cast_row_num(last_row)?,
                cast_col_num(col_idx)?,
                "",
                &fmt_merged,
            )
            .map_err(encoding_error)?;
        write_cell(worksheet, first_row, col_idx, value, &fmt_merged)?;
    }

    // One blank row between the data and the footer
    let footer_row = header_row + 1 + data_rows.len() + 1;
    for (idx, line) in request.footer.iter().enumerate() {
        worksheet
            .write_string_with_format(cast_row_num(footer_row + idx)?, 0, line, &fmt_description)
            .map_err(encoding_error)?;
    }

    let buffer = workbook.save_to_buffer().map_err(encoding_error)?;
    Ok(buffer)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &CellValue,
    format: &Format,
) -> Result<()> {
    let row = cast_row_num(row_idx)?;
    let col = cast_col_num(col_idx)?;

    match value {
        CellValue::Empty => worksheet.write_blank(row, col, format),
        CellValue::Bool(b) => worksheet.write_boolean_with_format(row, col, *b, format),
        CellValue::Number(n) => match n.as_f64() {
            Some(f) => worksheet.write_number_with_format(row, col, f, format),
            None => worksheet.write_string_with_format(row, col, n.to_string(), format),
        },
        CellValue::Text(s) => worksheet.write_string_with_format(row, col, s, format),
        CellValue::Nested(_) => worksheet.write_string_with_format(row, col, value.render(), format),
    }
    .map_err(encoding_error)?;

    Ok(())
}

fn cast_row_num(value: usize) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| WriteError::Layout(format!("row index overflow: {value}")).into())
}

fn cast_col_num(value: usize) -> Result<u16> {
    u16::try_from(value)
        .map_err(|_| WriteError::Layout(format!("column index overflow: {value}")).into())
}

fn encoding_error(err: XlsxError) -> WriteError {
    WriteError::Encoding(format!("xlsx write error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::writer::traits::HeaderNote;
    use crate::core::merge::MergeRange;
    use crate::domain::errors::SheetforgeError;
    use crate::domain::table::{Row, Table};
    use tempfile::TempDir;

    fn request(merges: Vec<MergeRange>) -> SheetRequest {
        let table = Table::new(
            vec!["Date".to_string(), "Count".to_string()],
            vec![
                Row::new(vec![CellValue::from("2024-11-01"), CellValue::from(2)]),
                Row::new(vec![CellValue::from("2024-11-01"), CellValue::from(2)]),
                Row::new(vec![CellValue::from("2024-11-02"), CellValue::Empty]),
            ],
        )
        .unwrap();

        SheetRequest {
            table,
            merges,
            sheet_title: "Dynamic Merge Example".to_string(),
            filename_stem: "merge_example".to_string(),
            description: vec![],
            header_notes: vec![],
            footer: vec![],
        }
    }

    #[test]
    fn test_encode_produces_zip_container() {
        let bytes = encode_workbook(&request(vec![])).unwrap();
        // XLSX is a zip archive
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_encode_with_merges_and_description() {
        let mut req = request(vec![MergeRange {
            column: 2,
            first_row: 2,
            last_row: 3,
        }]);
        req.description = vec!["Attendance".to_string(), "April 2025".to_string()];
        assert!(encode_workbook(&req).is_ok());
    }

    #[test]
    fn test_merge_outside_data_is_layout_error() {
        let req = request(vec![MergeRange {
            column: 1,
            first_row: 9,
            last_row: 10,
        }]);
        let err = encode_workbook(&req).unwrap_err();
        assert!(err.to_string().contains("Invalid sheet layout"));
    }

    #[test]
    fn test_merge_starting_on_header_is_layout_error() {
        for first_row in [0, 1] {
            let req = request(vec![MergeRange {
                column: 1,
                first_row,
                last_row: 3,
            }]);
            let err = encode_workbook(&req).unwrap_err();
            assert!(matches!(err, SheetforgeError::Write(WriteError::Layout(_))));
        }
    }

    #[test]
    fn test_merge_past_last_row_is_layout_error() {
        let req = request(vec![MergeRange {
            column: 1,
            first_row: 3,
            last_row: 5,
        }]);
        let err = encode_workbook(&req).unwrap_err();
        assert!(matches!(err, SheetforgeError::Write(WriteError::Layout(_))));
    }

    #[test]
    fn test_encode_with_notes_and_footer() {
        let mut req = request(vec![]);
        req.header_notes = vec![
            HeaderNote {
                header: "Date".to_string(),
                text: "Local calendar date".to_string(),
                author: Some("HR Team".to_string()),
            },
            HeaderNote {
                header: "Count".to_string(),
                text: "Punches recorded".to_string(),
                author: None,
            },
        ];
        req.footer = vec!["Total employees: 2".to_string()];
        let bytes = encode_workbook(&req).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_note_on_unknown_header_is_layout_error() {
        let mut req = request(vec![]);
        req.header_notes = vec![HeaderNote {
            header: "Missing".to_string(),
            text: "x".to_string(),
            author: None,
        }];
        let err = encode_workbook(&req).unwrap_err();
        assert!(matches!(err, SheetforgeError::Write(WriteError::Layout(_))));
    }

    #[tokio::test]
    async fn test_write_to_directory() {
        let dir = TempDir::new().unwrap();
        let writer = XlsxSheetWriter::new(dir.path(), "/media");

        let location = writer.write(request(vec![])).await.unwrap();

        assert!(location.url.starts_with("/media/merge_example_"));
        assert!(location.url.ends_with(".xlsx"));
        assert!(std::path::Path::new(&location.path).exists());
    }
}
