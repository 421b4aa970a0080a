//! Configured export definitions
//!
//! An [`ExportDefinition`] names one export: which fields become which
//! columns, how rows are ordered and merged, and how the result is presented
//! and announced. Definitions are loaded from the `[[exports]]` tables of the
//! configuration file.

use crate::adapters::writer::HeaderNote;
use crate::core::merge::TrailingRun;
use crate::domain::errors::SheetforgeError;
use crate::domain::ids::ExportType;
use crate::domain::table::FieldMapping;
use crate::domain::Result;
use serde::{Deserialize, Serialize};

/// Vertical merge policy for an export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSpec {
    /// Header whose runs of equal values define the groups
    pub group_by: String,
    /// Header of the column to merge; defaults to `group_by`
    #[serde(default)]
    pub merge: Option<String>,
    /// Handling of the run still open after the last row
    #[serde(default)]
    pub trailing: TrailingRun,
}

impl MergeSpec {
    /// Header of the merged column
    pub fn merge_header(&self) -> &str {
        self.merge.as_deref().unwrap_or(&self.group_by)
    }
}

/// A named, configured export
///
/// # Examples
///
/// ```
/// use sheetforge::core::export::ExportDefinition;
///
/// let definition: ExportDefinition = toml::from_str(r#"
///     export_type = "DailyAttendanceReport"
///     title = "Daily Attendance"
///     filename_stem = "attendance_report"
///     fields = [
///         { path = "timesheet_for", header = "Date" },
///         { path = "timesheet_user.full_name", header = "Full Name" },
///     ]
///     sort_by = ["Full Name", "Date"]
///
///     [merge]
///     group_by = "Full Name"
/// "#).unwrap();
///
/// assert!(definition.validate().is_ok());
/// assert_eq!(definition.sheet_title(), "Daily Attendance");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDefinition {
    /// Export type, part of the dedup identity
    pub export_type: ExportType,

    /// Sheet title; defaults to the export type
    #[serde(default)]
    pub title: Option<String>,

    /// File name stem; defaults to the export type
    #[serde(default)]
    pub filename_stem: Option<String>,

    /// Ordered field→header mapping
    pub fields: FieldMapping,

    /// Headers to sort rows on before merging, in priority order
    #[serde(default)]
    pub sort_by: Vec<String>,

    /// Optional merge plan
    #[serde(default)]
    pub merge: Option<MergeSpec>,

    /// Lines written above the header row
    #[serde(default)]
    pub description: Vec<String>,

    /// Notes attached to header cells
    #[serde(default)]
    pub header_notes: Vec<HeaderNote>,

    /// Lines written below the data
    #[serde(default)]
    pub footer: Vec<String>,

    /// Frontend page the notification links to
    #[serde(default)]
    pub redirect_url: Option<String>,

    /// Permissions required to receive organization-wide notifications
    #[serde(default)]
    pub notification_permissions: Vec<String>,
}

impl ExportDefinition {
    /// Create a definition with defaults for everything but type and fields
    pub fn new(export_type: ExportType, fields: FieldMapping) -> Self {
        Self {
            export_type,
            title: None,
            filename_stem: None,
            fields,
            sort_by: Vec::new(),
            merge: None,
            description: Vec::new(),
            header_notes: Vec::new(),
            footer: Vec::new(),
            redirect_url: None,
            notification_permissions: Vec::new(),
        }
    }

    /// Check that every referenced header exists in the field mapping
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first unknown header.
    pub fn validate(&self) -> Result<()> {
        let headers = self.fields.headers();
        let check = |header: &str, role: &str| {
            if headers.contains(&header) {
                Ok(())
            } else {
                Err(SheetforgeError::Validation(format!(
                    "Export '{}': {role} header '{header}' is not in the field mapping",
                    self.export_type
                )))
            }
        };

        for header in &self.sort_by {
            check(header.as_str(), "sort")?;
        }
        if let Some(merge) = &self.merge {
            check(merge.group_by.as_str(), "group")?;
            check(merge.merge_header(), "merge")?;
        }
        for note in &self.header_notes {
            check(note.header.as_str(), "note")?;
        }
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(SheetforgeError::Validation(format!(
                    "Export '{}': title cannot be blank",
                    self.export_type
                )));
            }
        }
        Ok(())
    }

    /// Sheet title
    pub fn sheet_title(&self) -> &str {
        self.title.as_deref().unwrap_or(self.export_type.as_str())
    }

    /// File name stem
    pub fn filename_stem(&self) -> &str {
        self.filename_stem
            .as_deref()
            .unwrap_or(self.export_type.as_str())
    }
}
