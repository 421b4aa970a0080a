//! Spreadsheet writer abstraction

use crate::core::merge::MergeRange;
use crate::domain::job::FileLocation;
use crate::domain::table::Table;
use crate::domain::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Comment attached to a header cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderNote {
    /// Header the note is attached to
    pub header: String,
    /// Note text
    pub text: String,
    /// Shown as the note author
    #[serde(default)]
    pub author: Option<String>,
}

/// Everything a writer needs to produce one sheet
#[derive(Debug, Clone)]
pub struct SheetRequest {
    /// Headers and rows, in output order
    pub table: Table,
    /// Vertical merges, in sheet coordinates relative to the header row
    pub merges: Vec<MergeRange>,
    /// Worksheet title
    pub sheet_title: String,
    /// Output file name stem; the writer appends a timestamp and extension
    pub filename_stem: String,
    /// Free-text lines written above the header
    pub description: Vec<String>,
    /// Notes on header cells
    pub header_notes: Vec<HeaderNote>,
    /// Free-text lines written below the last data row
    pub footer: Vec<String>,
}

/// Produces a spreadsheet file from a [`SheetRequest`]
///
/// Implementations must preserve row and header order and apply merges only
/// to the given spans.
#[async_trait]
pub trait SheetWriter: Send + Sync {
    /// Write the sheet and return where the file landed
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::WriteError`] on any I/O or encoding problem.
    async fn write(&self, request: SheetRequest) -> Result<FileLocation>;
}
