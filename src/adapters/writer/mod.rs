//! Spreadsheet output
//!
//! - [`traits`] - the [`SheetWriter`] trait and [`SheetRequest`]
//! - [`xlsx`] - `rust_xlsxwriter` implementation
//! - [`naming`] - file name, sheet title and URL rules

pub mod naming;
pub mod traits;
pub mod xlsx;

pub use traits::{HeaderNote, SheetRequest, SheetWriter};
pub use xlsx::XlsxSheetWriter;
