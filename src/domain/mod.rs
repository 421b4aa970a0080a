//! Domain models and types for sheetforge.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`ExportType`], [`RequesterId`], [`OrganizationId`], [`JobId`])
//! - **Input records** ([`Record`]) and the flat output model ([`FieldMapping`], [`Row`], [`Table`])
//! - **The export job entity** ([`ExportJob`]) and its state machine
//! - **Error types** ([`SheetforgeError`], [`WriteError`], [`PersistenceError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, SheetforgeError>`]:
//!
//! ```rust
//! use sheetforge::domain::{FieldMapping, Result};
//!
//! fn example() -> Result<()> {
//!     let mapping = FieldMapping::from_pairs([("user.name", "Name")])?;
//!     assert_eq!(mapping.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod job;
pub mod record;
pub mod result;
pub mod table;

pub use errors::{PersistenceError, SheetforgeError, WriteError};
pub use ids::{ExportType, JobId, OrganizationId, RequesterId};
pub use job::{Audience, ExportIdentity, ExportJob, FileLocation, JobStatus};
pub use record::{Record, Scalar};
pub use result::Result;
pub use table::{CellValue, FieldMapping, FieldSpec, Row, Table};
