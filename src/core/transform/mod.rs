//! Record-to-row transformation
//!
//! Turns nested records into the flat [`Table`](crate::domain::Table) the
//! writer consumes:
//!
//! - [`flatten`] - total dotted-path resolution
//! - [`project`] - field mapping applied over a record set
//! - [`sort`] - optional caller-side ordering before merge planning

pub mod flatten;
pub mod project;
pub mod sort;

pub use flatten::resolve;
pub use project::project;
pub use sort::sort_rows;
