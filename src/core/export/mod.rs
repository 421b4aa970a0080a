//! Export orchestration
//!
//! - [`coordinator`] - request handling, dedup and the job lifecycle
//! - [`definition`] - configured exports
//! - [`request`] - request and outcome types
//! - [`notify`] - notification text and addressing
//! - [`single_flight`] - optional in-process request collapsing

pub mod coordinator;
pub mod definition;
pub mod notify;
pub mod request;
pub mod single_flight;
pub mod tasks;

pub use coordinator::{CoordinatorSettings, ExecutionMode, ExportCoordinator};
pub use definition::{ExportDefinition, MergeSpec};
pub use request::{ExportOutcome, ExportRequest, GENERIC_FAILURE_MESSAGE, UNAVAILABLE_MESSAGE};
pub use single_flight::InFlight;
pub use tasks::BackgroundTasks;
