// Persisted job state

pub mod manager;

pub use manager::JobManager;
