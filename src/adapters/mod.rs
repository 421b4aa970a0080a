//! External system integrations for sheetforge.
//!
//! - [`store`] - job persistence (in-memory, JSON files)
//! - [`writer`] - spreadsheet output (`rust_xlsxwriter`)
//! - [`notify`] - notification channels (log, webhook)
//! - [`factory`] - builds adapters from configuration
//!
//! # Design Pattern
//!
//! Each collaborator of the export coordinator is an `async_trait` trait
//! object, so tests substitute in-process doubles and deployments pick
//! backends from configuration.
//!
//! ```rust,no_run
//! use sheetforge::adapters::factory::create_coordinator;
//! use sheetforge::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("sheetforge.toml")?;
//! let coordinator = create_coordinator(&config).await?;
//! println!("{} jobs on record", coordinator.list_jobs().await?.len());
//! # Ok(())
//! # }
//! ```

pub mod factory;
pub mod notify;
pub mod store;
pub mod writer;
