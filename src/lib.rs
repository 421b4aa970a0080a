// sheetforge - Spreadsheet Export Job Engine
// Copyright (c) 2025 Sheetforge Contributors
// Licensed under the MIT License

//! # sheetforge - Spreadsheet Export Job Engine
//!
//! sheetforge turns semi-structured records into spreadsheet reports, one
//! tracked job per request.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Projecting** nested records onto an ordered set of columns via dotted paths
//! - **Merging** runs of equal values in a grouping column into vertical ranges
//! - **Writing** `.xlsx` workbooks and publishing them under a public URL
//! - **Tracking** every export as a job with a `Queued → Processing → Completed | Failed` lifecycle
//! - **Deduplicating** requests by returning the latest completed job for the same identity
//! - **Notifying** the requester or their organization when a job finishes
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (transform, merge, state, export)
//! - [`adapters`] - Job stores, sheet writers and notifiers
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sheetforge::adapters::factory::create_coordinator;
//! use sheetforge::config::load_config;
//! use sheetforge::core::export::ExportRequest;
//! use sheetforge::domain::{ExportType, RequesterId};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("sheetforge.toml")?;
//!     let coordinator = create_coordinator(&config).await?;
//!
//!     let export_type = ExportType::new("DailyAttendanceReport")?;
//!     let definition = config.find_export(&export_type).ok_or("unknown export")?;
//!
//!     let request = ExportRequest::new(Arc::new(definition.clone()), RequesterId::new("user-1")?);
//!     let outcome = coordinator.request_export(request).await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::Result`], backed by
//! [`domain::SheetforgeError`]. The CLI wraps these in `anyhow`.
//!
//! ## Logging
//!
//! Structured logging with the `tracing` crate; see [`logging::init_logging`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
