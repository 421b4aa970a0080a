//! Run-length cell merge planning
//!
//! Computes "group and center" merge ranges over a column of already-sorted
//! rows. See [`planner`].

pub mod planner;

pub use planner::{plan, plan_with, MergeRange, TrailingRun, FIRST_DATA_ROW, HEADER_ROW};
