//! crewboard - Employee Task Tracker Client Library
//!
//! This library provides the core functionality for the crewboard CLI
//! and terminal dashboard, a client for the employee task tracker API.
//!
//! # Core Concepts
//!
//! - **Snapshot**: one consistent copy of employees, tasks, and the
//!   dashboard aggregate, replaced as a whole on every load
//! - **Resynchronization**: every successful mutation triggers a full
//!   re-fetch; there is no incremental patching
//! - **Derived Views**: chart buckets and per-employee statistics are
//!   read-only projections that never write back to the snapshot
//! - **Filtering**: a two-dimensional (employee, status) predicate over
//!   the task list, evaluated as a pure function
//!
//! # Module Organization
//!
//! - `api`: HTTP client for the tracker REST endpoints
//! - `cli`: command-line interface using clap
//! - `config`: configuration loading from `.crewboard.toml`
//! - `error`: error types and result aliases
//! - `filter`: task list predicate evaluation
//! - `model`: wire-level data types
//! - `output`: shared human/JSON output envelopes
//! - `sync`: fetch/mutate/refresh controller owning the snapshot
//! - `ui`: ratatui terminal dashboard
//! - `views`: derived projections over the snapshot

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod output;
pub mod sync;
pub mod ui;
pub mod views;

pub use error::{Error, Result};
