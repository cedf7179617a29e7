//! Runway Core
//!
//! Core types and rules for the Runway CI/CD dashboard.
//!
//! This crate contains:
//! - Domain types: pipelines, executions, jobs, runners, secrets
//! - Lifecycle: the execution/job state machine
//! - Tracker: an in-memory registry driving executions through the lifecycle
//! - DTOs: request bodies, list filters and pagination

pub mod domain;
pub mod dto;
pub mod error;
pub mod lifecycle;
pub mod tracker;

pub use error::{CoreError, Result};
pub use tracker::ExecutionTracker;
