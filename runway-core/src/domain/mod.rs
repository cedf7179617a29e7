//! Core domain types
//!
//! This module contains the entities observed and returned by the Runway API.
//! They are plain serde records shared between the client (which decodes them)
//! and the state machine (which validates changes to them).

pub mod api_key;
pub mod artifact;
pub mod execution;
pub mod job;
pub mod log;
pub mod pipeline;
pub mod runner;
pub mod secret;
pub mod user;
pub mod workspace;
