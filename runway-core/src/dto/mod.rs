//! Data Transfer Objects for the Runway API
//!
//! Request bodies, list filters and pagination envelopes. Filters turn into
//! query strings through [`ToQuery`]; list responses come back as
//! [`Paginated`].

pub mod api_key;
pub mod artifact;
pub mod auth;
pub mod execution;
pub mod page;
pub mod pipeline;
pub mod query;
pub mod runner;
pub mod secret;
pub mod workspace;

pub use page::{ListEnvelope, Paginated, PaginationMeta};
pub use query::{QueryParams, ToQuery};
