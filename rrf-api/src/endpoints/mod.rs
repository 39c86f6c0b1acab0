//! Endpoint wrappers organized by category.
//!
//! Each module adds methods to [`crate::RrfClient`] for a group of
//! related controller endpoints. Apart from the object model aggregation,
//! every method is a single request with no retry.

pub mod files;
pub mod jobs;
pub mod model;
pub mod session;
