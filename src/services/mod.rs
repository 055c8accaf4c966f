//! Service layer for business logic.
//!
//! Separates command handling from the front end for better testability.

pub mod viewer_service;

pub use viewer_service::{EditCommand, ViewerService};
