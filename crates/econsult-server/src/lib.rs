//! eConsult Server — application state, routes, and the analysis pipeline.
//!
//! Exposed as a library so integration tests can drive the real router.

pub mod dashboard;
pub mod pipeline;
pub mod routes;
pub mod state;
