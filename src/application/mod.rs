//! Application layer: the quick-order workflow and the landing view that
//! opens it.
//!
//! `OrderWorkflow` owns one dialog session's form state and drives it through
//! validation and submission against the `OrderSubmitter` port.

pub mod landing;
pub mod workflow;
