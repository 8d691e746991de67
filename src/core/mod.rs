//! Core library components.
//!
//! This module contains the reusable business logic for parameter publishing
//! and task-definition reconciliation.

pub mod publisher;
pub mod remote;
pub mod taskdef;
pub mod vars;
