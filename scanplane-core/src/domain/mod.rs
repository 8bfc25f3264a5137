//! Core domain types
//!
//! This module contains the structures observed from the control plane:
//! jobs and their status, provisioning plans, and registered sources.

pub mod job;
pub mod plan;
pub mod source;
