//! Scanplane Core
//!
//! Core types and pure rendering for the Scanplane client.
//!
//! This crate contains:
//! - Domain types: what the control plane reports (job status, plans, sources)
//! - DTOs: request bodies and response envelopes
//! - Diagram: the flow diagram layout engine and SVG renderer
//! - Panels: text renderings of a plan

pub mod diagram;
pub mod domain;
pub mod dto;
pub mod panel;
