//! Data Transfer Objects for control plane requests
//!
//! Request bodies sent by the client and the response envelopes that are not
//! domain entities on their own.

pub mod health;
pub mod job;
pub mod scan;
pub mod source;
