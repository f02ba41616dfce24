//! Complaint generation pipeline: prompt assembly plus the two generate
//! endpoints (ad-hoc batch and blueprint-backed).

pub mod builder;
pub mod handlers;
pub mod prompts;
