//! Job matching — composes keyword scoring over externally fetched jobs.

pub mod handlers;
pub mod orchestrator;
