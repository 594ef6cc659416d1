//! Request routing and agent orchestration.

pub mod routing;
pub mod workflow;

pub use workflow::Orchestrator;
