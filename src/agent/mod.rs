//! Agents and the reasoning service they run against.
//!
//! This module provides the agent registry, the persona role texts, the
//! invoker that turns a role plus context into a result, and the
//! OpenAI-compatible client used in production.

pub mod invoker;
pub mod openai;
pub mod prompts;
pub mod registry;

#[cfg(test)]
pub mod testing;

pub use invoker::AgentInvoker;
pub use openai::{ClientConfig, OpenAiClient};
pub use registry::AgentRegistry;
