//! In-memory reasoning service for tests.

use crate::agent::invoker::ReasoningService;
use crate::agent::AgentRegistry;
use crate::error::ServiceError;
use crate::models::AgentId;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub agent: Option<AgentId>,
    pub payload: String,
}

/// Answers `"<agentId> response"` for each standard agent role, with
/// optional per-agent failures and delays.
pub struct ScriptedService {
    roles: HashMap<String, AgentId>,
    failing: HashSet<AgentId>,
    delays: HashMap<AgentId, Duration>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        let roles = AgentRegistry::standard()
            .descriptors()
            .into_iter()
            .map(|d| (d.role.clone(), d.id))
            .collect();

        Self {
            roles,
            failing: HashSet::new(),
            delays: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(mut self, agent: AgentId) -> Self {
        self.failing.insert(agent);
        self
    }

    pub fn delayed(mut self, agent: AgentId, delay: Duration) -> Self {
        self.delays.insert(agent, delay);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, agent: AgentId) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.agent == Some(agent))
            .collect()
    }
}

#[async_trait]
impl ReasoningService for ScriptedService {
    async fn complete(&self, system_role: &str, user_payload: &str) -> Result<String, ServiceError> {
        let agent = self.roles.get(system_role).copied();
        self.calls.lock().unwrap().push(RecordedCall {
            agent,
            payload: user_payload.to_string(),
        });

        let Some(agent) = agent else {
            return Ok("unscripted response".to_string());
        };

        if let Some(delay) = self.delays.get(&agent) {
            tokio::time::sleep(*delay).await;
        }

        if self.failing.contains(&agent) {
            return Err(ServiceError::Api {
                status: 503,
                body: "service unavailable".to_string(),
            });
        }

        Ok(format!("{} response", agent))
    }
}
