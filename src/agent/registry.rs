//! The fixed set of named agents.

use crate::agent::prompts::{
    COMPETITIVE_PROMPT, DATA_ANALYST_PROMPT, MARKET_PROMPT, MCKINSEY_EXPERT_PROMPT,
    SENIOR_DATA_SCIENTIST_PROMPT,
};
use crate::error::RegistryError;
use crate::models::{AgentDescriptor, AgentId};
use std::collections::HashMap;

/// Read-only lookup from agent id to descriptor.
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    agents: HashMap<AgentId, AgentDescriptor>,
}

impl AgentRegistry {
    /// The five production agents.
    pub fn standard() -> Self {
        let agents = AgentId::ALL.into_iter().map(standard_descriptor).collect();
        Self::with_agents(agents)
    }

    /// A registry holding exactly the given descriptors.
    pub fn with_agents(agents: Vec<AgentDescriptor>) -> Self {
        Self {
            agents: agents.into_iter().map(|d| (d.id, d)).collect(),
        }
    }

    pub fn describe(&self, id: AgentId) -> Result<&AgentDescriptor, RegistryError> {
        self.agents
            .get(&id)
            .ok_or_else(|| RegistryError::UnknownAgent(id.as_str().to_string()))
    }

    /// Descriptors in registration order of `AgentId::ALL`.
    #[cfg(test)]
    pub fn descriptors(&self) -> Vec<&AgentDescriptor> {
        AgentId::ALL
            .iter()
            .filter_map(|id| self.agents.get(id))
            .collect()
    }
}

fn standard_descriptor(id: AgentId) -> AgentDescriptor {
    let (name, icon, color, role) = match id {
        AgentId::DataAnalyst => ("Data Analyst", "📊", "#3B82F6", DATA_ANALYST_PROMPT),
        AgentId::Competitive => (
            "Competitive Intelligence",
            "⚔️",
            "#F97316",
            COMPETITIVE_PROMPT,
        ),
        AgentId::Market => ("Market Analyst", "📈", "#8B5CF6", MARKET_PROMPT),
        AgentId::SeniorDataScientist => (
            "Senior Data Scientist",
            "🔬",
            "#10B981",
            SENIOR_DATA_SCIENTIST_PROMPT,
        ),
        AgentId::McKinseyExpert => (
            "McKinsey Expert Partner",
            "💼",
            "#EAB308",
            MCKINSEY_EXPERT_PROMPT,
        ),
    };

    AgentDescriptor {
        id,
        name: name.to_string(),
        icon: icon.to_string(),
        color: Some(color.to_string()),
        role: role.to_string(),
        capability: id.capability(),
    }
}
