//! Keyword routing rules.
//!
//! Rules are evaluated top to bottom against the lowercased question.
//! `Append` rules add an agent to the current selection; `Replace` rules
//! discard whatever was selected so far and install a fixed set.

use crate::models::AgentId;

/// What a matching rule does to the current agent selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleEffect {
    Append(AgentId),
    Replace(&'static [AgentId]),
}

/// A named keyword group and its effect on agent selection.
#[derive(Debug, Clone, Copy)]
pub struct RoutingRule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub effect: RuleEffect,
}

impl RoutingRule {
    fn matches(&self, question_lower: &str) -> bool {
        self.keywords.iter().any(|k| question_lower.contains(k))
    }
}

pub const COMPETITOR_KEYWORDS: &[&str] = &["monster", "competitor", "red bull", "costa"];
pub const MARKET_KEYWORDS: &[&str] = &["trend", "growth", "channel", "opportunity"];
pub const STRATEGIC_KEYWORDS: &[&str] = &["recommend", "should", "strategy", "invest"];

/// Extra token that triggers strategy review without changing agent selection.
pub const STRATEGY_REVIEW_EXTRA: &str = "opportunity";

pub const DEFAULT_AGENTS: &[AgentId] = &[AgentId::DataAnalyst];

pub const FULL_ANALYSIS: &[AgentId] = &[AgentId::DataAnalyst, AgentId::Competitive, AgentId::Market];

/// Analysis routing rules in evaluation order.
pub const ANALYSIS_RULES: &[RoutingRule] = &[
    RoutingRule {
        name: "competitor",
        keywords: COMPETITOR_KEYWORDS,
        effect: RuleEffect::Append(AgentId::Competitive),
    },
    RoutingRule {
        name: "market",
        keywords: MARKET_KEYWORDS,
        effect: RuleEffect::Append(AgentId::Market),
    },
    RoutingRule {
        name: "strategic",
        keywords: STRATEGIC_KEYWORDS,
        effect: RuleEffect::Replace(FULL_ANALYSIS),
    },
];

/// Routing decision for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingPlan {
    /// Analysis agents, in invocation order, without duplicates.
    pub agents: Vec<AgentId>,
    /// Names of the rules that matched.
    pub matched_rules: Vec<&'static str>,
    /// Whether the strategy validator runs after the data scientist.
    pub strategy_review: bool,
}

/// Apply a rule list to a question.
pub fn apply_rules(question: &str, rules: &[RoutingRule]) -> (Vec<AgentId>, Vec<&'static str>) {
    let q = question.to_lowercase();
    let mut agents = DEFAULT_AGENTS.to_vec();
    let mut matched = Vec::new();

    for rule in rules.iter().filter(|r| r.matches(&q)) {
        matched.push(rule.name);
        match rule.effect {
            RuleEffect::Append(agent) => {
                if !agents.contains(&agent) {
                    agents.push(agent);
                }
            }
            RuleEffect::Replace(set) => agents = set.to_vec(),
        }
    }

    (agents, matched)
}

/// True if the question matches the strategic keyword predicate.
pub fn is_strategic(question: &str) -> bool {
    let q = question.to_lowercase();
    STRATEGIC_KEYWORDS.iter().any(|k| q.contains(k)) || q.contains(STRATEGY_REVIEW_EXTRA)
}

/// Build the routing plan for a question.
pub fn plan(question: &str) -> RoutingPlan {
    let (agents, matched_rules) = apply_rules(question, ANALYSIS_RULES);
    RoutingPlan {
        agents,
        matched_rules,
        strategy_review: is_strategic(question),
    }
}
