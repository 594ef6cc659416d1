//! Data models for the intelligence platform.
//!
//! This module contains the core data structures shared by the fact store,
//! the agent layer, the orchestrator and the HTTP API: market metrics,
//! agent identities and the per-request workflow result.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::RegistryError;

/// Metrics for a single tracked brand in one (country, period).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandMetrics {
    /// Value share in percent.
    pub share: f64,
    /// Period-over-period share change in percentage points.
    pub share_change: f64,
    /// Volume sold, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
    /// Period-over-period volume change in percent, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_change: Option<f64>,
}

/// Category-level totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotals {
    pub total_value: u64,
    pub total_volume: u64,
    pub growth: f64,
}

/// Channel-level share and growth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelMetrics {
    pub share: f64,
    pub growth: f64,
}

/// The per-(country, period) bundle of brand, category and channel metrics.
///
/// Missing entries are absent, never zero-filled. The default value is the
/// empty set used when the fact store has nothing for a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    #[serde(default)]
    pub brands: BTreeMap<String, BrandMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryTotals>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub channels: BTreeMap<String, ChannelMetrics>,
}

impl MetricSet {
    /// Returns true if the set carries no metrics at all.
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty() && self.category.is_none() && self.channels.is_empty()
    }

    /// Returns the metrics for a brand key such as `starbucks`.
    pub fn brand(&self, key: &str) -> Option<&BrandMetrics> {
        self.brands.get(key)
    }
}

/// A country's share history as extracted from the monthly PDF reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalTrend {
    pub name: String,
    #[serde(default)]
    pub periods: Vec<String>,
    #[serde(default)]
    pub share_values: Vec<f64>,
    #[serde(default)]
    pub change_values: Vec<f64>,
}

impl HistoricalTrend {
    /// Latest (share, change) point, if any.
    pub fn latest(&self) -> Option<(f64, f64)> {
        let share = *self.share_values.last()?;
        let change = self.change_values.last().copied().unwrap_or(0.0);
        Some((share, change))
    }
}

/// Identifier of a registered agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgentId {
    #[serde(rename = "dataAnalyst")]
    DataAnalyst,
    #[serde(rename = "competitive")]
    Competitive,
    #[serde(rename = "market")]
    Market,
    #[serde(rename = "seniorDataScientist")]
    SeniorDataScientist,
    #[serde(rename = "mckinseyExpert")]
    McKinseyExpert,
}

impl AgentId {
    pub const ALL: [AgentId; 5] = [
        AgentId::DataAnalyst,
        AgentId::Competitive,
        AgentId::Market,
        AgentId::SeniorDataScientist,
        AgentId::McKinseyExpert,
    ];

    /// The wire identifier, e.g. `dataAnalyst`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentId::DataAnalyst => "dataAnalyst",
            AgentId::Competitive => "competitive",
            AgentId::Market => "market",
            AgentId::SeniorDataScientist => "seniorDataScientist",
            AgentId::McKinseyExpert => "mckinseyExpert",
        }
    }

    /// Whether the agent produces primary analysis or reviews it.
    pub fn capability(&self) -> Capability {
        match self {
            AgentId::DataAnalyst | AgentId::Competitive | AgentId::Market => Capability::Analysis,
            AgentId::SeniorDataScientist | AgentId::McKinseyExpert => Capability::Validation,
        }
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| RegistryError::UnknownAgent(s.to_string()))
    }
}

/// Routing classification of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Analysis,
    Validation,
}

/// A registered agent: identity, display data and its opaque role text.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDescriptor {
    pub id: AgentId,
    pub name: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip)]
    pub role: String,
    pub capability: Capability,
}

/// Outcome of a single agent invocation: a response or a failure, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentOutcome {
    Response(String),
    Error(String),
}

/// The result of invoking one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentResult {
    pub agent: AgentId,
    pub agent_name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(flatten)]
    pub outcome: AgentOutcome,
}

impl AgentResult {
    /// Creates a successful result for the given descriptor.
    pub fn success(descriptor: &AgentDescriptor, response: String) -> Self {
        Self {
            agent: descriptor.id,
            agent_name: descriptor.name.clone(),
            icon: descriptor.icon.clone(),
            outcome: AgentOutcome::Response(response),
        }
    }

    /// Creates a failed result for the given descriptor.
    pub fn failure(descriptor: &AgentDescriptor, error: impl Into<String>) -> Self {
        Self {
            agent: descriptor.id,
            agent_name: descriptor.name.clone(),
            icon: descriptor.icon.clone(),
            outcome: AgentOutcome::Error(error.into()),
        }
    }

    /// Creates a failed result for an agent that has no descriptor.
    pub fn unregistered(agent: AgentId, error: impl Into<String>) -> Self {
        Self {
            agent,
            agent_name: agent.as_str().to_string(),
            icon: String::new(),
            outcome: AgentOutcome::Error(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, AgentOutcome::Response(_))
    }

    #[cfg(test)]
    pub fn response(&self) -> Option<&str> {
        match &self.outcome {
            AgentOutcome::Response(text) => Some(text),
            AgentOutcome::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            AgentOutcome::Response(_) => None,
            AgentOutcome::Error(message) => Some(message),
        }
    }

    /// Text handed to downstream validators.
    pub fn text(&self) -> String {
        match &self.outcome {
            AgentOutcome::Response(text) => text.clone(),
            AgentOutcome::Error(message) => {
                format!("Error: Unable to process request. {}", message)
            }
        }
    }
}

/// Validation stage output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResults {
    /// Senior Data Scientist review, present on every request.
    #[serde(rename = "datascientist")]
    pub data_scientist: AgentResult,
    /// Strategy review, only for strategic questions.
    #[serde(rename = "mckinsey")]
    pub strategy: Option<AgentResult>,
}

/// Trace of what the orchestrator did for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowTrace {
    pub agents_invoked: Vec<AgentId>,
    pub analysis_results: Vec<AgentResult>,
    pub validation: ValidationResults,
}

/// Everything produced for a single question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowResult {
    pub question: String,
    pub country: String,
    pub period: String,
    pub data: MetricSet,
    pub data_available: bool,
    pub historical_trends: Option<HistoricalTrend>,
    pub workflow: WorkflowTrace,
}

impl WorkflowResult {
    /// Analysis results followed by the validation results.
    pub fn all_results(&self) -> impl Iterator<Item = &AgentResult> {
        let validation = std::iter::once(&self.workflow.validation.data_scientist)
            .chain(self.workflow.validation.strategy.as_ref());
        self.workflow.analysis_results.iter().chain(validation)
    }

    /// Number of agent invocations that failed, validators included.
    pub fn failed_count(&self) -> usize {
        self.all_results().filter(|r| !r.is_success()).count()
    }
}

/// An `{id, name}` pair for UI selectors.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
}

/// Markets offered by the dashboard.
pub const COUNTRIES: &[CatalogEntry] = &[
    CatalogEntry { id: "germany", name: "Germany" },
    CatalogEntry { id: "uk", name: "United Kingdom" },
    CatalogEntry { id: "italy", name: "Italy" },
    CatalogEntry { id: "spain", name: "Spain" },
    CatalogEntry { id: "netherlands", name: "Netherlands" },
    CatalogEntry { id: "poland", name: "Poland" },
    CatalogEntry { id: "sweden", name: "Sweden" },
    CatalogEntry { id: "austria", name: "Austria" },
    CatalogEntry { id: "switzerland", name: "Switzerland" },
    CatalogEntry { id: "denmark", name: "Denmark" },
    CatalogEntry { id: "norway", name: "Norway" },
    CatalogEntry { id: "greece", name: "Greece" },
    CatalogEntry { id: "croatia", name: "Croatia" },
    CatalogEntry { id: "turkey", name: "Turkey" },
    CatalogEntry { id: "uae", name: "UAE" },
    CatalogEntry { id: "saudi", name: "Saudi Arabia" },
];

/// Reporting periods offered by the dashboard, newest first.
pub const PERIODS: &[CatalogEntry] = &[
    CatalogEntry { id: "p7-2025", name: "P7 2025" },
    CatalogEntry { id: "p6-2025", name: "P6 2025" },
    CatalogEntry { id: "p5-2025", name: "P5 2025" },
    CatalogEntry { id: "p4-2025", name: "P4 2025" },
    CatalogEntry { id: "p3-2025", name: "P3 2025" },
    CatalogEntry { id: "p2-2025", name: "P2 2025" },
    CatalogEntry { id: "p1-2025", name: "P1 2025" },
    CatalogEntry { id: "p13-2024", name: "P13 2024" },
    CatalogEntry { id: "p12-2024", name: "P12 2024" },
    CatalogEntry { id: "p11-2024", name: "P11 2024" },
];

/// Display name for a country key, falling back to the capitalised key.
pub fn country_display_name(key: &str) -> String {
    if let Some(entry) = COUNTRIES.iter().find(|c| c.id == key) {
        return entry.name.to_string();
    }
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> AgentDescriptor {
        AgentDescriptor {
            id: AgentId::Market,
            name: "Market Analyst".to_string(),
            icon: "📈".to_string(),
            color: None,
            role: "role".to_string(),
            capability: Capability::Analysis,
        }
    }

    #[test]
    fn test_agent_id_from_str() {
        assert_eq!("dataAnalyst".parse::<AgentId>().unwrap(), AgentId::DataAnalyst);
        assert_eq!(
            "mckinseyExpert".parse::<AgentId>().unwrap(),
            AgentId::McKinseyExpert
        );
        assert!(matches!(
            "orchestrator".parse::<AgentId>(),
            Err(RegistryError::UnknownAgent(id)) if id == "orchestrator"
        ));
    }

    #[test]
    fn test_agent_capability() {
        assert_eq!(AgentId::Competitive.capability(), Capability::Analysis);
        assert_eq!(
            AgentId::SeniorDataScientist.capability(),
            Capability::Validation
        );
    }

    #[test]
    fn test_agent_result_serializes_one_outcome() {
        let ok = AgentResult::success(&descriptor(), "fine".to_string());
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["agent"], "market");
        assert_eq!(json["agentName"], "Market Analyst");
        assert_eq!(json["response"], "fine");
        assert!(json.get("error").is_none());

        let failed = AgentResult::failure(&descriptor(), "timed out");
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["error"], "timed out");
        assert!(json.get("response").is_none());
    }

    #[test]
    fn test_failed_result_text() {
        let failed = AgentResult::failure(&descriptor(), "boom");
        assert!(!failed.is_success());
        assert_eq!(failed.text(), "Error: Unable to process request. boom");
        assert_eq!(failed.error(), Some("boom"));
    }

    #[test]
    fn test_all_results_include_validators() {
        let result = WorkflowResult {
            question: "Should we invest?".to_string(),
            country: "germany".to_string(),
            period: "p7-2025".to_string(),
            data: MetricSet::default(),
            data_available: false,
            historical_trends: None,
            workflow: WorkflowTrace {
                agents_invoked: vec![AgentId::Market],
                analysis_results: vec![AgentResult::success(&descriptor(), "ok".to_string())],
                validation: ValidationResults {
                    data_scientist: AgentResult::failure(&descriptor(), "boom"),
                    strategy: Some(AgentResult::unregistered(AgentId::McKinseyExpert, "gone")),
                },
            },
        };

        let errors: Vec<_> = result.all_results().filter_map(|r| r.error()).collect();
        assert_eq!(result.all_results().count(), 3);
        assert_eq!(errors, vec!["boom", "gone"]);
        assert_eq!(result.failed_count(), 2);
    }

    #[test]
    fn test_metric_set_empty() {
        assert!(MetricSet::default().is_empty());
        let json = serde_json::to_value(MetricSet::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "brands": {} }));
    }

    #[test]
    fn test_historical_trend_latest() {
        let trend = HistoricalTrend {
            name: "Germany".to_string(),
            periods: vec!["P6 - 2025".to_string(), "P7 - 2025".to_string()],
            share_values: vec![14.1, 15.3],
            change_values: vec![0.4, 2.3],
        };
        assert_eq!(trend.latest(), Some((15.3, 2.3)));
        assert_eq!(HistoricalTrend::default().latest(), None);
    }

    #[test]
    fn test_country_display_name() {
        assert_eq!(country_display_name("uk"), "United Kingdom");
        assert_eq!(country_display_name("france"), "France");
        assert_eq!(country_display_name(""), "");
    }
}
