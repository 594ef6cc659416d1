//! The multi-agent workflow: resolve context, fan out analysis, then
//! validate sequentially.

use crate::agent::{AgentInvoker, AgentRegistry};
use crate::error::WorkflowError;
use crate::facts::{FactStore, TrendStore};
use crate::models::{
    AgentId, AgentResult, HistoricalTrend, MetricSet, ValidationResults, WorkflowResult,
    WorkflowTrace,
};
use crate::orchestrator::routing;
use crate::resolver;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Context handed to every analysis agent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowContext {
    pub country: String,
    pub period: String,
    pub data: MetricSet,
    pub data_available: bool,
    pub historical_trends: Option<HistoricalTrend>,
    pub available_countries: Vec<String>,
    pub available_periods: Vec<String>,
}

/// Analysis context plus the analysis outputs, handed to validators.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationContext<'a> {
    #[serde(flatten)]
    base: &'a WorkflowContext,
    analysis_results: Vec<String>,
}

pub struct Orchestrator {
    facts: Arc<FactStore>,
    trends: Arc<TrendStore>,
    registry: Arc<AgentRegistry>,
    invoker: AgentInvoker,
}

impl Orchestrator {
    pub fn new(
        facts: Arc<FactStore>,
        trends: Arc<TrendStore>,
        registry: Arc<AgentRegistry>,
        invoker: AgentInvoker,
    ) -> Self {
        Self {
            facts,
            trends,
            registry,
            invoker,
        }
    }

    pub fn facts(&self) -> &FactStore {
        &self.facts
    }

    /// Run the full workflow for one question.
    ///
    /// Only a blank question fails; agent failures are recorded in the
    /// returned result.
    pub async fn run(
        &self,
        question: &str,
        country: &str,
        period: &str,
    ) -> Result<WorkflowResult, WorkflowError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(WorkflowError::MissingQuestion);
        }

        let context = self.build_context(question, country, period);
        let plan = routing::plan(question);
        debug!(
            "Routing: agents={:?} rules={:?} strategy_review={}",
            plan.agents, plan.matched_rules, plan.strategy_review
        );

        // Fan out; each invocation settles on its own.
        let analysis_results = join_all(
            plan.agents
                .iter()
                .map(|&agent| self.invoke(agent, &context, question)),
        )
        .await;

        let analysis_texts: Vec<String> = analysis_results.iter().map(AgentResult::text).collect();
        let joined = analysis_texts.join("\n\n");
        let validation_context = ValidationContext {
            base: &context,
            analysis_results: analysis_texts,
        };

        let data_scientist = self
            .invoke(
                AgentId::SeniorDataScientist,
                &validation_context,
                &format!(
                    "Validate these insights for accuracy and statistical rigor:\n{}",
                    joined
                ),
            )
            .await;

        let strategy = if plan.strategy_review {
            let prompt = format!(
                "Review these strategic insights and recommendations:\n{}\n\nData Scientist Validation: {}",
                joined,
                data_scientist.text()
            );
            Some(
                self.invoke(AgentId::McKinseyExpert, &validation_context, &prompt)
                    .await,
            )
        } else {
            None
        };

        let result = WorkflowResult {
            question: question.to_string(),
            country: context.country,
            period: context.period,
            data: context.data,
            data_available: context.data_available,
            historical_trends: context.historical_trends,
            workflow: WorkflowTrace {
                agents_invoked: plan.agents,
                analysis_results,
                validation: ValidationResults {
                    data_scientist,
                    strategy,
                },
            },
        };

        info!(
            "Workflow complete for {}/{}: {} analysis agents, {} failed",
            result.country,
            result.period,
            result.workflow.agents_invoked.len(),
            result.failed_count()
        );

        Ok(result)
    }

    /// Resolve country and period, then read the fact and trend stores.
    pub fn build_context(&self, question: &str, country: &str, period: &str) -> WorkflowContext {
        let resolved = resolver::resolve_country(question, country);
        if resolver::detect_country(question).is_some() {
            info!("Auto-detected country: {}", resolved);
        }
        let period = resolver::normalize_period(period);

        let metrics = self.facts.lookup(&resolved, &period).cloned();
        if metrics.is_none() {
            debug!("No metrics for {}/{}", resolved, period);
        }

        WorkflowContext {
            data_available: metrics.is_some(),
            data: metrics.unwrap_or_default(),
            historical_trends: self.trends.get(&resolved).cloned(),
            available_countries: self.trends.countries(),
            available_periods: self.facts.periods_for(&resolved),
            country: resolved,
            period,
        }
    }

    async fn invoke<C>(&self, agent: AgentId, context: &C, prompt: &str) -> AgentResult
    where
        C: Serialize + ?Sized,
    {
        match self.registry.describe(agent) {
            Ok(descriptor) => self.invoker.invoke(descriptor, context, prompt).await,
            Err(e) => AgentResult::unregistered(agent, e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::testing::ScriptedService;
    use crate::models::{AgentOutcome, Capability};
    use std::time::{Duration, Instant};

    fn orchestrator_with(service: Arc<ScriptedService>) -> Orchestrator {
        orchestrator_with_registry(service, AgentRegistry::standard())
    }

    fn orchestrator_with_registry(
        service: Arc<ScriptedService>,
        registry: AgentRegistry,
    ) -> Orchestrator {
        let trends = TrendStore::from_json(
            r#"{"germany": {"name": "Germany", "periods": ["P7 - 2025"], "share_values": [15.3], "change_values": [2.3]}}"#,
        )
        .unwrap();
        Orchestrator::new(
            Arc::new(FactStore::builtin().unwrap()),
            Arc::new(trends),
            Arc::new(registry),
            AgentInvoker::new(service, Duration::from_secs(5)),
        )
    }

    #[tokio::test]
    async fn test_blank_question_rejected_before_any_call() {
        let service = Arc::new(ScriptedService::new());
        let orchestrator = orchestrator_with(service.clone());

        let err = orchestrator.run("   ", "germany", "p7-2025").await.unwrap_err();

        assert_eq!(err, WorkflowError::MissingQuestion);
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_scenario_competitor_question_in_germany() {
        let service = Arc::new(ScriptedService::new());
        let orchestrator = orchestrator_with(service.clone());

        let result = orchestrator
            .run(
                "How is Starbucks performing against Monster in Germany?",
                "uk",
                "p7-2025",
            )
            .await
            .unwrap();

        assert_eq!(result.country, "germany");
        assert!(result.data_available);
        assert_eq!(result.data.brand("starbucks").unwrap().share, 15.3);
        assert_eq!(
            result.workflow.agents_invoked,
            vec![AgentId::DataAnalyst, AgentId::Competitive]
        );
        assert_eq!(
            result.workflow.validation.data_scientist.response(),
            Some("seniorDataScientist response")
        );
        assert!(result.workflow.validation.strategy.is_none());
        assert!(service.calls_for(AgentId::McKinseyExpert).is_empty());
        assert_eq!(result.historical_trends.unwrap().name, "Germany");
    }

    #[tokio::test]
    async fn test_scenario_strategic_question() {
        let service = Arc::new(ScriptedService::new());
        let orchestrator = orchestrator_with(service.clone());

        let result = orchestrator
            .run("What should we invest in next quarter?", "germany", "p7-2025")
            .await
            .unwrap();

        assert_eq!(
            result.workflow.agents_invoked,
            vec![AgentId::DataAnalyst, AgentId::Competitive, AgentId::Market]
        );
        assert_eq!(result.workflow.analysis_results.len(), 3);
        assert!(result.workflow.validation.data_scientist.is_success());
        let strategy = result.workflow.validation.strategy.unwrap();
        assert_eq!(strategy.agent, AgentId::McKinseyExpert);

        // The strategy reviewer sees both the analysis and the data scientist's verdict.
        let calls = service.calls_for(AgentId::McKinseyExpert);
        assert_eq!(calls.len(), 1);
        assert!(calls[0].payload.contains("market response"));
        assert!(calls[0]
            .payload
            .contains("Data Scientist Validation: seniorDataScientist response"));
    }

    #[tokio::test]
    async fn test_lookup_miss_still_completes() {
        let service = Arc::new(ScriptedService::new());
        let orchestrator = orchestrator_with(service.clone());

        let result = orchestrator
            .run("Which channel shows growth?", "germany", "p99-1999")
            .await
            .unwrap();

        assert!(!result.data_available);
        assert!(result.data.is_empty());
        assert_eq!(result.workflow.analysis_results.len(), 2);
        assert!(result
            .workflow
            .analysis_results
            .iter()
            .all(AgentResult::is_success));

        let analyst = &service.calls_for(AgentId::DataAnalyst)[0];
        assert!(analyst.payload.contains("\"dataAvailable\": false"));
        assert!(analyst.payload.contains("\"brands\": {}"));
    }

    #[tokio::test]
    async fn test_failed_agent_is_isolated() {
        let service = Arc::new(ScriptedService::new().failing(AgentId::Competitive));
        let orchestrator = orchestrator_with(service.clone());

        let result = orchestrator
            .run("Recommend a plan against Red Bull", "uk", "p7-2025")
            .await
            .unwrap();

        let outcomes: Vec<_> = result
            .workflow
            .analysis_results
            .iter()
            .map(|r| (r.agent, r.is_success()))
            .collect();
        assert_eq!(
            outcomes,
            vec![
                (AgentId::DataAnalyst, true),
                (AgentId::Competitive, false),
                (AgentId::Market, true),
            ]
        );
        assert_eq!(result.failed_count(), 1);

        // Validation still ran, and saw the failure text.
        let scientist = &service.calls_for(AgentId::SeniorDataScientist)[0];
        assert!(scientist
            .payload
            .contains("Error: Unable to process request. Reasoning service error 503"));
        assert!(result.workflow.validation.strategy.is_some());
    }

    #[tokio::test]
    async fn test_failed_data_scientist_does_not_abort_strategy_review() {
        let service = Arc::new(ScriptedService::new().failing(AgentId::SeniorDataScientist));
        let orchestrator = orchestrator_with(service.clone());

        let result = orchestrator
            .run("Is there an opportunity in foodservice?", "germany", "p7-2025")
            .await
            .unwrap();

        assert!(!result.workflow.validation.data_scientist.is_success());
        assert!(result.workflow.validation.strategy.unwrap().is_success());
    }

    #[tokio::test]
    async fn test_unknown_agent_becomes_failed_result() {
        let service = Arc::new(ScriptedService::new());
        let registry = AgentRegistry::with_agents(
            AgentRegistry::standard()
                .descriptors()
                .into_iter()
                .filter(|d| d.id != AgentId::Competitive)
                .cloned()
                .collect(),
        );
        let orchestrator = orchestrator_with_registry(service, registry);

        let result = orchestrator
            .run("How does Costa compare?", "uk", "p7-2025")
            .await
            .unwrap();

        let competitive = &result.workflow.analysis_results[1];
        assert_eq!(competitive.agent, AgentId::Competitive);
        assert_eq!(
            competitive.outcome,
            AgentOutcome::Error("Unknown agent: competitive".to_string())
        );
        assert!(result.workflow.validation.data_scientist.is_success());
    }

    #[tokio::test]
    async fn test_analysis_agents_run_concurrently() {
        let delay = Duration::from_millis(200);
        let service = Arc::new(
            ScriptedService::new()
                .delayed(AgentId::DataAnalyst, delay)
                .delayed(AgentId::Competitive, delay)
                .delayed(AgentId::Market, delay),
        );
        let orchestrator = orchestrator_with(service);

        let started = Instant::now();
        let result = orchestrator
            .run("Recommend a strategy", "germany", "p7-2025")
            .await
            .unwrap();

        assert_eq!(result.workflow.analysis_results.len(), 3);
        assert!(started.elapsed() < delay * 3);
    }

    #[tokio::test]
    async fn test_validators_only_in_validation_stage() {
        let service = Arc::new(ScriptedService::new());
        let orchestrator = orchestrator_with(service);

        let result = orchestrator
            .run("What should we recommend?", "germany", "p7-2025")
            .await
            .unwrap();

        assert!(result
            .workflow
            .agents_invoked
            .iter()
            .all(|a| a.capability() == Capability::Analysis));
    }

    #[test]
    fn test_build_context() {
        let orchestrator = orchestrator_with(Arc::new(ScriptedService::new()));

        let context = orchestrator.build_context("Share in the UK?", "germany", "P7 2025");
        assert_eq!(context.country, "uk");
        assert_eq!(context.period, "p7-2025");
        assert!(context.data_available);
        assert!(context.historical_trends.is_none());
        assert_eq!(context.available_countries, vec!["germany"]);
        assert_eq!(context.available_periods, vec!["p7-2025"]);
    }

    #[test]
    fn test_build_context_finds_uk_trends() {
        let trends = TrendStore::from_json(
            r#"{"unitedkingdom": {"name": "United Kingdom", "periods": ["P7 - 2025"], "share_values": [11.2], "change_values": [-0.4]}}"#,
        )
        .unwrap();
        let orchestrator = Orchestrator::new(
            Arc::new(FactStore::builtin().unwrap()),
            Arc::new(trends),
            Arc::new(AgentRegistry::standard()),
            AgentInvoker::new(Arc::new(ScriptedService::new()), Duration::from_secs(5)),
        );

        let context = orchestrator.build_context("UK share?", "germany", "p7-2025");
        assert_eq!(context.country, "uk");
        assert_eq!(
            context.historical_trends.unwrap().name,
            "United Kingdom"
        );
        assert_eq!(context.available_countries, vec!["uk"]);
    }
}
