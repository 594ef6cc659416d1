//! Markdown report generation.
//!
//! This module renders a workflow result as a Markdown report: the
//! resolved context, the metrics used, each agent's raw output and the
//! validation verdicts.

use crate::models::{
    country_display_name, AgentOutcome, AgentResult, MetricSet, WorkflowResult,
};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(result: &WorkflowResult) -> String {
    let mut output = String::new();

    output.push_str("# STARLA Intelligence Report\n\n");
    output.push_str(&generate_context_section(result));
    output.push_str(&generate_metrics_section(&result.data));
    output.push_str(&generate_analysis_section(result));
    output.push_str(&generate_validation_section(result));
    output.push_str(&generate_footer());

    output
}

/// Generate the context section.
fn generate_context_section(result: &WorkflowResult) -> String {
    let mut section = String::new();

    section.push_str("## Context\n\n");
    section.push_str(&format!("- **Question:** {}\n", result.question));
    section.push_str(&format!(
        "- **Country:** {}\n",
        country_display_name(&result.country)
    ));
    section.push_str(&format!("- **Period:** {}\n", result.period));
    section.push_str(&format!(
        "- **Data:** {}\n",
        if result.data_available {
            "available"
        } else {
            "not available in current STARLA reports"
        }
    ));
    let agents: Vec<&str> = result
        .workflow
        .agents_invoked
        .iter()
        .map(|a| a.as_str())
        .collect();
    section.push_str(&format!("- **Agents Invoked:** {}\n", agents.join(", ")));
    if let Some(trend) = &result.historical_trends {
        if let Some((share, change)) = trend.latest() {
            section.push_str(&format!(
                "- **Latest Extracted Share:** {}% ({:+}pp)\n",
                share, change
            ));
        }
    }
    section.push('\n');

    section
}

/// Generate the metrics tables.
fn generate_metrics_section(data: &MetricSet) -> String {
    if data.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Metrics\n\n");

    if !data.brands.is_empty() {
        section.push_str("### Brands\n\n");
        section.push_str("| Brand | Share | Change | Volume | Volume Change |\n");
        section.push_str("|:---|:---:|:---:|:---:|:---:|\n");

        // Largest share first
        let mut brands: Vec<_> = data.brands.iter().collect();
        brands.sort_by(|a, b| b.1.share.total_cmp(&a.1.share));

        for (name, m) in brands {
            section.push_str(&format!(
                "| {} | {}% | {:+}pp | {} | {} |\n",
                name,
                m.share,
                m.share_change,
                m.volume.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string()),
                m.volume_change
                    .map(|v| format!("{:+}%", v))
                    .unwrap_or_else(|| "-".to_string()),
            ));
        }
        section.push('\n');
    }

    if let Some(category) = &data.category {
        section.push_str("### Category\n\n");
        section.push_str(&format!("- **Total Value:** {}\n", category.total_value));
        section.push_str(&format!("- **Total Volume:** {}\n", category.total_volume));
        section.push_str(&format!("- **Growth:** {:+}%\n\n", category.growth));
    }

    if !data.channels.is_empty() {
        section.push_str("### Channels\n\n");
        section.push_str("| Channel | Share | Growth |\n");
        section.push_str("|:---|:---:|:---:|\n");
        for (name, c) in &data.channels {
            section.push_str(&format!("| {} | {}% | {:+}% |\n", name, c.share, c.growth));
        }
        section.push('\n');
    }

    section
}

/// Generate one block per analysis agent.
fn generate_analysis_section(result: &WorkflowResult) -> String {
    let mut section = String::new();

    section.push_str("## Analysis\n\n");
    for agent_result in &result.workflow.analysis_results {
        section.push_str(&generate_agent_block(agent_result));
    }

    section
}

fn generate_validation_section(result: &WorkflowResult) -> String {
    let mut section = String::new();

    section.push_str("## Validation\n\n");
    section.push_str(&generate_agent_block(
        &result.workflow.validation.data_scientist,
    ));
    match &result.workflow.validation.strategy {
        Some(strategy) => section.push_str(&generate_agent_block(strategy)),
        None => section.push_str("*Strategy review not required for this question.*\n\n"),
    }

    section
}

/// Generate a single agent block.
fn generate_agent_block(result: &AgentResult) -> String {
    let mut block = String::new();

    block.push_str(&format!("### {} {}\n\n", result.icon, result.agent_name));
    match &result.outcome {
        AgentOutcome::Response(text) => {
            block.push_str(text);
            block.push_str("\n\n");
        }
        AgentOutcome::Error(message) => {
            block.push_str(&format!("> ⚠️ **Failed:** {}\n\n", message));
        }
    }

    block
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by STARLA Intelligence Platform, powered by OptiaData*\n"
        .to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(result: &WorkflowResult) -> Result<String> {
    serde_json::to_string_pretty(result).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::FactStore;
    use crate::models::{
        AgentDescriptor, AgentId, ValidationResults, WorkflowTrace,
    };

    fn descriptor(id: AgentId, name: &str) -> AgentDescriptor {
        AgentDescriptor {
            id,
            name: name.to_string(),
            icon: "*".to_string(),
            color: None,
            role: String::new(),
            capability: id.capability(),
        }
    }

    fn create_test_result(data: MetricSet) -> WorkflowResult {
        WorkflowResult {
            question: "How is Starbucks performing against Monster in Germany?".to_string(),
            country: "germany".to_string(),
            period: "p7-2025".to_string(),
            data_available: !data.is_empty(),
            data,
            historical_trends: None,
            workflow: WorkflowTrace {
                agents_invoked: vec![AgentId::DataAnalyst, AgentId::Competitive],
                analysis_results: vec![
                    AgentResult::success(
                        &descriptor(AgentId::DataAnalyst, "Data Analyst"),
                        "Starbucks share is 15.3%".to_string(),
                    ),
                    AgentResult::failure(
                        &descriptor(AgentId::Competitive, "Competitive Intelligence"),
                        "Request timed out after 30s",
                    ),
                ],
                validation: ValidationResults {
                    data_scientist: AgentResult::success(
                        &descriptor(AgentId::SeniorDataScientist, "Senior Data Scientist"),
                        "validated".to_string(),
                    ),
                    strategy: None,
                },
            },
        }
    }

    #[test]
    fn test_generate_markdown_report() {
        let store = FactStore::builtin().unwrap();
        let data = store.lookup("germany", "p7-2025").cloned().unwrap();
        let markdown = generate_markdown_report(&create_test_result(data));

        assert!(markdown.contains("# STARLA Intelligence Report"));
        assert!(markdown.contains("- **Country:** Germany"));
        assert!(markdown.contains("- **Agents Invoked:** dataAnalyst, competitive"));
        assert!(markdown.contains("| monster | 22.1% | -0.5pp |"));
        assert!(markdown.contains("| convenience | 42% | +12% |"));
        assert!(markdown.contains("Starbucks share is 15.3%"));
        assert!(markdown.contains("**Failed:** Request timed out after 30s"));
        assert!(markdown.contains("Strategy review not required"));
    }

    #[test]
    fn test_generate_markdown_without_data() {
        let markdown = generate_markdown_report(&create_test_result(MetricSet::default()));
        assert!(markdown.contains("not available in current STARLA reports"));
        assert!(!markdown.contains("## Metrics"));
    }

    #[test]
    fn test_agent_block_header() {
        let block = generate_agent_block(&AgentResult::success(
            &descriptor(AgentId::McKinseyExpert, "McKinsey Expert Partner"),
            "Prioritise convenience".to_string(),
        ));
        assert!(block.starts_with("### * McKinsey Expert Partner"));
        assert!(block.contains("Prioritise convenience"));
    }

    #[test]
    fn test_generate_json_report() {
        let json = generate_json_report(&create_test_result(MetricSet::default())).unwrap();

        assert!(json.contains("\"agentsInvoked\""));
        assert!(json.contains("\"analysisResults\""));
        assert!(json.contains("\"datascientist\""));
        assert!(json.contains("\"mckinsey\": null"));
    }
}
