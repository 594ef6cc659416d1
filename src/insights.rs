//! Dashboard insight cards derived from a MetricSet.

use crate::models::{country_display_name, MetricSet};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub headline: String,
    pub detail: String,
    pub metric: String,
    pub change: String,
    pub positive: bool,
    pub validations: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationAction {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub id: u32,
    pub priority: &'static str,
    pub title: &'static str,
    pub detail: &'static str,
    pub actions: Vec<RecommendationAction>,
    pub confidence: u8,
    pub validations: Vec<&'static str>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardInsights {
    pub insights: Vec<Insight>,
    pub recommendations: Vec<Recommendation>,
}

/// Signed percentage-point change, e.g. `+2.3pp`.
fn format_change(change: f64) -> String {
    if change > 0.0 {
        format!("+{}pp", change)
    } else {
        format!("{}pp", change)
    }
}

/// Build insight cards for a country. Without Starbucks data there is
/// nothing to report.
pub fn generate(country: &str, metrics: Option<&MetricSet>) -> DashboardInsights {
    let Some(metrics) = metrics else {
        return DashboardInsights::default();
    };
    let Some(starbucks) = metrics.brand("starbucks") else {
        return DashboardInsights::default();
    };

    let gaining = starbucks.share_change > 0.0;
    let volume_growing = starbucks.volume_change.is_some_and(|v| v > 0.0);

    let mut insights = vec![Insight {
        id: 1,
        kind: "market-share",
        headline: format!(
            "Starbucks {} in {}",
            if gaining { "Gains Ground" } else { "Faces Pressure" },
            country_display_name(country)
        ),
        detail: format!(
            "RTD Coffee segment shows {} with {} in volume.",
            if gaining { "strong momentum" } else { "challenges" },
            if volume_growing { "growth" } else { "decline" }
        ),
        metric: format!("{}%", starbucks.share),
        change: format_change(starbucks.share_change),
        positive: gaining,
        validations: vec!["data-scientist", "mckinsey"],
    }];

    if let Some(monster) = metrics.brand("monster") {
        let growing = monster.share_change > 0.0;
        insights.push(Insight {
            id: 2,
            kind: "competitive",
            headline: format!("Monster {} Share", if growing { "Growing" } else { "Losing" }),
            detail: format!(
                "Monster Energy {} in RTD segment with {}pp {}.",
                if growing { "expanding" } else { "contracting" },
                monster.share_change.abs(),
                if growing { "gain" } else { "loss" }
            ),
            metric: format!("{}%", monster.share),
            change: format_change(monster.share_change),
            // A competitor losing share is good news.
            positive: monster.share_change < 0.0,
            validations: vec!["data-scientist"],
        });
    }

    let recommendations = vec![Recommendation {
        id: 1,
        priority: "high",
        title: "Accelerate Convenience Channel Investment",
        detail: "Increase trade marketing spend in convenience channel to capitalize on channel growth.",
        actions: vec![
            RecommendationAction {
                label: "Timeline",
                value: "P8-P10",
            },
            RecommendationAction {
                label: "Investment",
                value: "+20%",
            },
            RecommendationAction {
                label: "Target",
                value: "+2pp share",
            },
        ],
        confidence: 90,
        validations: vec!["data-scientist", "mckinsey"],
    }];

    DashboardInsights {
        insights,
        recommendations,
    }
}
