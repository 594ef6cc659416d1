//! Monthly commentary question sets.
//!
//! Each reporting month the same fixed questions are answered for Total
//! EMEA, EMEA excluding Turkey, and at country level. Answers come either
//! from the canned sample table or from the agent workflow.

use crate::orchestrator::Orchestrator;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};

/// A commentary question set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Emea,
    EmeaExTurkey,
    Countries,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Emea, Section::EmeaExTurkey, Section::Countries];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Emea => "TOTAL EMEA ANALYSIS",
            Section::EmeaExTurkey => "TOTAL EMEA (EXCL. TURKEY)",
            Section::Countries => "COUNTRY LEVEL ANALYSIS",
        }
    }

    pub fn questions(&self) -> &'static [Question] {
        match self {
            Section::Emea => EMEA_QUESTIONS,
            Section::EmeaExTurkey => EMEA_EX_TURKEY_QUESTIONS,
            Section::Countries => COUNTRY_QUESTIONS,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub category: &'static str,
    pub question: &'static str,
}

const fn q(id: &'static str, category: &'static str, question: &'static str) -> Question {
    Question {
        id,
        category,
        question,
    }
}

const EMEA_QUESTIONS: &[Question] = &[
    q("emea-q1", "Category Performance", "What is the total RTD coffee in value, volume – MAT, L12wks, L4wks?"),
    q("emea-q2", "Category Growth", "What is the total growth for RTD coffee in value, volume – MAT, L12wks, L4wks?"),
    q("emea-q3", "YoY Comparison", "How has this changed vs this same period last year?"),
    q("emea-q4", "MoM Comparison", "How has this changed vs last month?"),
    q("emea-q5", "Starbucks Performance", "What is the total Starbucks (Arla) in value, volume – MAT, L12wks, L4wks?"),
    q("emea-q6", "Starbucks Growth", "What is the total growth for Starbucks (Arla) in value, volume – MAT, L12wks, L4wks?"),
    q("emea-q7", "Brand Drivers", "Which brands are driving the most growth in the RTD category? – MAT, L12wks, L4wks?"),
    q("emea-q8", "Brand Contribution", "What is the contribution of each brand to total category growth? – MAT, L12wks, L4wks?"),
    q("emea-q9", "Country Performance", "Which countries are showing the highest and lowest growth in RTD coffee sales? – MAT, L12wks, L4wks?"),
    q("emea-q10", "Starbucks vs Market", "How is Starbucks performing in each country compared to the total RTD market? – MAT, L12wks, L4wks?"),
    q("emea-q11", "Share Movement", "Which countries is Starbucks gaining or losing share? – MAT, L12wks, L4wks?"),
    q("emea-q12", "Share Trend", "How is Starbucks value share and share point change trending over time? And how has this changed vs last month?"),
    q("emea-q13", "Competitive Ranking", "How does Starbucks rank in terms of value sales, volume, and share compared to competitors like Nescafé, Emmi, etc.?"),
    q("emea-q14", "Performance Drivers", "What is the impact of in-market drivers (e.g., price, distribution, unit sales) on Starbucks performance?"),
    q("emea-q15", "Format Analysis", "Which product formats are driving the most value? And how has this changed vs MAT, L12wks, L4wks?"),
];

const EMEA_EX_TURKEY_QUESTIONS: &[Question] = &[
    q("exturkey-q1", "Category Performance", "What is the total RTD coffee in value, volume – MAT, L12wks, L4wks?"),
    q("exturkey-q2", "Category Growth", "What is the total growth for RTD coffee in value, volume – MAT, L12wks, L4wks?"),
    q("exturkey-q3", "Starbucks Performance", "What is the total Starbucks (Arla) in value, volume – MAT, L12wks, L4wks?"),
    q("exturkey-q4", "Starbucks Growth", "What is the total growth for Starbucks (Arla) in value, volume – MAT, L12wks, L4wks?"),
    q("exturkey-q5", "Brand Drivers", "Which brands are driving the most growth in the RTD category?"),
    q("exturkey-q6", "Share Movement", "Which countries is Starbucks gaining or losing share?"),
];

const COUNTRY_QUESTIONS: &[Question] = &[
    q("country-q1", "Value Sales", "What is Starbucks total value sales and how has it changed MAT, L12wks, L4wks?"),
    q("country-q2", "Share vs Competitors", "How does Starbucks market share change compare to competitors?"),
    q("country-q3", "Relative Growth", "Is Starbucks growing faster or slower than the total RTD coffee market?"),
    q("country-q4", "Platform Performance", "Which Starbucks platforms are driving growth or decline? (Chilled Classic, Daily Brew, Energy, Frappuccino, Multiserve, Protein)"),
    q("country-q5", "Distribution", "Which brands are gaining and losing in distribution?"),
];

/// Canned answers used in offline mode.
const SAMPLE_ANSWERS: &[(&str, &str)] = &[
    ("emea-q1", "Total RTD Coffee: MAT €2.16bn (+8.5%), L12wks €578m (+9.2%), L4wks €198m (+7.8%)"),
    ("emea-q2", "Value Growth: MAT +8.5%, L12wks +9.2%, L4wks +7.8%. Volume Growth: MAT +5.2%, L12wks +6.1%, L4wks +4.9%"),
    ("emea-q5", "Starbucks (Arla): MAT €490.8m, L12wks €125.4m, L4wks €49.8m"),
    ("emea-q6", "Starbucks Value Growth: MAT +5.1%, L12wks +3.8%, L4wks +2.2%. Share: MAT 22.7% (-200bps), L12wks 21.7% (-200bps), L4wks 21.5% (-160bps)"),
    ("exturkey-q3", "Starbucks (ex-Turkey): MAT €467.2m, L12wks €121.8m, L4wks €48.3m"),
    ("exturkey-q4", "Value Share: MAT 26.7% (-70bps), L12wks 26.6% (-60bps), L4wks 26.6% (flat vs LY)"),
];

fn sample_answer(question: &Question) -> String {
    SAMPLE_ANSWERS
        .iter()
        .find(|(id, _)| *id == question.id)
        .map(|(_, answer)| answer.to_string())
        .unwrap_or_else(|| {
            format!(
                "Analysis for \"{}\" - Data pending from STARLA PDFs.",
                question.question
            )
        })
}

#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub id: &'static str,
    pub category: &'static str,
    pub question: &'static str,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionCommentary {
    pub section: Section,
    pub title: &'static str,
    pub answers: Vec<Answer>,
}

/// A generated monthly commentary.
#[derive(Debug, Clone, Serialize)]
pub struct Commentary {
    pub period: String,
    pub generated: NaiveDate,
    pub sections: Vec<SectionCommentary>,
}

/// "p7-2025" -> "P7 2025".
pub fn period_label(period: &str) -> String {
    period.to_uppercase().replacen('-', " ", 1)
}

/// Answer every question from the sample table.
pub fn generate_offline(period: &str, sections: &[Section]) -> Commentary {
    let sections = sections
        .iter()
        .map(|&section| SectionCommentary {
            section,
            title: section.title(),
            answers: section
                .questions()
                .iter()
                .map(|q| Answer {
                    id: q.id,
                    category: q.category,
                    question: q.question,
                    answer: sample_answer(q),
                })
                .collect(),
        })
        .collect();

    Commentary {
        period: period.to_string(),
        generated: Local::now().date_naive(),
        sections,
    }
}

/// Answer every question through the agent workflow, one at a time.
///
/// Each answer is the Senior Data Scientist's validated text; a failed
/// validation is recorded in place.
pub async fn generate_live(
    orchestrator: &Orchestrator,
    country: &str,
    period: &str,
    sections: &[Section],
    mut on_answer: impl FnMut(&Answer),
) -> Commentary {
    let mut generated = Vec::with_capacity(sections.len());

    for &section in sections {
        info!("Generating {} commentary", section.title());
        let mut answers = Vec::with_capacity(section.questions().len());

        for q in section.questions() {
            let answer = match orchestrator.run(q.question, country, period).await {
                Ok(result) => result.workflow.validation.data_scientist.text(),
                Err(e) => {
                    warn!("Question {} skipped: {}", q.id, e);
                    format!("Error: {}", e)
                }
            };

            let answer = Answer {
                id: q.id,
                category: q.category,
                question: q.question,
                answer,
            };
            on_answer(&answer);
            answers.push(answer);
        }

        generated.push(SectionCommentary {
            section,
            title: section.title(),
            answers,
        });
    }

    Commentary {
        period: period.to_string(),
        generated: Local::now().date_naive(),
        sections: generated,
    }
}
