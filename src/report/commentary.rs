//! Plain-text rendering of the monthly commentary.

use crate::commentary::{period_label, Commentary};
use anyhow::Result;
use chrono::Datelike;

const RULE: &str = "========================================";
const SUBRULE: &str = "----------------------------------------";

/// Render the commentary as the downloadable text document.
pub fn generate_text_commentary(commentary: &Commentary) -> String {
    let mut out = String::new();

    out.push_str("STARLA RTD MONTHLY COMMENTARY\n");
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("Period: {}\n", period_label(&commentary.period)));
    out.push_str(&format!(
        "Generated: {}\n",
        commentary.generated.format("%Y-%m-%d")
    ));
    out.push_str("Powered by OptiaData\n");
    out.push_str(RULE);
    out.push_str("\n\n");

    for section in &commentary.sections {
        out.push_str(section.title);
        out.push('\n');
        out.push_str(SUBRULE);
        out.push('\n');

        for answer in &section.answers {
            out.push_str(&format!("\nQ: {}\nA: {}\n", answer.question, answer.answer));
        }
        out.push('\n');
    }

    out.push_str(RULE);
    out.push('\n');
    out.push_str("VALIDATION\n");
    out.push_str("✓ Reviewed by Sr Data Scientist\n");
    out.push_str("✓ Approved by McKinsey Expert Partner\n");
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!(
        "© {} OptiaData. Confidential.\n",
        commentary.generated.year()
    ));

    out
}

pub fn generate_json_commentary(commentary: &Commentary) -> Result<String> {
    serde_json::to_string_pretty(commentary).map_err(Into::into)
}

/// Suggested file name, e.g. `STARLA_Monthly_Commentary_P7_2025_2025-08-01.txt`.
pub fn commentary_file_name(commentary: &Commentary) -> String {
    format!(
        "STARLA_Monthly_Commentary_{}_{}.txt",
        period_label(&commentary.period).replace(' ', "_"),
        commentary.generated.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commentary::{generate_offline, Section};
    use chrono::NaiveDate;

    fn fixed_commentary() -> Commentary {
        let mut commentary = generate_offline("p7-2025", &[Section::EmeaExTurkey]);
        commentary.generated = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        commentary
    }

    #[test]
    fn test_generate_text_commentary() {
        let text = generate_text_commentary(&fixed_commentary());

        assert!(text.starts_with("STARLA RTD MONTHLY COMMENTARY\n"));
        assert!(text.contains("Period: P7 2025\n"));
        assert!(text.contains("Generated: 2025-08-01\n"));
        assert!(text.contains("TOTAL EMEA (EXCL. TURKEY)\n"));
        assert!(text.contains(
            "Q: What is the total Starbucks (Arla) in value, volume – MAT, L12wks, L4wks?\nA: Starbucks (ex-Turkey): MAT €467.2m"
        ));
        assert!(!text.contains("COUNTRY LEVEL ANALYSIS"));
        assert!(text.ends_with("© 2025 OptiaData. Confidential.\n"));
    }

    #[test]
    fn test_commentary_file_name() {
        assert_eq!(
            commentary_file_name(&fixed_commentary()),
            "STARLA_Monthly_Commentary_P7_2025_2025-08-01.txt"
        );
    }

    #[test]
    fn test_generate_json_commentary() {
        let json = generate_json_commentary(&fixed_commentary()).unwrap();
        assert!(json.contains("\"section\": \"emea-ex-turkey\""));
        assert!(json.contains("\"generated\": \"2025-08-01\""));
    }
}
