//! Report rendering for workflow results and the monthly commentary.

pub mod commentary;
pub mod generator;

pub use commentary::{commentary_file_name, generate_json_commentary, generate_text_commentary};
pub use generator::{generate_json_report, generate_markdown_report};
