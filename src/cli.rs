//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commentary::Section;

/// STARLA Intelligence Platform - multi-agent market intelligence
///
/// Ask natural-language questions about RTD market data; specialist
/// agents answer and validators review the answers.
///
/// Examples:
///   starla serve --port 3000
///   starla ask "How is Starbucks performing against Monster in Germany?"
///   starla ask "What should we invest in next quarter?" --format json
///   starla commentary --section emea --period p7-2025
///   starla init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    ///
    /// If not specified, looks for .starla.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Model to use for all agents
    #[arg(long, env = "STARLA_MODEL", global = true)]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, value_name = "URL", env = "STARLA_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Per-agent request timeout in seconds
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP API
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
    },

    /// Ask one question and print the report
    Ask {
        /// The question, in plain language
        question: String,

        /// Country to use when the question names none
        #[arg(long)]
        country: Option<String>,

        /// Reporting period, e.g. p7-2025
        #[arg(long)]
        period: Option<String>,

        /// Output format (markdown, json)
        #[arg(long, default_value = "markdown", value_name = "FORMAT")]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Generate the monthly commentary document
    Commentary {
        /// Only generate one question set
        #[arg(long, value_enum)]
        section: Option<Section>,

        /// Reporting period, e.g. p7-2025
        #[arg(long)]
        period: Option<String>,

        /// Answer each question with the agent workflow instead of canned answers
        #[arg(long)]
        live: bool,

        /// Output format (text, json)
        #[arg(long, default_value = "text", value_name = "FORMAT")]
        format: CommentaryFormat,

        /// Write the commentary to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List known countries and periods
    Countries,

    /// Generate a default .starla.toml configuration file
    InitConfig,
}

/// Output format for workflow reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

/// Output format for the monthly commentary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CommentaryFormat {
    /// Plain text document (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref api_url) = self.api_url {
            if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
                return Err("API URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if self.timeout == Some(0) {
            return Err("Timeout must be at least 1 second".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Command::Ask { ref question, .. } = self.command {
            if question.trim().is_empty() {
                return Err("Question is required".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
