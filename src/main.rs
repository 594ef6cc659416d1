//! STARLA - multi-agent RTD market intelligence
//!
//! Answers natural-language questions about ready-to-drink coffee market
//! data by routing them to specialist agents and validating their answers.
//! Runs as an HTTP API or as a one-shot CLI.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (config, startup, bad arguments, etc.)
//!   2 - `ask` completed but at least one agent failed

mod agent;
mod cli;
mod commentary;
mod config;
mod error;
mod facts;
mod insights;
mod models;
mod orchestrator;
mod report;
mod resolver;
mod server;

use anyhow::{Context, Result};
use cli::{Args, Command, CommentaryFormat, OutputFormat};
use commentary::Section;
use config::{Config, CONFIG_FILE};
use facts::{FactStore, TrendStore};
use indicatif::{ProgressBar, ProgressStyle};
use models::{COUNTRIES, PERIODS};
use orchestrator::Orchestrator;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // No logging needed to write a config file
    if let Command::InitConfig = args.command {
        return handle_init_config();
    }

    // Config decides the log level, so it loads before the subscriber
    let (mut config, config_source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);
    if let Err(e) = config.validate() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    init_logging(config.log_level(&args));

    info!("STARLA v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {}", config_source);
    debug!("Arguments: {:?}", args);

    match run(args, config).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle `init-config`: write a default .starla.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to customize the model, server address and data files.");
    Ok(())
}

fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Dispatch the subcommand. Returns the process exit code.
async fn run(args: Args, config: Config) -> Result<i32> {
    match args.command {
        Command::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let state = server::ServerState {
                orchestrator: build_orchestrator(&config)?,
                default_country: config.data.default_country.clone(),
                default_period: config.data.default_period.clone(),
            };
            server::run_server(state, &host, port).await?;
            Ok(0)
        }
        Command::Ask {
            question,
            country,
            period,
            format,
            output,
        } => {
            let country = country.unwrap_or_else(|| config.data.default_country.clone());
            let period = period.unwrap_or_else(|| config.data.default_period.clone());
            handle_ask(
                &config, &question, &country, &period, format, output, args.quiet,
            )
            .await
        }
        Command::Commentary {
            section,
            period,
            live,
            format,
            output,
        } => {
            let period = period.unwrap_or_else(|| config.data.default_period.clone());
            let sections = match section {
                Some(section) => vec![section],
                None => Section::ALL.to_vec(),
            };
            handle_commentary(&config, &period, &sections, live, format, output, args.quiet)
                .await?;
            Ok(0)
        }
        Command::Countries => {
            handle_countries(&config)?;
            Ok(0)
        }
        Command::InitConfig => {
            handle_init_config()?;
            Ok(0)
        }
    }
}

/// Load configuration from file or use defaults.
///
/// Runs before logging is installed; returns where the config came from.
fn load_config(args: &Args) -> Result<(Config, String)> {
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, config_path.display().to_string()));
    }

    match Config::load_default() {
        Ok(Some(config)) => Ok((config, CONFIG_FILE.to_string())),
        Ok(None) => Ok((Config::default(), "built-in defaults".to_string())),
        Err(e) => {
            eprintln!("⚠️  Failed to load config: {:#}", e);
            Ok((Config::default(), "built-in defaults".to_string()))
        }
    }
}

fn load_facts(config: &Config) -> Result<FactStore> {
    match config.data.seed_path {
        Some(ref path) => {
            info!("Loading seed data from: {}", path.display());
            FactStore::load(path)
        }
        None => FactStore::builtin(),
    }
}

/// Wire the stores, registry and reasoning client into an orchestrator.
fn build_orchestrator(config: &Config) -> Result<Orchestrator> {
    let facts = load_facts(config)?;
    let trends = TrendStore::load(&config.data.extracted_data)?;
    info!("Seed data for: {}", facts.countries().join(", "));
    if !trends.is_empty() {
        info!("Trend data for: {}", trends.countries().join(", "));
    }

    let client = agent::OpenAiClient::new(config.client_config())?;
    if !client.has_api_key() {
        warn!(
            "{} is not set; every agent call will fail until it is",
            config.model.api_key_env
        );
    }

    let invoker = agent::AgentInvoker::new(
        Arc::new(client),
        Duration::from_secs(config.model.timeout_seconds),
    );

    Ok(Orchestrator::new(
        Arc::new(facts),
        Arc::new(trends),
        Arc::new(agent::AgentRegistry::standard()),
        invoker,
    ))
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Write to a file, or stdout when no path is given.
fn emit(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write output to {}", path.display())),
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}

async fn handle_ask(
    config: &Config,
    question: &str,
    country: &str,
    period: &str,
    format: OutputFormat,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<i32> {
    let start_time = Instant::now();
    let orchestrator = build_orchestrator(config)?;

    let progress = (!quiet).then(|| spinner(format!("Consulting agents ({})", config.model.name)));

    let result = orchestrator.run(question, country, period).await;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    let result = result?;

    let rendered = match format {
        OutputFormat::Markdown => report::generate_markdown_report(&result),
        OutputFormat::Json => report::generate_json_report(&result)?,
    };
    emit(output.as_deref(), &rendered)?;

    let failed = result.failed_count();
    if !quiet {
        eprintln!(
            "\n📊 {} agents invoked, {} failed, {:.1}s",
            result.workflow.agents_invoked.len(),
            failed,
            start_time.elapsed().as_secs_f64()
        );
        if let Some(ref path) = output {
            eprintln!("✅ Report saved to: {}", path.display());
        }
    }

    if failed > 0 {
        for agent_result in result.all_results() {
            if let Some(message) = agent_result.error() {
                warn!("{} failed: {}", agent_result.agent_name, message);
            }
        }
        return Ok(2);
    }
    Ok(0)
}

async fn handle_commentary(
    config: &Config,
    period: &str,
    sections: &[Section],
    live: bool,
    format: CommentaryFormat,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let commentary = if live {
        let orchestrator = build_orchestrator(config)?;
        let total: usize = sections.iter().map(|s| s.questions().len()).sum();

        let pb = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total as u64)
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let commentary = commentary::generate_live(
            &orchestrator,
            &config.data.default_country,
            period,
            sections,
            |answer| {
                pb.set_message(answer.id);
                pb.inc(1);
            },
        )
        .await;
        pb.finish_with_message("Commentary complete");
        commentary
    } else {
        commentary::generate_offline(period, sections)
    };

    let rendered = match format {
        CommentaryFormat::Text => report::generate_text_commentary(&commentary),
        CommentaryFormat::Json => report::generate_json_commentary(&commentary)?,
    };

    // A directory gets the conventional file name
    let output = output.map(|path| {
        if path.is_dir() {
            path.join(report::commentary_file_name(&commentary))
        } else {
            path
        }
    });
    emit(output.as_deref(), &rendered)?;

    if let (Some(path), false) = (output, quiet) {
        eprintln!("✅ Commentary saved to: {}", path.display());
    }
    Ok(())
}

fn handle_countries(config: &Config) -> Result<()> {
    let facts = load_facts(config)?;

    println!("Countries:");
    for entry in COUNTRIES {
        let periods = facts.periods_for(entry.id);
        if periods.is_empty() {
            println!("  {:<12} {}", entry.id, entry.name);
        } else {
            println!("  {:<12} {:<16} data: {}", entry.id, entry.name, periods.join(", "));
        }
    }

    println!("\nPeriods:");
    for entry in PERIODS {
        println!("  {:<12} {}", entry.id, entry.name);
    }
    Ok(())
}
