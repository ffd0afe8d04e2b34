//! TripPlanner - travel itinerary generator
//!
//! CLI entry point: collects the trip form, runs the pipeline and delivers the
//! result to the terminal, map, PDF, history and email sinks.

use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{CommandFactory, FromArgMatches};
use colored::Colorize;
use eyre::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, error, info};

use tripplanner::cli::{Cli, Command, OutputFormat, PlanArgs, generate_after_help, get_log_path};
use tripplanner::config::Config;
use tripplanner::domain::TripDraft;
use tripplanner::llm::create_client;
use tripplanner::pipeline::{Pipeline, validate};
use tripplanner::prompts::PromptLoader;
use tripplanner::sinks::{Delivery, JsonlHistory, PdfExporter, SmtpMailer, TerminalMap, TerminalPresenter, read_history};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Keys may live in a .env file; a missing file is fine
    let dotenv = dotenvy::dotenv();

    // Build command with dynamic after_help that shows key status and paths
    let cmd = Cli::command().after_help(generate_after_help());
    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;
    match dotenv {
        Ok(path) => debug!(?path, "main: loaded .env"),
        Err(e) => debug!(error = %e, "main: no .env loaded"),
    }

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!("TripPlanner loaded config: provider={} model={}", config.llm.provider, config.llm.model);

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Plan(args)) => {
            debug!("main: matched Plan command");
            cmd_plan(&config, args).await
        }
        Some(Command::History { lines, format }) => {
            debug!(lines, %format, "main: matched History command");
            cmd_history(&config, lines, format)
        }
        None => {
            debug!("main: no command, printing help");
            Cli::command().after_help(generate_after_help()).print_help()?;
            Ok(())
        }
    }
}

/// Ask for the famous-to-offbeat ratio on an interactive terminal
fn prompt_mix_ratio() -> Result<Option<String>> {
    debug!("prompt_mix_ratio: called");
    println!("It seems you want a mix of famous and offbeat places. Could you clarify the ratio? (e.g., 70% famous, 30% offbeat)");

    let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;
    match rl.readline(&format!("{} ", "Ratio (e.g., 70-30):".bright_green())) {
        Ok(line) => Ok(Some(line.trim().to_string())),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            debug!("prompt_mix_ratio: no ratio entered");
            Ok(None)
        }
        Err(e) => Err(eyre::eyre!("Failed to read ratio: {}", e)),
    }
}

/// Fill in the mix ratio when the preferences ask for a mix and none was given
fn complete_draft(mut draft: TripDraft, no_input: bool) -> Result<TripDraft> {
    if draft.wants_mix() && draft.mix_ratio.is_none() && !no_input && std::io::stdin().is_terminal() {
        draft.mix_ratio = prompt_mix_ratio()?;
    }
    Ok(draft)
}

/// Generate an itinerary and deliver it to every configured sink
async fn cmd_plan(config: &Config, args: PlanArgs) -> Result<()> {
    debug!(?args, "cmd_plan: called");
    let draft = complete_draft(args.to_draft(), args.no_input)?;

    // Report form errors before asking for an API key
    if let Err(errors) = validate(draft.clone()) {
        for e in &errors {
            eprintln!("{}", e.to_string().red());
        }
        std::process::exit(1);
    }

    // Resolve email settings up front so a misconfigured relay fails before generation
    let mailer = match &args.email {
        Some(recipient) => {
            let resolved = config.email.resolve().context("Email requested but not configured")?;
            Some((SmtpMailer::new(resolved), recipient.clone()))
        }
        None => None,
    };

    config.validate()?;
    let client = create_client(&config.llm).context("Failed to create generation client")?;
    let project_root = std::env::current_dir()?;
    let pipeline = Pipeline::new(PromptLoader::new(&project_root), client);

    println!("Generating itinerary for {}...", draft.destination.trim());
    let bundle = match pipeline.handle_submit(draft).await {
        Ok(bundle) => bundle,
        Err(e) => {
            error!(error = %e, "cmd_plan: submission failed");
            eprintln!("{}", e.to_string().red());
            std::process::exit(1);
        }
    };

    let mut delivery = Delivery::new(Arc::new(TerminalPresenter::default()), Arc::new(TerminalMap));
    if !args.no_pdf {
        let pdf_path: PathBuf = args.pdf.clone().unwrap_or_else(|| config.storage.pdf_path.clone());
        delivery = delivery.with_export(Arc::new(PdfExporter::default()), pdf_path);
    }
    if !args.no_history {
        delivery = delivery.with_history(Arc::new(JsonlHistory::new(config.storage.history_path.clone())));
    }
    if let Some((mailer, recipient)) = mailer {
        delivery = delivery.with_email(Arc::new(mailer), recipient);
    }

    let report = delivery.deliver(&bundle).await;

    println!();
    if let Some(path) = &report.exported {
        println!("{} Itinerary saved as PDF: {}", "\u{2713}".green(), path.display());
    }
    if report.history_saved {
        println!("{} Itinerary added to history", "\u{2713}".green());
    }
    if let Some(recipient) = &report.emailed {
        println!("{} Itinerary sent to {}", "\u{2713}".green(), recipient);
    }
    for failure in &report.failures {
        eprintln!("{} {} failed: {}", "\u{2717}".red(), failure.sink, failure.error);
    }

    if let Some(feedback) = args.feedback() {
        info!(rating = feedback.rating, comment = %feedback.comment, "cmd_plan: feedback received");
        println!("{} Thank you for your feedback!", "\u{2713}".green());
    }

    if report.email_failure().is_some() {
        std::process::exit(1);
    }
    Ok(())
}

/// Print the most recent itineraries from the history file
fn cmd_history(config: &Config, lines: usize, format: OutputFormat) -> Result<()> {
    debug!(lines, %format, "cmd_history: called");
    let path = &config.storage.history_path;
    let entries = read_history(path).with_context(|| format!("Failed to read history from {}", path.display()))?;

    let start = entries.len().saturating_sub(lines);
    let recent = &entries[start..];

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(recent)?);
        }
        OutputFormat::Text => {
            if recent.is_empty() {
                println!("No itineraries saved yet at: {}", path.display());
                return Ok(());
            }
            for (index, entry) in recent.iter().enumerate() {
                let when = entry
                    .timestamp
                    .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
                    .unwrap_or_else(|| "unknown date".to_string());
                println!("{}", format!("#{} ({})", start + index + 1, when).bold().cyan());
                println!("{}\n", entry.itinerary.trim_end());
            }
        }
    }
    Ok(())
}
