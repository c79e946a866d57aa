//! CLI entrypoint for Debate Arena
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use debate_application::{ConversationLogger, RunDebateInput, RunDebateUseCase};
use debate_domain::DebateSession;
use debate_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, RoutingGateway, export_transcript,
};
use debate_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    if cli.no_color {
        colored::control::set_override(false);
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&cli, &mut config);
    config.validate().context("invalid configuration")?;

    let _log_guard = init_logging(&cli, config.logging.log_dir.as_deref())?;
    info!("Starting Debate Arena");

    let topic = match cli.topic.clone().or_else(|| config.debate.topic.clone()) {
        Some(topic) if !topic.trim().is_empty() => topic,
        _ => bail!("A debate topic is required: pass it as an argument or set [debate] topic"),
    };

    // === Dependency Injection ===
    let gateway = Arc::new(RoutingGateway::from_config(&config.providers));
    info!("Registered providers: {:?}", gateway.provider_kinds());

    let cancellation = CancellationToken::new();
    let mut use_case = RunDebateUseCase::new(gateway).with_cancellation(cancellation.clone());

    if let Some(path) = &config.logging.event_log {
        let logger = JsonlConversationLogger::create(path)
            .with_context(|| format!("cannot create event log {}", path.display()))?;
        info!("Writing debate events to {}", logger.path().display());
        use_case = use_case.with_conversation_logger(Arc::new(logger) as Arc<dyn ConversationLogger>);
    }

    tokio::spawn({
        let cancellation = cancellation.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted; remaining generation calls will be cancelled");
                cancellation.cancel();
            }
        }
    });

    let (debater_a, debater_b) = config.debater_profiles();
    let input = RunDebateInput::new(topic.clone(), debater_a, debater_b)
        .with_params(config.debate_params())
        .with_judge(config.evaluator_config());

    if !cli.quiet && cli.output != OutputFormat::Json {
        print_banner(&topic, &config);
    }

    let session = if cli.quiet {
        use_case.execute(input).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await?
    };

    if let Some(path) = &cli.transcript {
        write_transcript(&session, path)?;
    }

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&session),
        OutputFormat::Summary => ConsoleFormatter::format_summary(&session),
        OutputFormat::Json => ConsoleFormatter::format_json(&session),
    };
    println!("{}", output);

    Ok(())
}

/// Command-line flags take precedence over every configuration source
fn apply_cli_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(rounds) = cli.rounds {
        config.debate.rounds = rounds;
    }
    if cli.self_improve {
        config.debate.self_improvement = true;
    }
    if cli.no_verdict {
        config.debate.declare_winner = false;
    }
    if let Some(words) = cli.word_limit {
        config.debate.word_limit = words;
    }
    if let Some(seconds) = cli.timeout {
        config.debate.timeout_seconds = Some(seconds);
    }
    if cli.single_prompt {
        config.judge.strategic_layers = false;
    }
    if let Some(model) = &cli.debater_a_model {
        config.debaters.a.model = model.clone();
    }
    if let Some(model) = &cli.debater_b_model {
        config.debaters.b.model = model.clone();
    }
    if let Some(model) = &cli.judge_model {
        config.judge.model = model.clone();
    }
    if let Some(path) = &cli.event_log {
        config.logging.event_log = Some(path.clone());
    }
    if let Some(dir) = &cli.log_dir {
        config.logging.log_dir = Some(dir.clone());
    }
}

/// Console logging from the `-v` count, plus a daily file when a log directory is set
fn init_logging(cli: &Cli, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("cannot create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "debate-arena.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(cli.log_level()))
        .with(console)
        .with(file_layer)
        .init();

    Ok(guard)
}

fn print_banner(topic: &str, config: &FileConfig) {
    let mode = if config.debate.self_improvement {
        "self-improving"
    } else {
        "standard"
    };
    println!();
    println!("+============================================================+");
    println!("|                 Debate Arena - LLM Debate                  |");
    println!("+============================================================+");
    println!();
    println!("Topic: {}", topic);
    println!(
        "Debaters: {} ({}) vs {} ({})",
        config.debaters.a.name,
        config.debaters.a.model,
        config.debaters.b.name,
        config.debaters.b.model
    );
    println!(
        "Judge: {} ({}), {} rounds, {}",
        config.judge.name, config.judge.model, config.debate.rounds, mode
    );
    println!();
}

fn write_transcript(session: &DebateSession, path: &Path) -> Result<()> {
    let transcript = export_transcript(session, path)
        .with_context(|| format!("cannot write transcript {}", path.display()))?;
    info!(
        "Transcript written with {} improvement entries",
        transcript.improvements.len()
    );
    Ok(())
}
