//! CLI entrypoint for agora
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use agora_application::ports::activity_log::{ActivityLogger, NoActivityLogger};
use agora_application::ports::progress::{CiProgressNotifier, NoCiProgress};
use agora_application::RunCiUseCase;
use agora_infrastructure::{
    ConfigLoader, FileConfig, JsonlActivityLogger, ProcessSuiteRunner, Scenario, ScenarioRunner,
    Severity,
};
use agora_presentation::{
    Cli, Command, ConsoleFormatter, OutputFormatter, ProgressReporter, ReportView,
};
use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, config.logging.dir.as_deref());

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting agora");

    match &cli.command {
        Command::Config => show_config(&config),
        Command::Ci => run_ci(&config, cli.quiet).await,
        Command::Report { scenario, output } => {
            let format = output
                .map(Into::into)
                .or(config.output.format)
                .unwrap_or_default();
            report(&config, scenario, format).await
        }
    }
}

/// Stderr logging filtered by `-v`, plus a daily file when `[logging] dir` is set.
fn init_logging(verbose: u8, dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "agora.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}

fn report_issues(config: &FileConfig) -> bool {
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => eprintln!("error: {}: {}", issue.field, issue.message),
            Severity::Warning => warn!("{}: {}", issue.field, issue.message),
        }
    }
    issues.iter().any(|i| i.severity == Severity::Error)
}

fn show_config(config: &FileConfig) -> Result<()> {
    ConfigLoader::print_config_sources();
    println!();
    println!(
        "{}",
        toml::to_string_pretty(config).context("Failed to render configuration")?
    );

    let issues = config.validate();
    if issues.is_empty() {
        println!("No configuration issues.");
    }
    for issue in issues {
        let label = match issue.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        println!("{}: {}: {}", label, issue.field, issue.message);
    }
    Ok(())
}

async fn run_ci(config: &FileConfig, quiet: bool) -> Result<()> {
    if report_issues(config) {
        bail!("Invalid CI configuration");
    }

    // === Dependency Injection ===
    let use_case = RunCiUseCase::new(Arc::new(ProcessSuiteRunner::new()));
    let progress: Box<dyn CiProgressNotifier> = if quiet {
        Box::new(NoCiProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let report = use_case
        .execute(&config.ci.to_ci_config(), progress.as_ref())
        .await?;
    if !quiet {
        print!("{}", ConsoleFormatter::format_ci_report(&report));
    }
    Ok(())
}

async fn report(
    config: &FileConfig,
    scenario_path: &Path,
    format: agora_domain::OutputFormat,
) -> Result<()> {
    report_issues(config);

    let activity: Arc<dyn ActivityLogger> = match &config.logging.activity_log {
        Some(path) => match JsonlActivityLogger::new(path) {
            Some(logger) => Arc::new(logger),
            None => Arc::new(NoActivityLogger),
        },
        None => Arc::new(NoActivityLogger),
    };

    let scenario = Scenario::from_file(scenario_path)?;
    let runner = ScenarioRunner::with_options(config.versioning.to_tracked_fields(), activity);
    let outcome = runner
        .run(&scenario)
        .await
        .with_context(|| format!("Scenario {} failed", scenario_path.display()))?;

    let view = ReportView {
        discussions: &outcome.discussions,
        destroyed: &outcome.destroyed,
        user_names: &outcome.user_names,
    };
    print!("{}", ConsoleFormatter.format(&view, format));
    Ok(())
}
