mod codec;
mod config;
mod error;
mod executor;

use std::io::IsTerminal;
use std::path::Path;

use dgf_strip_core::{FlagCatalog, ParseResult, Parser, render};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

use crate::codec::JsonSaveCodec;
use crate::config::{EXIT_DIAGNOSTICS, StripConfig};

fn main() {
    let tokens: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    match run(&tokens) {
        Ok(status) => std::process::exit(status),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn run(tokens: &[String]) -> Result<i32, String> {
    let log_filter = init_logging();
    let working_dir = std::env::current_dir()
        .map_err(|err| format!("Failed to read working directory: {err}"))?;
    let config = StripConfig::discover(&working_dir)
        .map_err(|err| format!("Failed to load settings: {err}"))?;

    let parser = Parser::new(FlagCatalog::builtin()).with_mode(config.parse_mode());
    let mut plan = match parser.try_parse(tokens) {
        Ok(plan) => plan,
        Err(diagnostic) => {
            eprintln!("error: {diagnostic}");
            return Ok(EXIT_DIAGNOSTICS);
        }
    };

    if plan.verbose {
        enable_verbose(&log_filter);
    }
    for diagnostic in &plan.diagnostics {
        eprintln!("error: {diagnostic}");
    }
    config.apply_defaults(&mut plan);

    if plan.wants_help() {
        let topic_failed = print_help(&plan);
        return Ok(config.exit_status(plan.has_diagnostics() || topic_failed, false));
    }

    if config.dry_run {
        let json = serde_json::to_string_pretty(&plan)
            .map_err(|err| format!("Failed to serialize plan: {err}"))?;
        println!("{json}");
        return Ok(config.exit_status(plan.has_diagnostics(), false));
    }

    Ok(run_batch(&config, &plan, &working_dir))
}

fn run_batch(config: &StripConfig, plan: &ParseResult, working_dir: &Path) -> i32 {
    let report = executor::execute(plan, &JsonSaveCodec, working_dir);
    for failure in &report.failures {
        eprintln!("error: {failure}");
    }
    tracing::debug!(
        written = report.written.len(),
        failed = report.failures.len(),
        "Batch finished"
    );

    config.exit_status(plan.has_diagnostics(), report.has_failures())
}

/// Prints the help screen for the plan's topic. Returns `true` if the topic
/// was unknown.
fn print_help(plan: &ParseResult) -> bool {
    let output = render(FlagCatalog::builtin(), plan.help_topic.as_deref());
    if let Some(err) = &output.error {
        eprintln!("error: {err}");
    }
    print!("{}", output.text);
    output.error.is_some()
}

type LogFilter = reload::Handle<EnvFilter, Registry>;

/// Installs the stderr subscriber before anything is parsed. The filter
/// comes from `RUST_LOG`, or `warn` until `-verbose` raises it.
fn init_logging() -> LogFilter {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();
    handle
}

/// Raises the filter to `info`. An explicit `RUST_LOG` always wins.
fn enable_verbose(handle: &LogFilter) {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return;
    }
    if let Err(err) = handle.reload(EnvFilter::new("info")) {
        eprintln!("error: Failed to enable verbose logging: {err}");
    }
}
