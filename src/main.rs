//! CLI entry point for the gateway configuration generator.
//!
//! Reads the input JSON, resolves the gateway id through `az`, builds the
//! five fragments, and writes the merged document into the current working
//! directory. All user-facing output goes through [`PipelineReporter`];
//! `tracing` carries developer diagnostics only.

use std::path::{Path, PathBuf};
use std::process;

use agwgen::config::ApplicationConfig;
use agwgen::error::AgwResult;
use agwgen::fragments::{
    BackendPoolFragment, GatewayConfiguration, HealthProbeFragment, HttpSettingsFragment,
    PathRulesFragment, RoutingRuleFragment,
};
use agwgen::gateway::{self, resolve_gateway_id};
use agwgen::io::PipelineReporter;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Builds Application Gateway configuration fragments for one application
/// path and writes their merged union to `agw-configuration.json`.
#[derive(Parser)]
#[command(name = "agwgen", version, about)]
struct Cli {
    /// The json file to use
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let mut reporter = PipelineReporter::new();

    if let Err(err) = run(&cli, &mut reporter) {
        // A reporter failure can't be announced through the channel that
        // just failed; fall back to bare stderr.
        if reporter.error(&err).is_err() {
            eprintln!("[-] Error: {err}");
        }
        process::exit(err.exit_code());
    }
}

fn run(cli: &Cli, reporter: &mut PipelineReporter) -> AgwResult<()> {
    let config = ApplicationConfig::from_file(&cli.file, reporter)?;

    let gateway_id = resolve_gateway_id(&config)?;
    reporter.notice(format!(
        "Info: Resolved application gateway id: {gateway_id}"
    ))?;

    reporter.notice("CONFIGURATION FOR BACKEND POOL")?;
    let backend_pool = BackendPoolFragment::build(&gateway_id, &config);
    if backend_pool.has_no_addresses() {
        reporter.notice(format!(
            "Info: no fqdns or ip_addresses were given, '{}' is created empty",
            gateway::backend_pool_name(&config.name)
        ))?;
    }

    reporter.notice("CONFIGURATION FOR HTTP SETTINGS")?;
    let http_settings = HttpSettingsFragment::build(&gateway_id, &config);

    reporter.notice("CONFIGURATION FOR HEALTH PROBE")?;
    let health_probe = HealthProbeFragment::build(&gateway_id, &config);

    reporter.notice("CONFIGURATION FOR ROUTING RULE")?;
    let routing_rule = RoutingRuleFragment::build(&gateway_id, &config);

    reporter.notice("CONFIGURATION FOR PATH RULE")?;
    let path_rules = PathRulesFragment::build(&gateway_id, &config);

    let merged = GatewayConfiguration::merge(
        backend_pool,
        http_settings,
        health_probe,
        routing_rule,
        path_rules,
    );
    let written = merged.write_to_dir(Path::new("."))?;
    reporter.notice(format!(
        "Merged JSON has been written to '{}'",
        written.display()
    ))?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
