//! Link-Sweep main entry point
//!
//! This is the command-line interface for the Link-Sweep broken link checker.

use anyhow::{Context, Result};
use clap::Parser;
use link_sweep::config::{load_config_with_hash, Config};
use link_sweep::crawler::sweep;
use link_sweep::output::{print_summary, write_reports, ReportSummary};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Link-Sweep: a single-site broken link checker
///
/// Link-Sweep crawls every page reachable from the configured seeds without
/// leaving the site's domain, optionally logging in and out between phases,
/// and writes the status of each page to CSV, JSON and HTML reports.
#[derive(Parser, Debug)]
#[command(name = "link-sweep")]
#[command(version = "1.0.0")]
#[command(about = "A single-site broken link checker", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Write reports here instead of the configured report directory
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_sweep(&config, cli.output_dir, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("link_sweep=info,warn"),
            1 => EnvFilter::new("link_sweep=debug,info"),
            2 => EnvFilter::new("link_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the validated configuration
fn handle_dry_run(config: &Config) {
    println!("=== Link-Sweep Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Scope: {}", config.scope_url().unwrap_or("(none)"));
    match config.crawler.max_depth {
        Some(depth) => println!("  Max depth: {}", depth),
        None => println!("  Max depth: unbounded"),
    }
    println!("  Navigation timeout: {}ms", config.crawler.navigation_timeout_ms);
    println!("  Traversal: {:?}", config.crawler.traversal);
    println!("  Share visited across phases: {}", config.crawler.share_visited);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Directory: {}", config.output.report_dir);
    println!("  Prefix: {}", config.output.report_prefix);
    let formats: Vec<&str> = config.output.formats.iter().map(|f| f.extension()).collect();
    println!("  Formats: {}", formats.join(", "));

    match &config.auth {
        Some(auth) => {
            println!("\nAuthentication:");
            println!("  Login URL: {}", auth.login_url);
            println!("  Account: {}", auth.email);
            if let Some(logout) = &auth.logout_url {
                println!("  Logout URL: {}", logout);
            }
        }
        None => println!("\nAuthentication: none"),
    }

    println!("\nPhases ({}):", config.phases.len());
    for phase in &config.phases {
        println!("  - {} ({} seeds)", phase.name, phase.seeds.len());
        for seed in &phase.seeds {
            println!("    * {}", seed);
        }
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would start sweeping with {} seed URLs", config.seed_count());
}

/// Handles the main sweep: crawl every phase, then write the reports
async fn handle_sweep(config: &Config, output_dir: Option<PathBuf>, quiet: bool) -> Result<()> {
    tracing::info!("Phases: {}, total seed URLs: {}", config.phases.len(), config.seed_count());

    let observations = sweep(config).await.context("sweep failed")?;

    let summary = ReportSummary::from_observations(&observations);
    tracing::info!("Sweep completed: {} links, {} broken", summary.total, summary.broken);

    let dir = output_dir.unwrap_or_else(|| PathBuf::from(&config.output.report_dir));
    let paths = write_reports(
        &dir,
        &config.output.report_prefix,
        &config.output.formats,
        &observations,
    )
    .with_context(|| format!("failed to write reports to {}", dir.display()))?;

    if !quiet {
        print_summary(&summary);
        println!();
        for path in &paths {
            println!("✓ Report written to: {}", path.display());
        }
    }

    Ok(())
}
