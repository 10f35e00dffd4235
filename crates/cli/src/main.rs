//! posverify CLI - entry point for the verification harness
//!
//! Exit codes: 0 on success, 1 on a verification failure (an assertion or
//! browser session error), 2 on an environment failure (backend never
//! became ready, Playwright missing, unreadable fixture file).

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use posverify_harness::driver::DriverConfig;
use posverify_harness::{Fixtures, Harness, HarnessConfig, VerifyError, VerifyResult};

/// Browser-driven verification for the Sistema de Facturacion frontend
#[derive(Parser, Debug)]
#[command(name = "posverify")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Frontend base URL
    #[arg(
        long,
        default_value = "http://localhost:5173",
        env = "POSVERIFY_BASE_URL",
        global = true
    )]
    base_url: String,

    /// Backend health endpoint
    #[arg(
        long,
        default_value = "http://localhost:3001/api/health",
        env = "POSVERIFY_HEALTH_URL",
        global = true
    )]
    health_url: String,

    /// Health probe budget before giving up on the backend
    #[arg(long, default_value_t = 15, global = true)]
    attempts: u32,

    /// Seconds between health probes
    #[arg(long, default_value_t = 1, global = true)]
    interval_secs: u64,

    /// Directory evidence screenshots are written to
    #[arg(
        long,
        default_value = "verification",
        env = "POSVERIFY_SCREENSHOT_DIR",
        global = true
    )]
    screenshot_dir: PathBuf,

    /// Optional YAML file overriding the built-in fixtures
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,

    /// Run the browser with a visible window
    #[arg(long, global = true)]
    headed: bool,

    /// Viewport width
    #[arg(long, default_value_t = 1280, global = true)]
    viewport_width: u32,

    /// Viewport height
    #[arg(long, default_value_t = 720, global = true)]
    viewport_height: u32,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify login, capability, and logout for every actor
    Roles,
    /// Walk every application view and capture evidence screenshots
    Views,
    /// Run the role flows, then the view tour
    All,
    /// Probe the backend health endpoint once
    Status,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(cli).await {
        error!("{}", e);
        let code = if e.is_environment() { 2 } else { 1 };
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> VerifyResult<()> {
    let fixtures = match &cli.fixtures {
        Some(path) => Fixtures::from_file(path)?,
        None => Fixtures::default(),
    };

    let config = HarnessConfig {
        base_url: cli.base_url.clone(),
        health_url: cli.health_url.clone(),
        max_attempts: cli.attempts,
        poll_interval: Duration::from_secs(cli.interval_secs),
        screenshot_dir: cli.screenshot_dir.clone(),
        driver: DriverConfig {
            headless: !cli.headed,
            viewport_width: cli.viewport_width,
            viewport_height: cli.viewport_height,
        },
        fixtures,
    };
    let harness = Harness::new(config);

    match cli.command {
        Commands::Roles => harness.verify_roles().await,
        Commands::Views => harness.verify_views().await,
        Commands::All => harness.verify_all().await,
        Commands::Status => {
            if harness.probe_backend().await {
                println!("backend is ready at {}", cli.health_url);
                Ok(())
            } else {
                Err(VerifyError::BackendUnavailable {
                    url: cli.health_url.clone(),
                    attempts: 1,
                })
            }
        }
    }
}
