//! `payroll` command line entry point.
//!
//! Serves the HTTP API, or prints a payslip or the payroll report straight
//! from the snapshot file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::{ConfigLoader, PayrollConfig};
use payroll_engine::directory::PayrollDirectory;
use payroll_engine::models::{EmployeeId, PayPeriod};
use payroll_engine::render::{payroll_report_text, payslip_file_name, payslip_text};
use payroll_engine::store::{JsonFileStore, SnapshotStore};

#[derive(Debug, Parser)]
#[command(name = "payroll", version, about = "Employee payroll engine")]
struct Cli {
    /// Snapshot file holding the employee directory.
    #[arg(long, global = true, default_value = "employees.json")]
    data: PathBuf,

    /// Payroll rules file; built-in rules are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: String,
    },
    /// Print one employee's payslip and save it as a text file.
    Payslip {
        /// Employee identifier.
        #[arg(long)]
        id: u32,
        /// Month number, 1 through 12.
        #[arg(long)]
        month: u32,
        /// Calendar year.
        #[arg(long)]
        year: i32,
        /// Reference date for years of service (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        as_of: Option<NaiveDate>,
        /// Directory the payslip file is written to.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Print the payroll report for a month.
    Report {
        /// Month number, 1 through 12.
        #[arg(long)]
        month: u32,
        /// Calendar year.
        #[arg(long)]
        year: i32,
        /// Reference date for years of service (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("payroll error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = load_config(cli.config.as_deref())?;
    let store = Arc::new(JsonFileStore::new(&cli.data));

    match cli.command {
        Command::Serve { bind } => serve(&bind, store, config).await,
        Command::Payslip {
            id,
            month,
            year,
            as_of,
            out_dir,
        } => {
            let directory = open_directory(store.as_ref(), config);
            let period = PayPeriod::new(month, year)?;
            let payslip = directory.generate_payslip(EmployeeId::new(id), period, resolve(as_of))?;

            let text = payslip_text(&payslip);
            print!("{text}");

            let path = out_dir.join(payslip_file_name(&payslip));
            std::fs::write(&path, &text)
                .with_context(|| format!("failed to write payslip to {}", path.display()))?;
            info!(path = %path.display(), "Payslip saved");
            Ok(())
        }
        Command::Report { month, year, as_of } => {
            let directory = open_directory(store.as_ref(), config);
            let period = PayPeriod::new(month, year)?;
            let report = directory.payroll_report(period, resolve(as_of));
            print!("{}", payroll_report_text(&report));
            Ok(())
        }
    }
}

fn init_tracing(quiet: bool, verbose: u8) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose >= 2)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<PayrollConfig> {
    match path {
        Some(path) => Ok(ConfigLoader::load(path)
            .with_context(|| format!("failed to load payroll rules from {}", path.display()))?
            .into_config()),
        None => Ok(PayrollConfig::default()),
    }
}

fn open_directory(store: &dyn SnapshotStore, config: PayrollConfig) -> PayrollDirectory {
    let employees = store.load_all().unwrap_or_else(|err| {
        warn!(error = %err, "Failed to load employee data, continuing with an empty directory");
        Vec::new()
    });
    PayrollDirectory::from_snapshot(employees, config)
}

fn resolve(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| Utc::now().date_naive())
}

async fn serve(
    bind: &str,
    store: Arc<JsonFileStore>,
    config: PayrollConfig,
) -> anyhow::Result<()> {
    info!(path = %store.path().display(), "Loading employee data");
    let state = AppState::load(store, config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!(address = %bind, "Payroll API listening");

    axum::serve(listener, app).await?;
    Ok(())
}
