// Framework bootstrap for the airtable-meta command line.

use crate::domain::CreateBaseRequest;
use crate::frameworks::config;
use crate::interface_adapters::clients::AirtableClient;
use crate::use_cases::{CreateBaseUseCase, DescribeBaseUseCase, ListBasesUseCase};

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

#[derive(Debug, Parser)]
#[command(name = "airtable-meta", version, about = "Inspect and create Airtable bases")]
pub struct Cli {
    /// TOML settings file (falls back to AIRTABLE_CONFIG).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List bases visible to the token.
    Bases {
        /// Offset returned by a previous page.
        #[arg(long)]
        offset: Option<String>,
        /// Follow offsets until every page is fetched.
        #[arg(long)]
        all: bool,
    },
    /// Print the table schema of a base.
    Schema {
        base_id: String,
        /// Only print the table with this name or id.
        #[arg(long)]
        table: Option<String>,
    },
    /// Create a base from a JSON request file.
    CreateBase {
        #[arg(long)]
        file: PathBuf,
    },
}

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Logs go to stderr so stdout stays pipeable JSON.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run() -> ExitCode {
    init_runtime();
    let cli = Cli::parse();

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

pub async fn execute(cli: Cli) -> Result<(), Box<dyn Error>> {
    let settings = config::load(cli.config.as_deref())?;
    let client = AirtableClient::new(settings.api_key, &settings.base_url, settings.timeout)?;
    tracing::debug!(
        base_url = %client.base_url(),
        timeout_ms = settings.timeout.as_millis(),
        "airtable client configured"
    );

    match cli.command {
        Command::Bases { offset, all } => {
            let bases = ListBasesUseCase { api: client }
                .execute(offset, all)
                .await?;
            print_json(&bases)
        }
        Command::Schema { base_id, table } => {
            let tables = DescribeBaseUseCase { api: client }
                .execute(&base_id, table.as_deref())
                .await?;
            print_json(&tables)
        }
        Command::CreateBase { file } => {
            let request = read_create_request(&file)?;
            let created = CreateBaseUseCase { api: client }.execute(&request).await?;
            print_json(&created)
        }
    }
}

pub fn read_create_request(path: &Path) -> Result<CreateBaseRequest, Box<dyn Error>> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let request: CreateBaseRequest = serde_json::from_str(&raw)
        .map_err(|e| format!("invalid create base request {}: {e}", path.display()))?;
    Ok(request)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
