//! ListDesk CLI — work with listing drafts without the TUI.
//!
//! Commands:
//! - `validate` — check a draft JSON file and report per-field errors
//! - `enums` — fetch and print the reference enumerations
//! - `submit` — validate a draft, then create the future on the service

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use listdesk_core::api::{ApiConfig, ReferenceDataApi, RestClient};
use listdesk_core::record::FutureRecord;
use listdesk_core::validate::validate_record;

#[derive(Parser)]
#[command(name = "listdesk", about = "ListDesk CLI — futures-listing drafts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a draft record file and report per-field errors.
    Validate {
        /// Path to a draft JSON file (as saved by the TUI).
        draft: PathBuf,
    },
    /// Fetch and print the reference enumerations.
    Enums {
        /// Service base URL. Overrides the config file.
        #[arg(long)]
        api_url: Option<String>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate a draft, then create the future on the service.
    Submit {
        /// Path to a draft JSON file.
        draft: PathBuf,

        /// Service base URL. Overrides the config file.
        #[arg(long)]
        api_url: Option<String>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Validate { draft } => cmd_validate(&draft),
        Commands::Enums { api_url, config } => cmd_enums(api_url, config),
        Commands::Submit {
            draft,
            api_url,
            config,
        } => cmd_submit(&draft, api_url, config),
    }
}

fn cmd_validate(path: &Path) -> Result<()> {
    let record = load_draft(path)?;
    let errors = validate_record(&record);

    if errors.is_empty() {
        println!("OK: {} is a valid listing draft", path.display());
        return Ok(());
    }

    println!("{} problem(s) in {}:", errors.len(), path.display());
    for (field, message) in &errors {
        println!("  {:<22} {message}", field.name());
    }
    bail!("draft failed validation");
}

fn cmd_enums(api_url: Option<String>, config: Option<PathBuf>) -> Result<()> {
    let client = build_client(api_url, config)?;
    let enums = client.fetch_enumerations()?;

    println!("settlement methods: {}", enums.settlement_methods.join(", "));
    println!("deposit types:      {}", enums.deposit_types.join(", "));
    println!("underlying types:   {}", enums.underlying_types.join(", "));
    Ok(())
}

fn cmd_submit(path: &Path, api_url: Option<String>, config: Option<PathBuf>) -> Result<()> {
    let record = load_draft(path)?;

    let errors = validate_record(&record);
    if !errors.is_empty() {
        for (field, message) in &errors {
            println!("  {:<22} {message}", field.name());
        }
        bail!("draft failed validation, nothing submitted");
    }

    let client = build_client(api_url, config)?;
    let created = client
        .create_future(&record)
        .with_context(|| format!("submit {}", path.display()))?;

    println!("created: {created}");
    Ok(())
}

fn load_draft(path: &Path) -> Result<FutureRecord> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read draft {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("parse draft {}", path.display()))?;
    // Accept both the TUI draft envelope and a bare record.
    let record_value = match value.get("record") {
        Some(record) => record.clone(),
        None => value,
    };
    serde_json::from_value(record_value).context("decode draft record")
}

fn build_client(api_url: Option<String>, config: Option<PathBuf>) -> Result<RestClient> {
    let mut api_config = match config {
        Some(path) => ApiConfig::load(&path).map_err(anyhow::Error::msg)?,
        None => ApiConfig::default(),
    };
    if let Some(url) = api_url {
        api_config.base_url = url;
    }
    Ok(RestClient::new(api_config)?)
}
