// src/main.rs
//
// imaginex - command-line front end over the local Vault

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use log::info;

use imaginex_vault::application::commands::*;
use imaginex_vault::application::dto::SaveRecordDto;
use imaginex_vault::application::state::AppState;
use imaginex_vault::db::VaultConfig;

#[derive(Debug, Parser)]
#[command(name = "imaginex", about = "Manage the local Imagine X vault")]
struct Cli {
    /// Vault database file (defaults to the user data directory)
    #[arg(long, env = "IMAGINEX_DB_PATH", global = true)]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List saved records, newest first
    List,
    /// Print one record as JSON
    Show { id: String },
    /// Save a record read from a JSON file
    Save { file: PathBuf },
    /// Delete a record by id
    Delete { id: String },
    /// Integrity check, size and counts
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();

    let cli = Cli::parse();

    let config = match cli.db_path {
        Some(path) => VaultConfig::at(path),
        None => VaultConfig::from_default_location()?,
    };
    info!("using vault at {}", config.database_path.display());

    let state = AppState::new(config);
    load_vault(&state).await.map_err(|e| anyhow!(e))?;

    match cli.command {
        Command::List => {
            let records = list_records(&state).await.map_err(|e| anyhow!(e))?;
            if records.is_empty() {
                println!("vault is empty");
            }
            for record in records {
                println!(
                    "{}  {}  {}",
                    record.id,
                    record.created_at.as_deref().unwrap_or("-"),
                    record.prompt
                );
            }
        }
        Command::Show { id } => {
            let record = get_record(id, &state).await.map_err(|e| anyhow!(e))?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Save { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let dto: SaveRecordDto = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a valid record", file.display()))?;
            let id = save_record(dto, &state).await.map_err(|e| anyhow!(e))?;
            println!("saved {}", id);
        }
        Command::Delete { id } => {
            delete_record(id.clone(), &state).await.map_err(|e| anyhow!(e))?;
            println!("deleted {}", id);
        }
        Command::Stats => {
            let stats = vault_stats(&state).await.map_err(|e| anyhow!(e))?;
            println!("records: {}", stats.record_count);
            println!("sources: {}", stats.source_count);
            println!(
                "size:    {} bytes ({} pages of {})",
                stats.size_bytes, stats.page_count, stats.page_size
            );
        }
    }

    Ok(())
}
