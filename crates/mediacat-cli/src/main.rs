//! Mediacat CLI: command-line client for the Mediacat API.
//!
//! Set MEDIACAT_API_URL (or API_URL) and, when the server requires it, MEDIACAT_API_KEY.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use mediacat_api_client::ApiClient;
use mediacat_cli::{is_affirmative, render_media_table, render_stats, render_sweep};
use mediacat_core::models::ListQuery;
use mediacat_infra::{init_telemetry, TelemetryOptions};
use serde::Serialize;
use std::io::{BufRead, Write};

#[derive(Parser)]
#[command(name = "mediacat", about = "Mediacat media catalog CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List media files
    List {
        /// Filter by collection name
        #[arg(long)]
        collection: Option<String>,
        /// Filter by type: image, video, audio, document
        #[arg(long)]
        r#type: Option<String>,
        /// Maximum number of items
        #[arg(long, default_value_t = 20)]
        limit: i64,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Display media library statistics
    Stats {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Upload a file
    Upload {
        /// Path to the file to upload
        file: std::path::PathBuf,
        /// Collection to upload into
        #[arg(long)]
        collection: Option<String>,
    },
    /// Show a single media record
    Get {
        /// Media ID
        id: i64,
    },
    /// Delete a media record and its file
    Delete {
        /// Media ID
        id: i64,
    },
    /// Clean orphaned media files
    Clean {
        /// List files that would be removed without actually removing them
        #[arg(long)]
        dry_run: bool,
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_telemetry(&TelemetryOptions::cli("mediacat-cli"))
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let cli = Cli::parse();

    let client = ApiClient::from_env()
        .context("Failed to create API client. Set MEDIACAT_API_URL (or API_URL)")?;
    tracing::debug!(base_url = client.base_url(), "API client ready");

    match cli.command {
        Commands::List {
            collection,
            r#type,
            limit,
            format,
        } => {
            let query = ListQuery {
                collection,
                media_type: r#type,
                limit: Some(limit),
            };
            let response = client.list_media(&query).await?;

            match format {
                OutputFormat::Json => print_json(&response)?,
                OutputFormat::Table => {
                    println!("Media Library");
                    println!("-------------");
                    if response.data.is_empty() {
                        println!("No media found.");
                        return Ok(());
                    }
                    print!("{}", render_media_table(&response.data));
                    println!();
                    println!(
                        "Showing {} of {} total media files.",
                        response.meta.count, response.meta.total
                    );
                }
            }
        }
        Commands::Stats { format } => {
            let response = client.media_stats().await?;
            match format {
                OutputFormat::Json => print_json(&response.data)?,
                OutputFormat::Table => {
                    println!("Media Library Statistics");
                    println!("------------------------");
                    println!();
                    print!("{}", render_stats(&response.data));
                }
            }
        }
        Commands::Upload { file, collection } => {
            let response = client.upload_media(&file, collection.as_deref()).await?;
            print_json(&response)?;
        }
        Commands::Get { id } => {
            let response = client.get_media(id).await?;
            print_json(&response.data)?;
        }
        Commands::Delete { id } => {
            let response = client.delete_media(id).await?;
            println!("{}", response.message);
        }
        Commands::Clean { dry_run, force } => {
            println!("Media Library Cleanup");
            println!("---------------------");

            if dry_run {
                println!("DRY RUN - No files will be deleted.");
                println!();
            }

            if !force
                && !dry_run
                && !confirm("This will remove orphaned media files. Continue?")?
            {
                println!("Operation cancelled.");
                return Ok(());
            }

            let response = client.cleanup_orphans(dry_run).await?;
            print!("{}", render_sweep(&response.data));

            println!();
            println!("Cleanup completed.");
        }
    }

    Ok(())
}
