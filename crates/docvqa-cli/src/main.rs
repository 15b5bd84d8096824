//! DocVQA CLI — command-line client for the DocVQA API.
//!
//! Set DOCVQA_API_URL (or API_URL); defaults to http://localhost:8000.

use anyhow::Context;
use clap::{Parser, Subcommand};
use docvqa_api_client::ApiClient;
use docvqa_cli::{init_tracing, pre_validate_file};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "docvqa", about = "DocVQA API CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a document (image or PDF)
    Upload {
        /// Path to the file to upload
        file: std::path::PathBuf,
    },
    /// Ask a question about an uploaded document
    Ask {
        /// File URL returned by the upload command
        file_url: String,
        /// Question to ask about the document
        question: String,
    },
    /// Check API and dependency health
    Health,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let client = ApiClient::from_env().context("Failed to create API client")?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload { file } => {
            let filename = file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            let size = std::fs::metadata(&file)
                .with_context(|| format!("Failed to read file metadata: {}", file.display()))?
                .len() as usize;
            pre_validate_file(&filename, size).map_err(|e| anyhow::anyhow!("{}", e))?;

            let path = file.to_string_lossy();
            let response = client.upload_file(&path).await?;
            print_json(&response)?;
        }
        Commands::Ask { file_url, question } => {
            let response = client.ask(&file_url, &question).await?;
            print_json(&response)?;
        }
        Commands::Health => {
            let response = client.health().await?;
            print_json(&response)?;
        }
    }

    Ok(())
}
