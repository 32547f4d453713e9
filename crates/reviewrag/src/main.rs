mod app;

use anyhow::Result;
use clap::{Parser, Subcommand};
use reviewrag_common::{create_subset, logger, AppConfig, SubsetOutcome};
use reviewrag_vector::SearchOptions;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "reviewrag")]
#[command(about = "ReviewRag - semantic retrieval over product reviews", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },

    /// Ask one question on the console
    Query {
        /// Question text; read from stdin when omitted
        text: Option<String>,

        /// Neighbors to fetch
        #[arg(long)]
        top_k: Option<usize>,

        /// Maximum distance of a hit
        #[arg(long)]
        threshold: Option<f32>,
    },

    /// Cut the indexed subset out of the full review dump
    Subset {
        /// Full review CSV
        #[arg(long)]
        input: Option<PathBuf>,

        /// Subset CSV to write
        #[arg(long)]
        output: Option<PathBuf>,

        /// Rows to keep
        #[arg(long)]
        rows: Option<usize>,
    },
}

async fn serve(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server_host = host;
    }
    if let Some(port) = port {
        config.server_port = port;
    }
    config.validate()?;

    logger::setup_logging(&config.log_dir, &config.log_level)?;

    tracing::info!("ReviewRag starting...");
    tracing::info!("Configuration loaded:");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Corpus: {}", config.corpus_path.display());
    tracing::info!("  Metric: {}", config.distance_metric);

    let engine = app::build_engine(&config).await?;

    println!("Server listening on http://{}", config.server_bind_address());
    reviewrag_server::start_server(config, Arc::new(engine)).await?;

    Ok(())
}

async fn query(
    config: AppConfig,
    text: Option<String>,
    top_k: Option<usize>,
    threshold: Option<f32>,
) -> Result<()> {
    config.validate()?;
    logger::setup_console_logging(&config.log_level)?;

    let engine = app::build_engine(&config).await?;

    let question = match text {
        Some(text) => text,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(b"Review Retrieval System\nEnter your question: ").await?;
            stdout.flush().await?;

            let mut line = String::new();
            BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
            line
        }
    };

    if question.trim().is_empty() {
        println!("Please enter a question.");
        return Ok(());
    }

    let options = SearchOptions::new(
        top_k.unwrap_or(config.top_k),
        threshold.unwrap_or(config.distance_threshold),
    );
    let hits = engine.search(&question, &options).await?;

    print!("{}", app::format_hits(&hits));
    Ok(())
}

fn subset(
    config: AppConfig,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    rows: Option<usize>,
) -> Result<()> {
    logger::setup_console_logging(&config.log_level)?;

    let input = input.unwrap_or(config.corpus_source_path);
    let output = output.unwrap_or(config.corpus_path);
    let rows = rows.unwrap_or(config.corpus_limit);

    match create_subset(&input, &output, rows)? {
        SubsetOutcome::Created { rows } => {
            println!("Created {} with {} rows.", output.display(), rows)
        }
        SubsetOutcome::Existing => println!(
            "{} not found, keeping existing {}.",
            input.display(),
            output.display()
        ),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();
    let config = AppConfig::from_env()?;

    match cli.command {
        Some(Commands::Serve { host, port }) => serve(config, host, port).await,
        Some(Commands::Query {
            text,
            top_k,
            threshold,
        }) => query(config, text, top_k, threshold).await,
        Some(Commands::Subset {
            input,
            output,
            rows,
        }) => subset(config, input, output, rows),
        None => serve(config, None, None).await,
    }
}
