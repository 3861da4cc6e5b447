use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{Completion, HttpSubjectService, SubjectService, SubjectSession};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod ui;

use config::load_settings;
use controller::{commands::HELP, orchestration};
use ui::terminal::TerminalView;

/// Browse subjects one by one and edit their captions.
#[derive(Parser, Debug)]
#[command(name = "captioner", version)]
struct Args {
    /// TOML settings file (defaults to ./captioner.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Subject service endpoint, e.g. http://localhost:3000/api
    #[arg(long)]
    api_url: Option<String>,
    /// Base URL that image paths are resolved against.
    #[arg(long)]
    asset_url: Option<String>,
    /// Per-request timeout in seconds; 0 waits forever.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(v) = args.api_url {
        settings.api_url = v;
    }
    if let Some(v) = args.asset_url {
        settings.asset_base_url = v;
    }
    if let Some(v) = args.timeout_secs {
        settings.request_timeout_secs = v;
    }

    let filter = EnvFilter::try_new(&settings.log_filter)
        .with_context(|| format!("invalid log filter '{}'", settings.log_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let api_url = settings.api_url()?;
    let service: Arc<dyn SubjectService> = match settings.request_timeout() {
        Some(timeout) => Arc::new(HttpSubjectService::with_timeout(api_url.clone(), timeout)?),
        None => Arc::new(HttpSubjectService::new(api_url.clone())),
    };
    let view = TerminalView::new(std::io::stdout(), settings.asset_base_url()?);
    let session = SubjectSession::new(service, view);

    info!(%api_url, "loading subjects");
    let outcome = session
        .init()
        .await
        .context("failed to load subjects")?;
    if outcome == Completion::Done {
        return Ok(());
    }

    println!("type `help` for commands");
    orchestration::run(session, BufReader::new(tokio::io::stdin())).await
}
