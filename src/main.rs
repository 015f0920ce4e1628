//! Newslens - terminal client for the NeuralHybrid multilingual search
//! service

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use newslens_lib::{App, SearchClient, DEFAULT_ENDPOINT};

#[derive(Debug, Parser)]
#[command(name = "newslens", version, about)]
struct Args {
    /// Base URL of the search service.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Append diagnostics to this file (stderr belongs to the UI).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_tracing(log_file: &PathBuf) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("failed to open log file {}", log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(log_file) = &args.log_file {
        init_tracing(log_file)?;
    }

    let client = SearchClient::new(args.endpoint);
    tracing::info!(endpoint = client.endpoint(), "starting newslens");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = App::new(client).run(&mut terminal).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
