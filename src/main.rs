use std::fs::File;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;
use tictactoe::cli::Cli;
use tictactoe::config::Config;
use tictactoe::core::audio::{AudioSink, Bell, Silent};
use tictactoe::core::engine::Engine;
use tictactoe::core::terminal;
use tictactoe::TicTacToe;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging goes to a file so it does not fight the TUI for the screen
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("cannot create log file {}", cli.log_file.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    cli.apply(&mut config);
    info!(?config, "starting tic-tac-toe");

    let audio: Box<dyn AudioSink> = if config.sound {
        Box::new(Bell::stdout())
    } else {
        Box::new(Silent)
    };
    let engine = Engine::new(TicTacToe::new(&config), audio);

    let mut term = terminal::init()?;
    let result = engine.run(&mut term).await;
    terminal::restore();

    let game = result?;
    info!(
        outcome = ?game.state().outcome(),
        moves = game.state().move_count(),
        "session ended"
    );
    Ok(())
}
