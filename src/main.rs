//! Neon Bomb - terminal client
//!
//! `play` runs the game in the terminal; `suggest` asks the opponent for a
//! single move and prints it.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use neon_bomb::{
    AdviceRequest, Board, Cli, Command, FirstEmptyAdvisor, GameConfig, LlmAdvisor, LlmClient,
    MoveAdvisor, Player, init_file_logging, resolve_request, run_tui, suggest_or_fallback,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            offline,
            bombs,
            log_file,
        } => run_play(config, offline, bombs, log_file).await,
        Command::Suggest {
            board,
            player,
            own_bombs,
            opponent_bombs,
            no_bombs,
            offline,
            config,
        } => {
            let request = AdviceRequest::new(board, player, own_bombs, opponent_bombs, !no_bombs);
            run_suggest(config, offline, request).await
        }
    }
}

/// Builds the opponent: the configured model, or the offline advisor.
fn build_advisor(config: &GameConfig, offline: bool) -> Result<Arc<dyn MoveAdvisor>> {
    if offline {
        info!("Offline mode, using first-empty opponent");
        return Ok(Arc::new(FirstEmptyAdvisor::new(config.opponent_name().clone())));
    }

    let llm_config = config.create_llm_config()?;
    info!(provider = %llm_config.provider(), model = llm_config.model(), "Using LLM opponent");
    Ok(Arc::new(LlmAdvisor::new(
        config.opponent_name(),
        LlmClient::new(llm_config),
    )))
}

/// Run the terminal game
async fn run_play(
    config_path: PathBuf,
    offline: bool,
    bombs: Option<u8>,
    log_file: Option<PathBuf>,
) -> Result<()> {
    let mut config = GameConfig::load_or_default(&config_path)?;
    if let Some(bombs) = bombs {
        config = config.with_initial_bombs(bombs);
    }
    if let Some(log_file) = log_file {
        config = config.with_log_file(log_file);
    }

    init_file_logging(config.log_file())?;
    let advisor = build_advisor(&config, offline)?;
    run_tui(config, advisor).await
}

/// Ask for one move and print it as JSON
#[instrument(skip(request), fields(player = %request.player))]
async fn run_suggest(config_path: PathBuf, offline: bool, request: AdviceRequest) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,neon_bomb=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = GameConfig::load_or_default(&config_path)?;
    let advisor = build_advisor(&config, offline)?;

    if request.board.is_full() {
        warn!("Board is full, the answer will have no cell");
    }
    log_board(&request.board, request.player);

    let suggestion = suggest_or_fallback(advisor.as_ref(), &request).await;
    let action = resolve_request(&suggestion, &request);

    let output = serde_json::json!({
        "advisor": advisor.name(),
        "suggestion": suggestion,
        "action": action,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn log_board(board: &Board, player: Player) {
    info!(%player, "Board:\n{}", board.display());
}
