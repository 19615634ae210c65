//! CLI command handlers.
//!
//! Every handler owns one board for its whole run: spawn, set up, act,
//! optionally clear, close, and wait for the board actor to stop.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use anyhow::{Context, Result};
use gambit_board::actors::spawn_board;
use gambit_board::{BoardHandle, MoveRequest, game, setup};
use tracing::{info, warn};

use crate::cli::Commands;
use crate::config::GameConfig;

/// What a finished run leaves behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Move that was played, if the command plays one.
    pub played: Option<MoveRequest>,
    /// Rendered position, if rendering was enabled.
    pub diagram: Option<String>,
    /// Pieces deleted before closing.
    pub cleared: usize,
    /// Entries still on the board when it closed.
    pub remaining: usize,
    /// Surviving pieces terminated after the board closed.
    pub released: usize,
}

/// Fold command-line overrides into the loaded configuration.
///
/// # Errors
///
/// Returns an error if `--from`/`--to` are not valid squares.
pub fn apply_overrides(mut config: GameConfig, command: &Commands) -> Result<GameConfig> {
    if let Commands::Play {
        from,
        to,
        no_render,
        keep,
        ..
    } = command
    {
        if let (Some(from), Some(to)) = (from, to) {
            let request = MoveRequest::parse(from, to).context("Invalid move on command line")?;
            config.opening.from = request.from;
            config.opening.to = request.to;
        }
        if *no_render {
            config.render = false;
        }
        if *keep {
            config.clear_on_exit = false;
        }
    }

    Ok(config)
}

/// Execute a CLI command.
///
/// # Errors
///
/// Returns the first actor protocol error, wrapped with the step it broke.
pub async fn execute_command(command: &Commands, config: &GameConfig) -> Result<Outcome> {
    match command {
        Commands::Play { .. } => play(config).await,
        Commands::Show { .. } => show(config).await,
    }
}

/// Set up the configured sides, play the opening, render, and tear down.
///
/// # Errors
///
/// Returns an error if any board or piece request fails.
pub async fn play(config: &GameConfig) -> Result<Outcome> {
    let (board, join) = spawn_board().await.context("Failed to spawn board")?;

    setup::setup(&board, &config.sides)
        .await
        .context("Failed to set up the board")?;

    let request = config.opening_move();
    game::play(&board, request)
        .await
        .with_context(|| format!("Failed to play {request}"))?;

    let diagram = render_if(&board, config.render).await?;
    let teardown = finish(board, join, config.clear_on_exit).await?;

    Ok(Outcome {
        played: Some(request),
        diagram,
        cleared: teardown.cleared,
        remaining: teardown.remaining,
        released: teardown.released,
    })
}

/// Set up the configured sides and render the starting position.
///
/// # Errors
///
/// Returns an error if any board or piece request fails.
pub async fn show(config: &GameConfig) -> Result<Outcome> {
    let (board, join) = spawn_board().await.context("Failed to spawn board")?;

    setup::setup(&board, &config.sides)
        .await
        .context("Failed to set up the board")?;

    let diagram = render_if(&board, true).await?;
    let teardown = finish(board, join, config.clear_on_exit).await?;

    Ok(Outcome {
        played: None,
        diagram,
        cleared: teardown.cleared,
        remaining: teardown.remaining,
        released: teardown.released,
    })
}

async fn render_if(board: &BoardHandle, enabled: bool) -> Result<Option<String>> {
    if !enabled {
        return Ok(None);
    }

    game::render(board)
        .await
        .map(Some)
        .context("Failed to render the board")
}

struct Teardown {
    cleared: usize,
    remaining: usize,
    released: usize,
}

/// Clear (or keep), close, join, then stop any piece the board left behind.
///
/// Kept pieces stay registered up to Close so `remaining` reports them; they
/// are terminated afterwards since their board no longer answers.
async fn finish(
    board: BoardHandle,
    join: ractor::concurrency::JoinHandle<()>,
    clear: bool,
) -> Result<Teardown> {
    let (cleared, survivors) = if clear {
        let cleared = game::clear(&board).await.context("Failed to clear the board")?;
        (cleared, Vec::new())
    } else {
        let survivors = board.pieces().await.context("Failed to list pieces")?;
        (0, survivors)
    };

    let remaining = board.close().await.context("Failed to close the board")?;
    join.await.context("Board actor did not shut down cleanly")?;

    if !survivors.is_empty() {
        warn!(count = survivors.len(), "Terminating pieces left on the closed board");
    }
    let mut released = 0;
    for piece in survivors {
        piece
            .terminate()
            .await
            .with_context(|| format!("Failed to terminate {piece}"))?;
        released += 1;
    }

    info!(cleared, remaining, released, "Board closed");
    Ok(Teardown {
        cleared,
        remaining,
        released,
    })
}
