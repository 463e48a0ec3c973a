mod config;
mod error;
mod game;
mod snake;
mod state;
mod term;

use std::{fs::File, io, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::LogConfig;
use game::GameLoop;
use state::GameState;
use term::{Keyboard, TermManager};

pub type BoardInt = i16;
/// A board cell as (row, column).
pub type Coords = (BoardInt, BoardInt);

fn main() -> Result<()> {
    init_logging(&LogConfig::from_env())?;

    let difficulty = config::prompt_difficulty(&mut io::stdin().lock(), &mut io::stdout())?;
    info!(?difficulty, "difficulty selected");

    let score = play(difficulty.tick_interval())?;

    println!("Game Over!");
    println!("Your Score: {}", score);
    Ok(())
}

fn play(tick_interval: Duration) -> Result<u32> {
    let mut term = TermManager::new();
    let board = term.board()?;
    let state = GameState::new(board, StdRng::from_entropy())?;

    if let Err(e) = term.setup() {
        let _ = term.restore();
        return Err(e);
    }

    let result = GameLoop::new(state, &mut term, Keyboard, tick_interval).run();

    // Put the terminal back before anything is printed, even on failure
    term.restore()?;

    if let Err(e) = &result {
        error!(error = ?e, "session aborted");
    }
    result
}

fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = match &config.filter {
        Some(filter) => filter,
        None => return Ok(()),
    };

    let file = File::create(&config.file)
        .with_context(|| format!("Failed to create log file {}", config.file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).context("Invalid SNAKE_LOG filter")?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(())
}
