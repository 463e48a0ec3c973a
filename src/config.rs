use std::{env, io::{BufRead, Write}, path::PathBuf, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use tracing::debug;

use crate::error::SnakeError;

const LOG_FILTER_VAR: &str = "SNAKE_LOG";
const LOG_FILE_VAR: &str = "SNAKE_LOG_FILE";
const DEFAULT_LOG_FILE: &str = "snake.log";

const PROMPT: &str = "Select game difficulty:\n(1): Easy\n(2): Normal\n(3): Hard\nYour choice: ";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// How long a tick waits for input before the snake moves on its own.
    pub fn tick_interval(self) -> Duration {
        let ms = match self {
            Difficulty::Easy => 500,
            Difficulty::Normal => 200,
            Difficulty::Hard => 40,
        };

        Duration::from_millis(ms)
    }
}

impl FromStr for Difficulty {
    type Err = SnakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Difficulty::Easy),
            "2" => Ok(Difficulty::Normal),
            "3" => Ok(Difficulty::Hard),
            other => Err(SnakeError::InvalidSelection(other.to_string())),
        }
    }
}

/// Asks for a difficulty until a valid one is typed.
pub fn prompt_difficulty<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Difficulty> {
    loop {
        write!(output, "{}", PROMPT).context("Failed to write prompt")?;
        output.flush().context("Failed to flush prompt")?;

        let mut answer = String::new();
        let read = input.read_line(&mut answer).context("Failed to read difficulty")?;
        if read == 0 {
            return Err(SnakeError::InputClosed.into());
        }

        match answer.parse::<Difficulty>() {
            Ok(difficulty) => return Ok(difficulty),
            Err(e) => {
                debug!(error = %e, "rejected difficulty selection");
                writeln!(output, "Invalid option, please type 1, 2 or 3.\n")
                    .context("Failed to write prompt")?;
            }
        }
    }
}

/// Where tracing output goes, if anywhere. The game owns the screen,
/// so logs never go to stdout or stderr.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub filter: Option<String>,
    pub file: PathBuf,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_vars(env::var(LOG_FILTER_VAR).ok(), env::var(LOG_FILE_VAR).ok())
    }

    fn from_vars(filter: Option<String>, file: Option<String>) -> Self {
        LogConfig {
            filter: filter.filter(|f| !f.trim().is_empty()),
            file: file.map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}
