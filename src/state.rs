use rand::{rngs::StdRng, seq::SliceRandom, Rng};
use tracing::{debug, info};

use crate::{BoardInt, Coords};
use crate::error::SnakeError;
use crate::snake::{Direction, Snake};

pub const INITIAL_SNAKE: [Coords; 3] = [(15, 10), (14, 10), (13, 10)];
pub const INITIAL_DIRECTION: Direction = Direction::Down;

// Rejection sampling should never get close to this. Past it we scan for
// free cells instead of guessing.
const MAX_APPLE_ATTEMPTS: usize = 10_000;

/// Arena size including the one-cell border reserved for walls.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    height: BoardInt,
    width: BoardInt,
}

impl Board {
    pub fn new(height: BoardInt, width: BoardInt) -> Self {
        Board { height, width }
    }

    pub fn height(&self) -> BoardInt {
        self.height
    }

    pub fn width(&self) -> BoardInt {
        self.width
    }

    pub fn is_interior(&self, (row, col): Coords) -> bool {
        0 < row && row < self.height - 1 && 0 < col && col < self.width - 1
    }

    fn interior_cells(&self) -> impl Iterator<Item = Coords> + '_ {
        (1..self.height - 1).flat_map(move |row| (1..self.width - 1).map(move |col| (row, col)))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickResult {
    /// The snake moved; `vacated` is the cell its tail left behind.
    Continue { vacated: Coords },
    /// The snake grew onto the apple and a new one was placed at `apple`.
    AteApple { apple: Coords },
    GameOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Playing,
    GameOver,
}

pub struct GameState {
    snake: Snake,
    apple: Coords,
    score: u32,
    board: Board,
    status: Status,
    rng: StdRng,
}

impl GameState {
    /// Starts a session with the fixed three segment snake heading down.
    pub fn new(board: Board, rng: StdRng) -> Result<Self, SnakeError> {
        let too_small = SnakeError::BoardTooSmall {
            height: board.height(),
            width: board.width(),
            min_height: INITIAL_SNAKE.iter().map(|p| p.0).max().unwrap_or(0) + 2,
            min_width: INITIAL_SNAKE.iter().map(|p| p.1).max().unwrap_or(0) + 2,
        };

        if !INITIAL_SNAKE.iter().all(|pos| board.is_interior(*pos)) {
            return Err(too_small);
        }

        let snake = Snake::new(&INITIAL_SNAKE, INITIAL_DIRECTION);
        Self::with_snake(board, snake, rng).ok_or(too_small)
    }

    /// Places the first apple around an arbitrary snake. `None` if the
    /// snake already covers every interior cell.
    pub fn with_snake(board: Board, snake: Snake, mut rng: StdRng) -> Option<Self> {
        let apple = place_apple(&board, &snake, &mut rng)?;
        debug!(?apple, "placed first apple");

        Some(GameState { snake, apple, score: 0, board, status: Status::Playing, rng })
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> Coords {
        self.apple
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn status(&self) -> Status {
        self.status
    }

    #[cfg(test)]
    pub fn set_apple(&mut self, apple: Coords) {
        self.apple = apple;
    }

    /// Runs one tick. `requested` is the newest direction key, if any.
    pub fn advance(&mut self, requested: Option<Direction>) -> TickResult {
        if self.status == Status::GameOver {
            return TickResult::GameOver;
        }

        if let Some(dir) = requested {
            if !self.snake.set_direction(dir) {
                debug!(?dir, current = ?self.snake.get_direction(), "ignored reversal");
            }
        }

        let new_head = self.snake.extend();

        let result = if new_head == self.apple {
            self.score += 1;
            match place_apple(&self.board, &self.snake, &mut self.rng) {
                Some(apple) => {
                    debug!(?apple, score = self.score, len = self.snake.len(), "apple eaten");
                    self.apple = apple;
                    TickResult::AteApple { apple }
                }
                None => {
                    info!(score = self.score, "no room left for another apple");
                    self.status = Status::GameOver;
                    return TickResult::GameOver;
                }
            }
        } else {
            match self.snake.shorten() {
                Some(vacated) => TickResult::Continue { vacated },
                None => unreachable!("an extended snake has at least two segments"),
            }
        };

        if !self.board.is_interior(new_head) || self.snake.hit_self() {
            info!(head = ?new_head, score = self.score, "snake crashed");
            self.status = Status::GameOver;
            return TickResult::GameOver;
        }

        result
    }
}

/// Picks a random interior cell the snake does not cover.
fn place_apple<R: Rng>(board: &Board, snake: &Snake, rng: &mut R) -> Option<Coords> {
    if board.height() < 3 || board.width() < 3 {
        return None;
    }

    for _ in 0..MAX_APPLE_ATTEMPTS {
        let apple = (rng.gen_range(1..board.height() - 1), rng.gen_range(1..board.width() - 1));
        if !snake.contains(&apple) {
            return Some(apple);
        }
    }

    let choices: Vec<Coords> = board.interior_cells().filter(|pos| !snake.contains(pos)).collect();
    choices.choose(rng).copied()
}
