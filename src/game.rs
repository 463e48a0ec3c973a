use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info};

use crate::Coords;
use crate::snake::Direction;
use crate::state::{Board, GameState, Status, TickResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Glyph {
    Head,
    Body,
    Apple,
    Blank,
}

impl Glyph {
    pub fn char(self) -> char {
        match self {
            Glyph::Head => '@',
            Glyph::Body => '#',
            Glyph::Apple => '◆',
            Glyph::Blank => ' ',
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Turn(Direction),
    Quit,
}

pub trait Renderer {
    fn draw_border(&mut self, board: Board) -> Result<()>;
    fn draw_cell(&mut self, pos: Coords, glyph: Glyph) -> Result<()>;
    fn clear_cell(&mut self, pos: Coords) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

impl<T: Renderer + ?Sized> Renderer for &mut T {
    fn draw_border(&mut self, board: Board) -> Result<()> {
        (**self).draw_border(board)
    }

    fn draw_cell(&mut self, pos: Coords, glyph: Glyph) -> Result<()> {
        (**self).draw_cell(pos, glyph)
    }

    fn clear_cell(&mut self, pos: Coords) -> Result<()> {
        (**self).clear_cell(pos)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

pub trait InputSource {
    /// Waits up to `timeout` for one key. `Ok(None)` means nothing usable
    /// arrived in time.
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<InputEvent>>;
}

pub struct GameLoop<R, I> {
    state: GameState,
    renderer: R,
    input: I,
    tick_interval: Duration,
}

impl<R: Renderer, I: InputSource> GameLoop<R, I> {
    pub fn new(state: GameState, renderer: R, input: I, tick_interval: Duration) -> Self {
        GameLoop { state, renderer, input, tick_interval }
    }

    /// Plays until the snake crashes or the player quits, returning the score.
    pub fn run(&mut self) -> Result<u32> {
        self.draw_initial()?;
        info!(interval = ?self.tick_interval, "session started");

        while self.state.status() == Status::Playing {
            let requested = match self.input.poll_key(self.tick_interval)? {
                Some(InputEvent::Quit) => {
                    info!(score = self.state.score(), "player quit");
                    return Ok(self.state.score());
                }
                Some(InputEvent::Turn(dir)) => Some(dir),
                None => None,
            };

            match self.state.advance(requested) {
                TickResult::GameOver => {},
                result => self.draw_tick(&result)?,
            }
        }

        info!(score = self.state.score(), "game over");
        Ok(self.state.score())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_initial(&mut self) -> Result<()> {
        self.renderer.draw_border(self.state.board())?;

        for (i, pos) in self.state.snake().body().iter().enumerate() {
            let glyph = if i == 0 {Glyph::Head} else {Glyph::Body};
            self.renderer.draw_cell(*pos, glyph)?;
        }

        self.renderer.draw_cell(self.state.apple(), Glyph::Apple)?;
        self.renderer.flush()
    }

    fn draw_tick(&mut self, result: &TickResult) -> Result<()> {
        // The tail goes first: the new head may have moved into its cell
        if let TickResult::Continue { vacated } = result {
            self.renderer.clear_cell(*vacated)?;
        }

        let body = self.state.snake().body();
        if let Some(neck) = body.get(1) {
            self.renderer.draw_cell(*neck, Glyph::Body)?;
        }
        self.renderer.draw_cell(body[0], Glyph::Head)?;

        if let TickResult::AteApple { apple } = result {
            debug!(score = self.state.score(), "drawing new apple");
            self.renderer.draw_cell(*apple, Glyph::Apple)?;
        }

        self.renderer.flush()
    }
}
