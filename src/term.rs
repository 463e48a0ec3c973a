use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, poll, read};
use tracing::{debug, trace};

use crate::Coords;
use crate::game::{Glyph, InputEvent, InputSource, Renderer};
use crate::snake::Direction;
use crate::state::Board;

pub struct TermManager {
    stdout: Stdout,
}

/// Keyboard input read through crossterm's event queue.
pub struct Keyboard;

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout() }
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error enabling raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))
            .context("Error preparing screen")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Error disabling raw mode")?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        Ok(())
    }

    /// Board size as (height, width), i.e. rows then columns.
    pub fn board(&self) -> Result<Board> {
        let (cols, rows) = terminal::size().context("Error reading size")?;
        let rows = i16::try_from(rows).context("Terminal has too many rows")?;
        let cols = i16::try_from(cols).context("Terminal has too many columns")?;
        Ok(Board::new(rows, cols))
    }

    fn print_at(&mut self, (row, col): Coords, ch: char) -> Result<()> {
        let row = u16::try_from(row).context("Row outside the screen")?;
        let col = u16::try_from(col).context("Column outside the screen")?;
        queue!(self.stdout, cursor::MoveTo(col, row), style::Print(ch)).context("Error printing")?;
        Ok(())
    }
}

impl Renderer for TermManager {
    fn draw_border(&mut self, board: Board) -> Result<()> {
        let (height, width) = (board.height(), board.width());
        let (end_row, end_col) = (height - 1, width - 1);

        for col in 0..width {
            let ch = if col == 0 || col == end_col {'+'} else {'-'};
            self.print_at((0, col), ch)?;
            self.print_at((end_row, col), ch)?;
        }

        for row in 1..end_row {
            self.print_at((row, 0), '|')?;
            self.print_at((row, end_col), '|')?;
        }

        self.flush()
    }

    fn draw_cell(&mut self, pos: Coords, glyph: Glyph) -> Result<()> {
        self.print_at(pos, glyph.char())
    }

    fn clear_cell(&mut self, pos: Coords) -> Result<()> {
        self.print_at(pos, Glyph::Blank.char())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }
}

impl InputSource for Keyboard {
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<InputEvent>> {
        if !poll(timeout).context("Error polling for input")? {
            return Ok(None);
        }

        match read().context("Error reading input")? {
            Event::Key(ev) => {
                let mapped = map_key(&ev);
                if mapped.is_none() {
                    trace!(?ev, "ignored key");
                }
                Ok(mapped)
            }
            other => {
                debug!(?other, "ignored non-key event");
                Ok(None)
            }
        }
    }
}

pub fn map_key(ev: &KeyEvent) -> Option<InputEvent> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }

    if is_ctrl_c(ev) {
        return Some(InputEvent::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(InputEvent::Turn(Direction::Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(InputEvent::Turn(Direction::Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(InputEvent::Turn(Direction::Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(InputEvent::Turn(Direction::Right)),
        KeyCode::Char('q') | KeyCode::Esc => Some(InputEvent::Quit),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys_and_wasd() {
        let cases = [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Char('w'), Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Char('s'), Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Char('a'), Direction::Left),
            (KeyCode::Right, Direction::Right),
            (KeyCode::Char('d'), Direction::Right),
        ];

        for (code, dir) in cases.iter() {
            assert_eq!(map_key(&press(*code)), Some(InputEvent::Turn(*dir)));
        }
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(&press(KeyCode::Char('q'))), Some(InputEvent::Quit));
        assert_eq!(map_key(&press(KeyCode::Esc)), Some(InputEvent::Quit));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&ctrl_c), Some(InputEvent::Quit));
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        assert_eq!(map_key(&press(KeyCode::Char('c'))), None);
        assert_eq!(map_key(&press(KeyCode::Char('x'))), None);
        assert_eq!(map_key(&press(KeyCode::Enter)), None);
        assert_eq!(map_key(&press(KeyCode::F(1))), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Up,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(map_key(&release), None);
    }
}
