use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style,
    terminal::{self, ClearType},
    ExecutableCommand, QueueableCommand,
};

use crate::engine::Move;
use crate::render::Placed;

/// What a key press asks the driver to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Dir(Move),
    Reset,
    Quit,
}

/// Arrow keys and WASD move; `r` resets; `q`, Esc and Ctrl-C quit.
pub fn map_key(key: KeyEvent) -> Option<Input> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Quit),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(Input::Dir(Move::Up)),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(Input::Dir(Move::Down)),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Some(Input::Dir(Move::Left)),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Some(Input::Dir(Move::Right)),
        KeyCode::Char('r') => Some(Input::Reset),
        KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
        _ => None,
    }
}

/// Current terminal size as (rows, cols).
pub fn terminal_size() -> io::Result<(usize, usize)> {
    let (cols, rows) = terminal::size()?;
    Ok((rows as usize, cols as usize))
}

/// Raw-mode, alternate-screen session. The terminal is restored on drop.
pub struct Console {
    out: Stdout,
}

impl Console {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        Ok(Console { out })
    }

    /// Clear the screen and print every placed string.
    pub fn draw(&mut self, placed: &[Placed]) -> io::Result<()> {
        self.out.queue(terminal::Clear(ClearType::All))?;
        for p in placed {
            self.out.queue(cursor::MoveTo(p.col as u16, p.row as u16))?;
            self.out.queue(style::Print(&p.text))?;
        }
        self.out.flush()
    }

    /// Block until a mapped key is pressed.
    pub fn wait_input(&mut self) -> io::Result<Input> {
        loop {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = map_key(key) {
                    return Ok(input);
                }
            }
        }
    }

    /// Wait at most `timeout` for a mapped key.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<Input>> {
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                return Ok(map_key(key));
            }
        }
        Ok(None)
    }
}

impl Drop for Console {
    fn drop(&mut self) {
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
