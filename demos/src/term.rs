//! Crossterm renderer for a [`Session`].
//!
//! Each cell is two terminal columns wide. The first two rows hold the
//! status line.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, event, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use pathviz_core::{Grid, Pos};
use pathviz_playback::{Renderer, Session};

const HEADER: u16 = 2;

const COL_OPEN: Color = Color::Rgb { r: 30, g: 30, b: 40 };
const COL_WALL: Color = Color::Rgb { r: 110, g: 110, b: 130 };
const COL_START: Color = Color::Rgb { r: 60, g: 200, b: 90 };
const COL_END: Color = Color::Rgb { r: 220, g: 60, b: 60 };
const COL_VISITED: Color = Color::Rgb { r: 40, g: 110, b: 170 };
const COL_PATH: Color = Color::Rgb { r: 250, g: 210, b: 70 };

/// Owns the terminal for the lifetime of the demo. Restores it on drop.
pub struct Terminal {
    out: Stdout,
    start: Pos,
    end: Pos,
    /// First write error from a [`Renderer`] callback, reported on flush.
    err: Option<io::Error>,
}

impl Terminal {
    pub fn init() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self {
            out,
            start: Pos::ZERO,
            end: Pos::ZERO,
            err: None,
        })
    }

    /// Repaint the whole board and the status line.
    pub fn draw(&mut self, session: &Session, status: &str) -> io::Result<()> {
        let grid = session.grid();
        self.start = grid.start();
        self.end = grid.end();
        queue!(self.out, terminal::Clear(ClearType::All))?;
        self.status(session, status)?;
        for c in grid.cells() {
            self.paint(c.pos(), base_color(grid, c.pos()))?;
        }
        self.flush()
    }

    /// Rewrite the status line only.
    pub fn status(&mut self, session: &Session, status: &str) -> io::Result<()> {
        let cfg = session.config();
        let state = if session.is_running() { "running" } else { "idle" };
        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            ResetColor,
            terminal::Clear(ClearType::CurrentLine),
            Print(format!(
                "{} | speed {} | {}x{} | {state} | {status}",
                cfg.algorithm.label(),
                cfg.speed,
                cfg.rows,
                cfg.cols
            ))
        )
    }

    pub fn flush(&mut self) -> io::Result<()> {
        if let Some(e) = self.err.take() {
            return Err(e);
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }

    /// Map a mouse position back to a cell.
    pub fn cell_at(column: u16, row: u16) -> Option<Pos> {
        let row = row.checked_sub(HEADER)?;
        Some(Pos::new(row as i32, (column / 2) as i32))
    }

    fn paint(&mut self, p: Pos, color: Color) -> io::Result<()> {
        let (Ok(x), Ok(y)) = (u16::try_from(p.col * 2), u16::try_from(p.row)) else {
            return Ok(());
        };
        queue!(
            self.out,
            cursor::MoveTo(x, y + HEADER),
            SetForegroundColor(color),
            SetBackgroundColor(color),
            Print("  ")
        )
    }

    fn paint_event(&mut self, p: Pos, color: Color) {
        if p == self.start || p == self.end || self.err.is_some() {
            return;
        }
        if let Err(e) = self.paint(p, color) {
            self.err = Some(e);
        }
    }
}

impl Renderer for Terminal {
    fn visit(&mut self, pos: Pos) {
        self.paint_event(pos, COL_VISITED);
    }

    fn path(&mut self, pos: Pos) {
        self.paint_event(pos, COL_PATH);
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            event::DisableMouseCapture,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

fn base_color(grid: &Grid, p: Pos) -> Color {
    match grid.cell(p) {
        Some(c) if c.is_start() => COL_START,
        Some(c) if c.is_end() => COL_END,
        Some(c) if c.is_wall() => COL_WALL,
        _ => COL_OPEN,
    }
}
