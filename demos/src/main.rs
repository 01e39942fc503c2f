//! Terminal pathfinding visualizer.
//!
//! Run: cargo run --bin pathviz -- --algorithm astar --density 0.3

mod options;
mod term;

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};
use log::info;
use pathviz_playback::{Session, SessionError, Speed};
use pathviz_search::Algorithm;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::options::{Options, USAGE};
use crate::term::Terminal;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Options::from_std_args()?;
    if opts.help {
        println!("{USAGE}");
        return Ok(());
    }

    let mut session = Session::new(opts.config.clone())?;
    let mut rng = StdRng::seed_from_u64(opts.seed);
    session.scatter_walls(&mut rng, opts.density)?;

    info!(
        "{}x{} grid, {} at speed {}",
        opts.config.rows, opts.config.cols, opts.config.algorithm, opts.config.speed
    );
    let mut term = Terminal::init()?;
    let mut status = String::from("space to run, q to quit");
    term.draw(&session, &status)?;

    let mut last = Instant::now();
    loop {
        if event::poll(Duration::from_millis(16))? {
            let action = match event::read()? {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    ..
                }) => match code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    code => on_key(&mut session, &mut rng, opts.density, code),
                },
                Event::Mouse(me) => match (me.kind, Terminal::cell_at(me.column, me.row)) {
                    (MouseEventKind::Down(btn), Some(p)) => match btn {
                        MouseButton::Left => session.toggle_wall(p).map(|_| Redraw::Board),
                        MouseButton::Right => session.move_start(p).map(|_| Redraw::Board),
                        MouseButton::Middle => session.move_end(p).map(|_| Redraw::Board),
                    },
                    _ => Ok(Redraw::Nothing),
                },
                Event::Resize(..) => Ok(Redraw::Board),
                _ => Ok(Redraw::Nothing),
            };
            match action {
                Ok(Redraw::Nothing) => {}
                Ok(Redraw::Board) => term.draw(&session, &status)?,
                Ok(Redraw::Run) => {
                    session.cancel();
                    term.draw(&session, &status)?;
                    let o = session.visualize()?;
                    status = if o.found() {
                        format!("{} visited, path of {} moves", o.trace.len(), o.path_moves())
                    } else {
                        format!("{} visited, no path", o.trace.len())
                    };
                    term.status(&session, &status)?;
                    last = Instant::now();
                }
                Err(e) => {
                    status = match e {
                        SessionError::Busy => String::from("busy: space restarts the run"),
                        e => e.to_string(),
                    };
                    term.status(&session, &status)?;
                }
            }
        }

        let now = Instant::now();
        let was_running = session.is_running();
        session.tick(now - last, &mut term);
        last = now;
        if was_running && !session.is_running() {
            term.status(&session, &status)?;
        }
        term.flush()?;
    }
    Ok(())
}

/// What the screen needs after handling an input.
enum Redraw {
    Nothing,
    Board,
    Run,
}

fn on_key(
    session: &mut Session,
    rng: &mut StdRng,
    density: f64,
    code: KeyCode,
) -> Result<Redraw, SessionError> {
    match code {
        KeyCode::Char(' ') | KeyCode::Enter => Ok(Redraw::Run),
        KeyCode::Char('c') => session.clear_path().map(|_| Redraw::Board),
        KeyCode::Char('r') => session.reset_grid().map(|_| Redraw::Board),
        KeyCode::Char('w') => session.scatter_walls(rng, density).map(|_| Redraw::Board),
        KeyCode::Char(d @ '1'..='4') => {
            let algorithm = Algorithm::ALL[d as usize - '1' as usize];
            session.set_algorithm(algorithm).map(|_| Redraw::Board)
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let speed = Speed::clamped(session.config().speed.get() as i64 + 1);
            session.set_speed(speed).map(|_| Redraw::Board)
        }
        KeyCode::Char('-') => {
            let speed = Speed::clamped(session.config().speed.get() as i64 - 1);
            session.set_speed(speed).map(|_| Redraw::Board)
        }
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            let cfg = session.config();
            let (rows, cols) = match code {
                KeyCode::Up => (cfg.rows - 1, cfg.cols),
                KeyCode::Down => (cfg.rows + 1, cfg.cols),
                KeyCode::Left => (cfg.rows, cfg.cols - 1),
                _ => (cfg.rows, cfg.cols + 1),
            };
            session.resize(rows, cols).map(|_| Redraw::Board)
        }
        _ => Ok(Redraw::Nothing),
    }
}
