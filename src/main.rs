use std::io;
use std::ops::ControlFlow;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use term_2048::autoplay::{Autoplay, Report};
use term_2048::engine::{Game, GameState, DEFAULT_GRID_SIZE};
use term_2048::render::{self, Layout, Placed, Status};
use term_2048::ui::{self, Console, Input};

#[derive(Debug, Parser)]
#[command(name = "term-2048", about = "2048 in the terminal")]
struct Args {
    #[command(subcommand)]
    cmd: Option<Cmd>,

    /// Board side length, at most 64 (values below 2 fall back to 4)
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE, value_parser = parse_grid_size)]
    size: usize,

    /// Seed for tile spawns and random moves
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Watch random moves, resetting after each loss until a game is won
    Auto {
        /// Pause between moves
        #[arg(long, default_value_t = 50)]
        delay_ms: u64,
        /// Stop after this many games
        #[arg(long)]
        max_games: Option<u64>,
    },
    /// Play with the arrow keys or WASD; r resets, q quits
    Play,
    /// Random self-play without drawing the board
    Headless {
        /// Stop after this many games
        #[arg(long, default_value_t = 100)]
        max_games: u64,
        /// Suppress the spinner status line
        #[arg(long)]
        quiet: bool,
    },
}

/// Largest accepted `--size`. Headless mode never checks the terminal, so this
/// is the only bound on the board allocation.
const MAX_GRID_SIZE: usize = 64;

fn parse_grid_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|e| format!("{e}"))?;
    if size > MAX_GRID_SIZE {
        return Err(format!("{size} is larger than {MAX_GRID_SIZE}"));
    }
    Ok(size)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut game = match args.seed {
        Some(seed) => Game::seeded(args.size, seed),
        None => Game::new(args.size),
    };

    match args.cmd.unwrap_or(Cmd::Auto { delay_ms: 50, max_games: None }) {
        Cmd::Auto { delay_ms, max_games } => run_auto(&mut game, Duration::from_millis(delay_ms), max_games),
        Cmd::Play => run_play(&mut game),
        Cmd::Headless { max_games, quiet } => {
            run_headless(&mut game, max_games, quiet);
            Ok(())
        }
    }
}

/// Fail early, before touching the terminal, if the board cannot fit.
fn check_terminal(grid_size: usize) -> anyhow::Result<usize> {
    let (rows, cols) = ui::terminal_size().context("failed to query terminal size")?;
    Layout::new(grid_size).check_fits(rows, cols)?;
    Ok(cols)
}

fn run_auto(game: &mut Game, delay: Duration, max_games: Option<u64>) -> anyhow::Result<()> {
    let cols = check_terminal(game.size())?;
    let mut console = Console::enter().context("failed to set up terminal")?;
    let mut io_error = None;

    let report = Autoplay::new(max_games).run(game, |g, step| {
        let status = Status {
            move_count: g.get_move_count(),
            last_move: Some(step.direction),
            games_played: Some(step.tally.games_played),
            message: None,
        };
        match draw_and_poll(&mut console, &render::frame(g.board(), &status, cols), delay) {
            Ok(Some(Input::Quit)) => ControlFlow::Break(()),
            Ok(_) => ControlFlow::Continue(()),
            Err(e) => {
                io_error = Some(e);
                ControlFlow::Break(())
            }
        }
    });
    if let Some(e) = io_error {
        return Err(e).context("terminal I/O failed");
    }

    if !report.interrupted {
        let status = Status {
            move_count: game.get_move_count(),
            last_move: None,
            games_played: Some(report.tally.games_played),
            message: Some(summary_message(&report)),
        };
        console.draw(&render::frame(game.board(), &status, cols))?;
        while console.wait_input()? != Input::Quit {}
    }
    drop(console);
    info!("{}", summary_line(&report));
    Ok(())
}

fn draw_and_poll(console: &mut Console, placed: &[Placed], delay: Duration) -> io::Result<Option<Input>> {
    console.draw(placed)?;
    console.poll_input(delay)
}

fn run_play(game: &mut Game) -> anyhow::Result<()> {
    let cols = check_terminal(game.size())?;
    let mut console = Console::enter().context("failed to set up terminal")?;
    let mut last_move = None;
    loop {
        let message = match game.state() {
            GameState::Playing => None,
            GameState::Won => Some("You win! r: new game, q: quit".to_string()),
            GameState::Over => Some("Game over. r: new game, q: quit".to_string()),
        };
        let status = Status { move_count: game.get_move_count(), last_move, games_played: None, message };
        console.draw(&render::frame(game.board(), &status, cols))?;

        match console.wait_input()? {
            Input::Quit => break,
            Input::Reset => {
                info!("new game after {} moves", game.get_move_count());
                game.reset();
                last_move = None;
            }
            Input::Dir(direction) if game.state() == GameState::Playing => {
                game.execute_move(direction);
                last_move = Some(direction);
            }
            Input::Dir(_) => {}
        }
    }
    Ok(())
}

fn run_headless(game: &mut Game, max_games: u64, quiet: bool) {
    let pb = (!quiet).then(|| {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {elapsed_precise} | {msg}") {
            pb.set_style(style.tick_chars("⠁⠃⠇⠧⠷⠿⠻⠟⠯⠷⠧⠇⠃"));
        }
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    });

    let report = Autoplay::new(Some(max_games)).run(game, |g, step| {
        if let Some(pb) = &pb {
            if step.outcome.moved && g.get_move_count() % 64 == 0 {
                pb.set_message(format!(
                    "games: {} | moves: {}",
                    step.tally.games_played, step.tally.total_moves
                ));
            }
        }
        ControlFlow::Continue(())
    });

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    println!("{}", summary_line(&report));
    if !quiet {
        println!("{}", game.board());
    }
}

fn summary_message(report: &Report) -> String {
    if report.won {
        format!("Won after {} games! Press q to exit.", report.tally.games_played)
    } else {
        format!("No win in {} games. Press q to exit.", report.tally.games_played)
    }
}

fn summary_line(report: &Report) -> String {
    format!(
        "Games: {} | moves: {} | best tile: {} | won: {}",
        report.tally.games_played, report.tally.total_moves, report.best_tile, report.won
    )
}
