#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Track Builder in the terminal.

mod config;
mod input;
mod render;
mod session;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use track_builder_core::{Command, Event};
use track_builder_system_generation::SeededGenerator;
use track_builder_world::query;

use crate::{
    config::Settings,
    input::{Input, InputError, HELP},
    session::Session,
};

/// Build a railway across the board before the clock runs out.
#[derive(Debug, Parser)]
#[command(name = "track-builder", version, about)]
struct Cli {
    /// Seed for board and piece generation; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file overriding the default game settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Log world and system activity to stderr.
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the Track Builder command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match cli.config.as_deref() {
        Some(path) => config::load(path)?,
        None => Settings::default(),
    };
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!("starting session with seed {seed}");

    let generator = SeededGenerator::with_tuning(seed, settings.terrain);
    let mut session = Session::new(settings.game, generator);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", query::welcome_banner(session.world()))?;
    writeln!(stdout, "seed {seed}, type `help` for commands")?;
    draw(&mut stdout, &session)?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read command from stdin")?;
        let input = match input::parse(&line) {
            Ok(input) => input,
            Err(InputError::Empty) => continue,
            Err(error) => {
                writeln!(stdout, "{error}")?;
                continue;
            }
        };

        let events = match input {
            Input::Quit => break,
            Input::Help => {
                writeln!(stdout, "{HELP}")?;
                continue;
            }
            Input::Place(cell) => session.execute(Command::PlacePiece { cell }),
            Input::Store => session.execute(Command::StorePiece),
            Input::Swap => session.execute(Command::SwapStored),
            Input::Wait(dt) => session.advance(dt),
            Input::Go => session.execute(Command::EndBuildPhase),
            Input::Run => session.run_to_conclusion(),
            Input::New => session.execute(Command::NewGame),
            Input::Next => session.execute(Command::NextLevel),
        };

        report(&mut stdout, &events)?;
        draw(&mut stdout, &session)?;
    }

    info!(
        "session ended at level {} with score {}",
        query::level(session.world()),
        query::score(session.world())
    );
    Ok(())
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        let _ = builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn report(out: &mut impl Write, events: &[Event]) -> Result<()> {
    for text in events.iter().filter_map(render::describe) {
        writeln!(out, "{text}")?;
    }
    Ok(())
}

fn draw(out: &mut impl Write, session: &Session) -> Result<()> {
    let world = session.world();
    writeln!(
        out,
        "{}",
        render::board(query::board_view(world), query::train(world))
    )?;
    writeln!(out, "{}", render::status(world))?;
    out.flush().context("failed to flush stdout")
}
