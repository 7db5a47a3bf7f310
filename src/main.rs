//! Jump Runner entry point
//!
//! Parses flags, loads tuning, then runs either the terminal frontend in real
//! time or a bounded headless run.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use jump_runner::terminal::Terminal;
use jump_runner::{
    DrawSink, Game, JsonLinesSink, NullSink, RunSummary, ScriptedInput, Tuning, run_headless,
    run_realtime,
};

#[derive(Debug, Parser)]
#[command(name = "jump-runner", version, about = "Side-scrolling jump runner")]
struct Args {
    /// Seed for the first session (restarts derive their seeds from it)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding balance values
    #[arg(long, value_name = "FILE")]
    tuning: Option<std::path::PathBuf>,

    /// Steps per second (overrides the tuning file)
    #[arg(long)]
    fps: Option<u32>,

    /// Run without a terminal UI, as fast as possible
    #[arg(long)]
    headless: bool,

    /// Steps to simulate in headless mode
    #[arg(long, default_value_t = 3600)]
    steps: u64,

    /// Let the autopilot play (jumps and restarts on its own)
    #[arg(long)]
    autopilot: bool,

    /// In headless mode, write every frame as a JSON line to stdout
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let mut tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    if let Some(fps) = args.fps {
        tuning.steps_per_second = fps;
    }
    tuning.validate().context("invalid tuning")?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Jump Runner starting (seed {})", seed);

    let mut game = Game::new(seed, tuning).with_autopilot(args.autopilot);

    let summary = if args.headless {
        headless(&mut game, &args)?
    } else {
        let mut terminal = Terminal::enter(game.tuning()).context("starting terminal frontend")?;
        let summary = run_realtime(&mut game, &mut terminal.input, &mut terminal.screen);
        // Restore the terminal before anything is printed
        drop(terminal);
        summary.context("terminal run failed")?
    };

    if !args.json {
        println!(
            "sessions: {}  steps: {}  best score: {}  last score: {}",
            summary.sessions, summary.steps, summary.best_score, summary.last_score
        );
    }
    Ok(())
}

fn headless(game: &mut Game, args: &Args) -> Result<RunSummary> {
    let mut input = ScriptedInput::default();
    let mut sink: Box<dyn DrawSink> = if args.json {
        Box::new(JsonLinesSink::new(io::BufWriter::new(io::stdout().lock())))
    } else {
        Box::new(NullSink)
    };
    run_headless(game, &mut input, sink.as_mut(), args.steps).context("headless run failed")
}
