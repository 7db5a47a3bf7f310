//! Session management and step loops
//!
//! [`Game`] holds the current session and swaps in a fresh one on restart.
//! Each loop iteration performs exactly one step: drain input, simulate, draw.

use std::io;
use std::thread;
use std::time::Instant;

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::clock::Stepper;
use crate::draw::{DrawSink, Frame};
use crate::input::{InputEvent, InputSource, StepInput};
use crate::sim::{GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Whether the outer loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Quit,
}

/// What a finished run looked like
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub steps: u64,
    pub sessions: u32,
    /// Best displayed score across sessions
    pub best_score: u64,
    /// Displayed score of the session that was live when the run ended
    pub last_score: u64,
    pub quit: bool,
}

/// The current session plus everything needed to start the next one
#[derive(Debug)]
pub struct Game {
    state: GameState,
    tuning: Tuning,
    /// Per-session seeds, so a run replays from its initial seed
    seeds: Pcg32,
    session: u32,
    autopilot: bool,
    /// Highest internal score seen this process (never persisted)
    best_score: u64,
    steps: u64,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut seeds = Pcg32::seed_from_u64(seed);
        let state = GameState::new(seeds.next_u64(), tuning.clone());
        Self {
            state,
            tuning,
            seeds,
            session: 1,
            autopilot: false,
            best_score: 0,
            steps: 0,
        }
    }

    /// Let the autopilot jump and restart
    pub fn with_autopilot(mut self, autopilot: bool) -> Self {
        self.autopilot = autopilot;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// 1-based number of the live session
    pub fn session(&self) -> u32 {
        self.session
    }

    /// Best displayed score so far, including the live session
    pub fn best_score(&self) -> u64 {
        crate::displayed_score(self.best_score.max(self.state.score))
    }

    pub fn frame(&self) -> Frame {
        Frame::capture(&self.state, self.session)
    }

    pub fn summary(&self, quit: bool) -> RunSummary {
        RunSummary {
            steps: self.steps,
            sessions: self.session,
            best_score: self.best_score(),
            last_score: self.state.displayed_score(),
            quit,
        }
    }

    /// Replace the live session with a brand-new one and hand back the old one
    pub fn restart(&mut self) -> GameState {
        let fresh = GameState::new(self.seeds.next_u64(), self.tuning.clone());
        let finished = std::mem::replace(&mut self.state, fresh);
        self.best_score = self.best_score.max(finished.score);
        self.session += 1;
        log::info!(
            "Restarted: session {} (previous score {})",
            self.session,
            finished.displayed_score()
        );
        finished
    }

    /// Run one step. The primary action jumps while running and restarts after
    /// game over. Quit is reported after the step has completed.
    pub fn step(&mut self, input: StepInput) -> StepOutcome {
        self.steps += 1;

        match self.state.phase {
            GamePhase::Running => {
                let tick_input = TickInput {
                    jump: input.primary,
                    autopilot: self.autopilot,
                };
                tick(&mut self.state, &tick_input);
            }
            GamePhase::GameOver => {
                if input.primary || self.autopilot {
                    self.restart();
                }
            }
        }

        if input.quit {
            log::info!("Quit requested after {} steps", self.steps);
            StepOutcome::Quit
        } else {
            StepOutcome::Continue
        }
    }
}

/// Drain input, advance one step, draw
fn run_step<I, D>(
    game: &mut Game,
    input: &mut I,
    sink: &mut D,
    events: &mut Vec<InputEvent>,
) -> io::Result<StepOutcome>
where
    I: InputSource + ?Sized,
    D: DrawSink + ?Sized,
{
    events.clear();
    input.drain(events)?;
    let outcome = game.step(StepInput::from_events(events));
    sink.draw(&game.frame())?;
    Ok(outcome)
}

/// Run in real time at the tuned step rate until quit
pub fn run_realtime<I, D>(game: &mut Game, input: &mut I, sink: &mut D) -> io::Result<RunSummary>
where
    I: InputSource + ?Sized,
    D: DrawSink + ?Sized,
{
    let mut stepper = Stepper::new(game.tuning().steps_per_second);
    let mut events = Vec::new();
    let mut last = Instant::now();

    // Present the opening frame before the first step is due
    sink.draw(&game.frame())?;

    loop {
        let now = Instant::now();
        let due = stepper.advance(now - last);
        last = now;

        for _ in 0..due {
            if run_step(game, input, sink, &mut events)? == StepOutcome::Quit {
                return Ok(game.summary(true));
            }
        }

        thread::sleep(stepper.until_next());
    }
}

/// Run as fast as possible for at most `max_steps` steps
pub fn run_headless<I, D>(
    game: &mut Game,
    input: &mut I,
    sink: &mut D,
    max_steps: u64,
) -> io::Result<RunSummary>
where
    I: InputSource + ?Sized,
    D: DrawSink + ?Sized,
{
    let mut events = Vec::new();
    for _ in 0..max_steps {
        if run_step(game, input, sink, &mut events)? == StepOutcome::Quit {
            return Ok(game.summary(true));
        }
    }
    Ok(game.summary(false))
}
