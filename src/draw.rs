//! Draw sink
//!
//! After every step the game hands a [`Frame`] to a sink. Sinks own all
//! presentation, including the score label and the game-over message.

use std::io::{self, Write};

use serde::Serialize;

use crate::sim::{Body, GamePhase, GameState, Rect};

/// Everything a sink needs to present one step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// 1-based session number
    pub session: u32,
    pub player: Rect,
    /// Obstacles in spawn order
    pub obstacles: Vec<Rect>,
    /// Score as shown to the player
    pub score: u64,
    pub phase: GamePhase,
}

impl Frame {
    pub fn capture(state: &GameState, session: u32) -> Self {
        Self {
            session,
            player: state.player.bounds(),
            obstacles: state.obstacles.iter().map(Body::bounds).collect(),
            score: state.displayed_score(),
            phase: state.phase,
        }
    }
}

/// Receives a frame after every step
pub trait DrawSink {
    fn draw(&mut self, frame: &Frame) -> io::Result<()>;
}

/// Discards frames
#[derive(Debug, Default)]
pub struct NullSink;

impl DrawSink for NullSink {
    fn draw(&mut self, _frame: &Frame) -> io::Result<()> {
        Ok(())
    }
}

/// Writes every `stride`-th frame as one line of JSON
pub struct JsonLinesSink<W: Write> {
    out: W,
    stride: u64,
    seen: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self::with_stride(out, 1)
    }

    pub fn with_stride(out: W, stride: u64) -> Self {
        Self {
            out,
            stride: stride.max(1),
            seen: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DrawSink for JsonLinesSink<W> {
    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        let due = self.seen % self.stride == 0;
        self.seen += 1;
        if !due {
            return Ok(());
        }
        serde_json::to_writer(&mut self.out, frame)?;
        self.out.write_all(b"\n")
    }
}
