//! Input event source
//!
//! Frontends translate device events into [`InputEvent`]s. The game only cares
//! whether the primary action or quit happened during a step.

use std::collections::VecDeque;
use std::io;

/// A discrete input event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Close the game
    Quit,
    /// Tap, click or the jump key. Jumps while running, restarts after game over.
    PrimaryAction,
    /// Anything the game has no use for
    Unrecognized(String),
}

/// Something that produces input events between steps
pub trait InputSource {
    /// Append every event that arrived since the last call
    fn drain(&mut self, events: &mut Vec<InputEvent>) -> io::Result<()>;
}

/// What one step's worth of events amounts to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepInput {
    pub primary: bool,
    pub quit: bool,
}

impl StepInput {
    /// Collapse a step's events. Repeats count once; unrecognized events are dropped.
    pub fn from_events(events: &[InputEvent]) -> Self {
        let mut input = Self::default();
        for event in events {
            match event {
                InputEvent::Quit => input.quit = true,
                InputEvent::PrimaryAction => input.primary = true,
                InputEvent::Unrecognized(what) => log::trace!("Ignoring input: {}", what),
            }
        }
        input
    }
}

/// Replays events at fixed step indices (step 0 is the first drain)
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: VecDeque<(u64, InputEvent)>,
    step: u64,
}

impl ScriptedInput {
    pub fn new(script: impl IntoIterator<Item = (u64, InputEvent)>) -> Self {
        let mut script: Vec<_> = script.into_iter().collect();
        script.sort_by_key(|(step, _)| *step);
        Self {
            script: script.into(),
            step: 0,
        }
    }

    /// Events not yet delivered
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl InputSource for ScriptedInput {
    fn drain(&mut self, events: &mut Vec<InputEvent>) -> io::Result<()> {
        while let Some((step, _)) = self.script.front() {
            if *step > self.step {
                break;
            }
            if let Some((_, event)) = self.script.pop_front() {
                events.push(event);
            }
        }
        self.step += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_repeats() {
        let input = StepInput::from_events(&[
            InputEvent::PrimaryAction,
            InputEvent::PrimaryAction,
            InputEvent::PrimaryAction,
        ]);
        assert_eq!(
            input,
            StepInput {
                primary: true,
                quit: false
            }
        );
    }

    #[test]
    fn test_unrecognized_ignored() {
        let input = StepInput::from_events(&[
            InputEvent::Unrecognized("key F7".into()),
            InputEvent::Unrecognized("".into()),
        ]);
        assert_eq!(input, StepInput::default());
    }

    #[test]
    fn test_quit_and_primary_together() {
        let input = StepInput::from_events(&[InputEvent::Quit, InputEvent::PrimaryAction]);
        assert!(input.quit);
        assert!(input.primary);
    }

    #[test]
    fn test_scripted_delivery() {
        let mut source = ScriptedInput::new([
            (2, InputEvent::Quit),
            (0, InputEvent::PrimaryAction),
            (2, InputEvent::PrimaryAction),
        ]);

        let mut events = Vec::new();
        source.drain(&mut events).unwrap();
        assert_eq!(events, vec![InputEvent::PrimaryAction]);

        events.clear();
        source.drain(&mut events).unwrap();
        assert!(events.is_empty());

        events.clear();
        source.drain(&mut events).unwrap();
        assert_eq!(events, vec![InputEvent::Quit, InputEvent::PrimaryAction]);
        assert_eq!(source.remaining(), 0);
    }
}
