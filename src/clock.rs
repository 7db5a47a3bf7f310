//! Fixed-rate stepper
//!
//! Wall-clock time goes into an accumulator and comes out as whole steps, so
//! the simulation rate stays fixed no matter how fast frames are presented.

use std::time::Duration;

use crate::consts::MAX_SUBSTEPS;

/// Longest wall-clock interval credited at once (stalls beyond this are dropped)
const MAX_ELAPSED: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct Stepper {
    step: Duration,
    accumulator: Duration,
    max_substeps: u32,
}

impl Stepper {
    /// Stepper for the given rate
    pub fn new(steps_per_second: u32) -> Self {
        Self {
            step: Duration::from_secs(1) / steps_per_second.max(1),
            accumulator: Duration::ZERO,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    /// Length of one step
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Credit elapsed wall-clock time and return how many steps are due.
    ///
    /// At most `MAX_SUBSTEPS` are returned; any backlog beyond that is
    /// discarded rather than carried into the next call.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed.min(MAX_ELAPSED);

        let mut due = 0;
        while self.accumulator >= self.step && due < self.max_substeps {
            self.accumulator -= self.step;
            due += 1;
        }
        if due == self.max_substeps && self.accumulator >= self.step {
            log::debug!("Dropping {:?} of simulation backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        due
    }

    /// Time left until the next step is due
    pub fn until_next(&self) -> Duration {
        self.step.saturating_sub(self.accumulator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_length() {
        let stepper = Stepper::new(60);
        assert_eq!(stepper.step(), Duration::from_nanos(16_666_666));
        assert_eq!(stepper.until_next(), stepper.step());
    }

    #[test]
    fn test_accumulates_partial_steps() {
        let mut stepper = Stepper::new(100);
        assert_eq!(stepper.advance(Duration::from_millis(4)), 0);
        assert_eq!(stepper.advance(Duration::from_millis(4)), 0);
        assert_eq!(stepper.until_next(), Duration::from_millis(2));
        assert_eq!(stepper.advance(Duration::from_millis(4)), 1);
        assert_eq!(stepper.until_next(), Duration::from_millis(8));
    }

    #[test]
    fn test_multiple_steps_in_one_frame() {
        let mut stepper = Stepper::new(100);
        assert_eq!(stepper.advance(Duration::from_millis(35)), 3);
        assert_eq!(stepper.until_next(), Duration::from_millis(5));
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut stepper = Stepper::new(1000);
        // A long stall only credits MAX_ELAPSED, and only MAX_SUBSTEPS run
        assert_eq!(stepper.advance(Duration::from_secs(5)), MAX_SUBSTEPS);
        assert_eq!(stepper.until_next(), stepper.step());
        assert_eq!(stepper.advance(Duration::ZERO), 0);
    }
}
